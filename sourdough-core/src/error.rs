//! Error types for sourdough-core.

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a calculator. Both kinds are caused by caller data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Malformed or out-of-domain input (non-positive weight, bad ratio string, NaN, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Valid request with no solution. `range` is the achievable interval when one exists.
    #[error("Unachievable: {reason}")]
    Unachievable {
        reason: String,
        range: Option<(f64, f64)>,
    },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub(crate) fn ensure_finite(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(Error::invalid(format!("{name} must be a finite number")))
    }
}

pub(crate) fn ensure_positive(name: &str, v: f64) -> Result<f64> {
    ensure_finite(name, v)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(Error::invalid(format!("{name} must be > 0 (got {v})")))
    }
}

pub(crate) fn ensure_non_negative(name: &str, v: f64) -> Result<f64> {
    ensure_finite(name, v)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(Error::invalid(format!("{name} must be >= 0 (got {v})")))
    }
}
