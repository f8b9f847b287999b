//! Errors surfaced by the `sourdough` binary.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A calculator rejected its input
    #[error(transparent)]
    Core(#[from] sourdough_core::Error),

    #[error("Failed to read profile {path}: {source}")]
    ProfileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid profile JSON {path}: {source}")]
    ProfileParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to save profile {path}: {source}")]
    ProfileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Flag combination the calculators cannot work with
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Extra line printed under the error, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::Core(sourdough_core::Error::Unachievable {
                range: Some((lo, hi)),
                ..
            }) => Some(format!("Achievable protein range: {lo}% – {hi}%")),
            _ => None,
        }
    }
}
