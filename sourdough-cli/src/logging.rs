//! Tracing setup for the binary. Logs go to stderr so tables on stdout stay clean.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize logging; `RUST_LOG` overrides `default_level`.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}
