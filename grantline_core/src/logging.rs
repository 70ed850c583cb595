//! Logging utilities for connector-wide output to stdout.
//!

// Re-exports for convenience
pub use tracing::metadata::LevelFilter;
pub use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{util::SubscriberInitExt, Layer};

/// Set up basic logging.
///
/// Calling this more than once is harmless: only the first call installs
/// the subscriber.
pub fn setup(level: Option<LevelFilter>) {
    // The user can specify a log level via an env var
    // (such as for testing).
    let env = std::env::var("RUST_LOG").unwrap_or_else(|_| "sqlx=warn".into());
    let mut logging_layers = vec![tracing_subscriber::EnvFilter::new(env).boxed()];

    // The input level overrides any env vars.
    let layer = tracing_subscriber::fmt::layer()
        .with_filter(level.unwrap_or(LevelFilter::INFO))
        .boxed();
    logging_layers.push(layer);

    // Actually initialize all logging layers
    if tracing_subscriber::registry()
        .with(logging_layers)
        .try_init()
        .is_err()
    {
        return;
    }

    debug!("logging set up");
}
