//! Logging initialization.
//!
//! Diagnostics go to stderr through `tracing`; stdout is reserved for the
//! progress and summary lines printed by [`photo_normalize::output`].

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// Without `--verbose` only warnings (skipped or failed images) are shown;
/// with it, every correction step is logged at debug level. `RUST_LOG`
/// overrides both.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
