//! Telemetry logic.
//! Logging via `tracing`, filtered through `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install the global logging subscriber.
///
/// Filtering follows the `RUST_LOG` environment variable and defaults to
/// `info`. Calling this twice is a no-op.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
