//! Tracing/logging setup shared by binaries and tests.

use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured JSON lines (the deployment default).
    #[default]
    Json,
    /// Human-readable output for local development.
    Pretty,
}

/// Initialize process-wide tracing/logging with the default (JSON) format.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with_format(LogFormat::default());
}

/// Initialize tracing/logging with an explicit output format.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. An
/// already-installed subscriber wins; the error from `try_init` is
/// deliberately ignored so repeated calls (tests, embedders) are no-ops.
pub fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}
