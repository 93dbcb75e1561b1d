//! Utilities for logging.

use tracing_subscriber::EnvFilter;

/// Output format for emitted log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty-ish human readable output, suitable for terminals.
    HumanReadable,
    /// One JSON object per event, suitable for log collectors.
    Json,
}

/// Configure the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset; when set, `RUST_LOG`
/// wins. Events are written to stderr so stdout stays usable for program
/// output.
///
/// Panics if a global subscriber was already installed.
pub fn configure_global_logger(default_level: tracing::Level, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::HumanReadable => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
