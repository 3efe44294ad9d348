//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingLog;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the configuration names one.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Resolves the event filter.
///
/// `RUST_LOG` takes precedence, then `config.trace_level`, then
/// [`DEFAULT_TRACE_LEVEL`]. An unparseable configured directive falls back to
/// the default.
#[must_use]
pub fn build_filter(config: &Config) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

/// Installs the global subscriber.
///
/// Events go to `config.log_file` through a [`RotatingLog`] when one is set,
/// otherwise to stderr. Only the first call in a process takes effect.
///
/// # Example
///
/// ```
/// use planboard::observability::init_tracing;
/// use planboard::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match &config.log_file {
        Some(path) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(RotatingLog::new(path)),
            )
            .try_init(),
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(log_file = ?config.log_file, "tracing initialized");
    }
}
