//! Logging shared by the integration and the reporters.

use std::fmt::Display;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Target every record from this crate's helpers is logged under.
pub const LOGGER_PROGNAME: &str = "sentry";

/// Level-named shortcuts onto the process logger.
///
/// The message closure is only called when the level is enabled.
pub trait LoggingHelper {
    fn log_error<F, M>(&self, message: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        if tracing::enabled!(target: LOGGER_PROGNAME, Level::ERROR) {
            let message = message();
            tracing::error!(target: LOGGER_PROGNAME, "{message}");
        }
    }

    fn log_info<F, M>(&self, message: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        if tracing::enabled!(target: LOGGER_PROGNAME, Level::INFO) {
            let message = message();
            tracing::info!(target: LOGGER_PROGNAME, "{message}");
        }
    }

    fn log_debug<F, M>(&self, message: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        if tracing::enabled!(target: LOGGER_PROGNAME, Level::DEBUG) {
            let message = message();
            tracing::debug!(target: LOGGER_PROGNAME, "{message}");
        }
    }

    fn log_warn<F, M>(&self, message: F)
    where
        F: FnOnce() -> M,
        M: Display,
    {
        if tracing::enabled!(target: LOGGER_PROGNAME, Level::WARN) {
            let message = message();
            tracing::warn!(target: LOGGER_PROGNAME, "{message}");
        }
    }
}

/// Install the process-wide subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let _ = if json {
        builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init()
    } else {
        builder.try_init()
    };
}
