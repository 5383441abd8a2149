//! Error reporting for background jobs.
//!
//! The worker runs every job through a [`jobs::Lifecycle`]; installing
//! [`delayed_job::ErrorReportingPlugin`] on it sends job failures to a
//! [`reporting::Reporter`] with the job's queue, id, attempts and payload attached.

pub mod config;
pub mod delayed_job;
pub mod jobs;
pub mod logging;
pub mod reporting;

pub use config::{Config, ConfigError};
pub use delayed_job::ErrorReportingPlugin;
pub use jobs::{Job, JobError, JobPlugin, Lifecycle};
pub use logging::{LoggingHelper, LOGGER_PROGNAME};
pub use reporting::{RecordingReporter, Reporter, ReporterOptions, TracingReporter};
