//! Error-tracking collaborator: scopes, captured events and reporters.

pub mod event;
pub mod recording;
pub mod reporter;
pub mod scope;
pub mod tracing_reporter;

pub use event::{CapturedEvent, Hint, PANIC_ERROR_TYPE};
pub use recording::RecordingReporter;
pub use reporter::{DelayedJobOptions, ReportError, Reporter, ReporterOptions};
pub use scope::{Scope, ScopeGuard};
pub use tracing_reporter::TracingReporter;
