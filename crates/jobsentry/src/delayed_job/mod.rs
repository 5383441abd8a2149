//! Error reporting for jobs run by the worker.
//!
//! Install [`ErrorReportingPlugin`] on the worker's [`Lifecycle`](crate::jobs::Lifecycle)
//! and every failing job is captured with its queue metadata attached.

pub mod extras;
pub mod plugin;

pub use extras::{generate_extra, generate_tags, truncate_bytes, MAX_TEXT_BYTES};
pub use plugin::ErrorReportingPlugin;

pub const INTEGRATION_NAME: &str = "delayed_job";
