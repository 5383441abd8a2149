use crate::reporting::{CapturedEvent, Scope};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("reporter rejected event: {0}")]
    Rejected(String),
}

/// Settings of the job-queue integration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelayedJobOptions {
    /// Only report a failing job once it is on its last attempt.
    pub report_after_job_retries: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterOptions {
    pub dsn: Option<String>,
    pub environment: String,
    pub delayed_job: DelayedJobOptions,
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: "production".to_string(),
            delayed_job: DelayedJobOptions::default(),
        }
    }
}

/// The error-tracking client as seen by integrations.
pub trait Reporter: Send + Sync {
    /// `false` until the client has been set up; integrations skip all work then.
    fn is_initialized(&self) -> bool;

    fn options(&self) -> &ReporterOptions;

    fn open_scope(&self) {}

    fn close_scope(&self, _scope: &Scope) {}

    fn capture(&self, event: &CapturedEvent) -> Result<(), ReportError>;
}
