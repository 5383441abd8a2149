use crate::logging::{LoggingHelper, LOGGER_PROGNAME};
use crate::reporting::{CapturedEvent, ReportError, Reporter, ReporterOptions, Scope};

/// Reporter that writes every captured event as one structured error record.
///
/// It only counts as initialized when a DSN is configured, which mirrors how
/// a networked client behaves when it has nowhere to send events.
#[derive(Debug, Clone)]
pub struct TracingReporter {
    options: ReporterOptions,
}

impl TracingReporter {
    pub fn new(options: ReporterOptions) -> Self {
        Self { options }
    }
}

impl LoggingHelper for TracingReporter {}

impl Reporter for TracingReporter {
    fn is_initialized(&self) -> bool {
        self.options.dsn.is_some()
    }

    fn options(&self) -> &ReporterOptions {
        &self.options
    }

    fn open_scope(&self) {
        self.log_debug(|| "scope opened");
    }

    fn close_scope(&self, scope: &Scope) {
        self.log_debug(|| {
            format!(
                "scope closed tags={} extras={}",
                scope.tags().len(),
                scope.extras().len()
            )
        });
    }

    fn capture(&self, event: &CapturedEvent) -> Result<(), ReportError> {
        let payload = serde_json::to_string(event)?;

        tracing::error!(
            target: LOGGER_PROGNAME,
            environment = %self.options.environment,
            integration = event.hint.integration,
            error_type = %event.error_type,
            event = %payload,
            "{}",
            event.message
        );
        Ok(())
    }
}
