use crate::delayed_job::{generate_extra, generate_tags, INTEGRATION_NAME};
use crate::jobs::{BoxFuture, Job, JobError, JobPlugin, Next};
use crate::logging::LoggingHelper;
use crate::reporting::{CapturedEvent, Hint, Reporter, ScopeGuard};
use futures::FutureExt;
use std::{
    future::Future,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

const HINT: Hint = Hint {
    background: false,
    integration: INTEGRATION_NAME,
};

/// Reports failing jobs to the error tracker.
///
/// Each invocation gets its own scope tagged with the job's queue and id and
/// carrying the job metadata as extras. Errors are reported and then handed
/// back untouched; the worker's retry handling sees exactly what the job
/// returned.
#[derive(Clone)]
pub struct ErrorReportingPlugin {
    reporter: Arc<dyn Reporter>,
    max_attempts: i32,
}

impl ErrorReportingPlugin {
    pub fn new(reporter: Arc<dyn Reporter>, max_attempts: i32) -> Self {
        Self {
            reporter,
            max_attempts,
        }
    }

    /// Run `body` for `job` inside a reporting scope.
    ///
    /// A panic in `body` is reported like an error and then resumed with its
    /// original payload.
    pub async fn around<F, T, E>(&self, job: &Job, body: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: std::error::Error,
    {
        if !self.reporter.is_initialized() {
            return body.await;
        }

        let mut scope = ScopeGuard::open(self.reporter.as_ref());
        scope.set_extras(generate_extra(job));
        scope.set_tags(generate_tags(job));

        match AssertUnwindSafe(body).catch_unwind().await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                self.capture_exception(job, || CapturedEvent::new(&err, &scope, HINT));
                Err(err)
            }
            Err(payload) => {
                self.capture_exception(job, || {
                    CapturedEvent::from_panic(&*payload, &scope, HINT)
                });
                panic::resume_unwind(payload)
            }
        }
    }

    /// Whether a failure of `job` on its current attempt gets reported.
    ///
    /// `job.attempts` does not count the run that just failed yet, hence the
    /// comparison against one less than the limit.
    pub fn report(&self, job: &Job) -> bool {
        if !self.reporter.options().delayed_job.report_after_job_retries {
            return true;
        }
        job.attempts >= self.max_attempts.saturating_sub(1)
    }

    fn capture_exception(&self, job: &Job, event: impl FnOnce() -> CapturedEvent) {
        if !self.report(job) {
            self.log_debug(|| {
                format!(
                    "skipping report for job {} on attempt {} of {}",
                    job.id, job.attempts, self.max_attempts
                )
            });
            return;
        }

        if let Err(report_err) = self.reporter.capture(&event()) {
            self.log_warn(|| format!("failed to report error of job {}: {report_err}", job.id));
        }
    }
}

impl LoggingHelper for ErrorReportingPlugin {}

impl JobPlugin for ErrorReportingPlugin {
    fn around_invoke<'a>(
        &'a self,
        job: &'a Job,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), JobError>> {
        Box::pin(self.around(job, next()))
    }
}
