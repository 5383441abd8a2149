use jobsentry::jobs::{BoxFuture, Job, JobError};
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::Semaphore, time::timeout};

type HandlerFn = dyn for<'a> Fn(&'a Job, &'a JobContext) -> BoxFuture<'a, Result<(), JobError>>
    + Send
    + Sync;

#[derive(Clone)]
pub struct JobContext {
    pub worker_id: String,
}

#[derive(Clone)]
pub struct HandlerEntry {
    pub handler: Arc<HandlerFn>,
    pub semaphore: Option<Arc<Semaphore>>,
    pub timeout: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, HandlerEntry>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, job_type: &str, handler: F)
    where
        F: for<'a> Fn(&'a Job, &'a JobContext) -> BoxFuture<'a, Result<(), JobError>>
            + Send
            + Sync
            + 'static,
    {
        self.register_with_options(job_type, handler, HandlerOptions::new());
    }

    pub fn register_with_options<F>(&mut self, job_type: &str, handler: F, opts: HandlerOptions)
    where
        F: for<'a> Fn(&'a Job, &'a JobContext) -> BoxFuture<'a, Result<(), JobError>>
            + Send
            + Sync
            + 'static,
    {
        let semaphore = opts
            .max_concurrency
            .map(|n| Arc::new(Semaphore::new(n.max(1))));
        self.handlers.insert(
            job_type.to_string(),
            HandlerEntry {
                handler: Arc::new(handler),
                semaphore,
                timeout: opts.timeout,
            },
        );
    }

    pub fn handler_for(&self, job_type: &str) -> Option<HandlerEntry> {
        self.handlers.get(job_type).cloned()
    }

    /// The job body handed to the lifecycle.
    pub fn dispatch<'a>(
        &'a self,
        job: &'a Job,
        ctx: &'a JobContext,
    ) -> BoxFuture<'a, Result<(), JobError>> {
        match self.handler_for(&job.job_type) {
            Some(entry) => Box::pin(async move { entry.run(job, ctx).await }),
            None => Box::pin(async move {
                Err::<(), _>(JobError::new(
                    "UNKNOWN_JOB_TYPE",
                    format!("no handler for job_type={}", job.job_type),
                ))
            }),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct HandlerOptions {
    max_concurrency: Option<usize>,
    timeout: Option<Duration>,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = Some(n);
        self
    }

    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }
}

impl HandlerEntry {
    pub async fn run(&self, job: &Job, ctx: &JobContext) -> Result<(), JobError> {
        let _permit = match &self.semaphore {
            Some(sem) => Some(
                sem.clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| JobError::new("WORKER_SHUTDOWN", "handler semaphore closed"))?,
            ),
            None => None,
        };

        let fut = (self.handler)(job, ctx);
        match self.timeout {
            Some(dur) => timeout(dur, fut).await.unwrap_or_else(|_| {
                Err(JobError::new(
                    "TIMEOUT",
                    format!("handler timeout after {}ms", dur.as_millis()),
                ))
            }),
            None => fut.await,
        }
    }
}

#[derive(Deserialize)]
struct EmailSendPayload {
    user_id: i64,
    template: Option<String>,
}

fn parse_payload<T: for<'de> Deserialize<'de>>(job: &Job) -> Result<T, JobError> {
    serde_json::from_str(&job.handler).map_err(|e| JobError::new("BAD_PAYLOAD", e.to_string()))
}

fn boxed<'a, T>(fut: impl std::future::Future<Output = T> + Send + 'a) -> BoxFuture<'a, T> {
    Box::pin(fut)
}

pub fn build_registry() -> Arc<HandlerRegistry> {
    let mut registry = HandlerRegistry::new();

    registry.register_with_options(
        "demo_ok",
        |_job, _ctx| {
            boxed(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(())
            })
        },
        HandlerOptions::new().timeout(Duration::from_secs(5)),
    );
    registry.register_with_options(
        "fail_me",
        |_job, _ctx| {
            boxed(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Err(JobError::new("TIMEOUT", "simulated timeout"))
            })
        },
        HandlerOptions::new().timeout(Duration::from_secs(5)),
    );
    registry.register_with_options(
        "email_send",
        |job, _ctx| {
            boxed(async move {
                let payload: EmailSendPayload = parse_payload(job)?;
                if payload.user_id <= 0 {
                    return Err(JobError::new("BAD_PAYLOAD", "user_id must be positive"));
                }
                let _ = payload.template;
                Ok(())
            })
        },
        HandlerOptions::new()
            .max_concurrency(50)
            .timeout(Duration::from_secs(10)),
    );

    // Framework-wrapped jobs; the wrapped class decides the outcome.
    registry.register("active_job", |job, ctx| {
        boxed(async move {
            let payload = job
                .payload_object()
                .map_err(|e| JobError::new("BAD_PAYLOAD", e.to_string()))?;
            let job_data = payload
                .job_data()
                .ok_or_else(|| JobError::new("BAD_PAYLOAD", "missing job_data"))?;

            match job_data.get("job_class").and_then(|v| v.as_str()) {
                Some("FailingJob") => Err(JobError::new(
                    "DEPENDENCY_DOWN",
                    format!("FailingJob raised on {}", ctx.worker_id),
                )),
                Some(_) => Ok(()),
                None => Err(JobError::new("BAD_PAYLOAD", "job_data.job_class missing")),
            }
        })
    });

    Arc::new(registry)
}
