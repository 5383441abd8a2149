use jobsentry::jobs::{BoxFuture, Job, JobError};
use jobsentry::reporting::{DelayedJobOptions, RecordingReporter, ReporterOptions};
use std::{
    io,
    sync::{Arc, Mutex},
};

#[allow(dead_code)]
pub const MAX_ATTEMPTS: i32 = 5;

#[allow(dead_code)]
pub fn reporter(report_after_job_retries: bool) -> Arc<RecordingReporter> {
    Arc::new(RecordingReporter::new(ReporterOptions {
        dsn: Some("https://key@errors.example.com/1".to_string()),
        delayed_job: DelayedJobOptions {
            report_after_job_retries,
        },
        ..ReporterOptions::default()
    }))
}

#[allow(dead_code)]
pub fn job(queue: &str, attempts: i32) -> Job {
    let mut job = Job::new("fail_me", r#"{"user_id":7}"#);
    job.queue = queue.to_string();
    job.attempts = attempts;
    job
}

#[allow(dead_code)]
pub fn ok_body<'a>() -> BoxFuture<'a, Result<(), JobError>> {
    Box::pin(async { Ok(()) })
}

#[allow(dead_code)]
pub fn failing_body<'a>(err: JobError) -> BoxFuture<'a, Result<(), JobError>> {
    Box::pin(async move { Err(err) })
}

/// In-memory log sink for `tracing_subscriber::fmt().with_writer(..)`.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
