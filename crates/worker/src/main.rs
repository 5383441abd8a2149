use jobsentry::config::Config;
use jobsentry::delayed_job::ErrorReportingPlugin;
use jobsentry::jobs::{Job, JobError, Lifecycle};
use jobsentry::logging::init_tracing;
use jobsentry::reporting::{Reporter, TracingReporter};

use std::sync::Arc;
use std::time::Instant;
mod handlers;
use handlers::{build_registry, JobContext};

const USAGE: &str = "worker --jobs <file.jsonl>\n\
     \n\
     Runs every job record in the file (one JSON object per line) through the\n\
     handler registry with error reporting installed.\n\
     The file can also be given with JOBSENTRY_JOBS_FILE.\n";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    init_tracing(cfg.log_json);

    let args: Vec<String> = std::env::args().collect();
    let Some(path) = jobs_path(&args) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let worker_id = std::env::var("WORKER_ID").unwrap_or_else(|_| "worker-1".to_string());
    let jobs = load_jobs(&path)?;

    let reporter: Arc<dyn Reporter> = Arc::new(TracingReporter::new(cfg.reporter_options()));
    let mut lifecycle = Lifecycle::new();
    lifecycle.add_plugin(Arc::new(ErrorReportingPlugin::new(
        reporter.clone(),
        cfg.max_attempts,
    )));
    let lifecycle = Arc::new(lifecycle);

    tracing::info!(
        worker_id = %worker_id,
        jobs = jobs.len(),
        reporting = reporter.is_initialized(),
        environment = %cfg.environment,
        max_attempts = cfg.max_attempts,
        report_after_job_retries = cfg.report_after_job_retries,
        "worker starting"
    );

    let registry = build_registry();
    let ctx = JobContext {
        worker_id: worker_id.clone(),
    };

    let mut join_set = tokio::task::JoinSet::new();
    for job in jobs {
        let registry = registry.clone();
        let lifecycle = lifecycle.clone();
        let ctx = ctx.clone();

        join_set.spawn(async move {
            let start = Instant::now();
            let result: Result<(), JobError> = lifecycle
                .invoke_job(&job, || registry.dispatch(&job, &ctx))
                .await;
            (job, result, start.elapsed().as_millis() as u64)
        });
    }

    let mut failed = 0usize;
    while let Some(joined) = join_set.join_next().await {
        let (job, result, latency_ms) = joined?;
        match result {
            Ok(()) => tracing::info!(
                worker_id = %worker_id,
                job_id = %job.id,
                job_type = %job.job_type,
                latency_ms,
                "succeeded job"
            ),
            Err(err) => {
                failed += 1;
                tracing::warn!(
                    worker_id = %worker_id,
                    job_id = %job.id,
                    job_type = %job.job_type,
                    attempts = job.attempts,
                    code = err.code,
                    latency_ms,
                    "failed job: {}",
                    err.message
                );
            }
        }
    }

    tracing::info!(worker_id = %worker_id, failed, "worker finished");
    Ok(())
}

fn jobs_path(args: &[String]) -> Option<String> {
    args.iter()
        .position(|a| a == "--jobs")
        .and_then(|i| args.get(i + 1).cloned())
        .or_else(|| {
            std::env::var("JOBSENTRY_JOBS_FILE")
                .ok()
                .filter(|s| !s.trim().is_empty())
        })
}

fn load_jobs(path: &str) -> anyhow::Result<Vec<Job>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read jobs file {path}: {e}"))?;

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| anyhow::anyhow!("{path}:{}: invalid job record: {e}", i + 1))
        })
        .collect()
}
