use crate::reporting::{DelayedJobOptions, ReporterOptions};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be at least 1, got {value}")]
    OutOfRange { key: &'static str, value: i32 },
}

/// Runtime configuration of the worker-side integration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub dsn: Option<String>,
    pub environment: String,
    pub report_after_job_retries: bool,
    /// Worker-wide attempt limit of the job queue.
    pub max_attempts: i32,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let dsn = env_or_fallback("JOBSENTRY_DSN", "SENTRY_DSN");

        let environment = std::env::var("JOBSENTRY_ENVIRONMENT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "production".to_string());

        let report_after_job_retries =
            env_bool("JOBSENTRY_REPORT_AFTER_JOB_RETRIES").unwrap_or(false);

        let max_attempts = match env_with_key("JOBSENTRY_MAX_ATTEMPTS", "MAX_ATTEMPTS") {
            Some((key, raw)) => parse_max_attempts(key, &raw)?,
            None => 25,
        };

        let log_json = env_bool("JOBSENTRY_LOG_JSON").unwrap_or(false);

        Ok(Self {
            dsn,
            environment,
            report_after_job_retries,
            max_attempts,
            log_json,
        })
    }

    pub fn reporter_options(&self) -> ReporterOptions {
        ReporterOptions {
            dsn: self.dsn.clone(),
            environment: self.environment.clone(),
            delayed_job: DelayedJobOptions {
                report_after_job_retries: self.report_after_job_retries,
            },
        }
    }
}

fn parse_max_attempts(key: &'static str, raw: &str) -> Result<i32, ConfigError> {
    let value: i32 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })?;
    if value < 1 {
        return Err(ConfigError::OutOfRange { key, value });
    }
    Ok(value)
}

fn env_or_fallback(primary: &'static str, fallback: &'static str) -> Option<String> {
    env_with_key(primary, fallback).map(|(_, value)| value)
}

/// Like `env_or_fallback`, also naming the variable the value came from.
fn env_with_key(primary: &'static str, fallback: &'static str) -> Option<(&'static str, String)> {
    let non_empty = |key: &'static str| {
        std::env::var(key)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|v| (key, v))
    };
    non_empty(primary).or_else(|| non_empty(fallback))
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_attempts_must_be_a_positive_integer() {
        assert_eq!(parse_max_attempts("JOBSENTRY_MAX_ATTEMPTS", " 5 "), Ok(5));
        assert_eq!(
            parse_max_attempts("JOBSENTRY_MAX_ATTEMPTS", "0"),
            Err(ConfigError::OutOfRange {
                key: "JOBSENTRY_MAX_ATTEMPTS",
                value: 0
            })
        );
        assert!(matches!(
            parse_max_attempts("MAX_ATTEMPTS", "many"),
            Err(ConfigError::InvalidNumber {
                key: "MAX_ATTEMPTS",
                ..
            })
        ));
    }
}
