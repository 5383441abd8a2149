use jobsentry::config::{Config, ConfigError};
use serial_test::serial;

const KEYS: &[&str] = &[
    "JOBSENTRY_DSN",
    "SENTRY_DSN",
    "JOBSENTRY_ENVIRONMENT",
    "JOBSENTRY_REPORT_AFTER_JOB_RETRIES",
    "JOBSENTRY_MAX_ATTEMPTS",
    "MAX_ATTEMPTS",
    "JOBSENTRY_LOG_JSON",
];

fn clear_env() {
    for key in KEYS {
        std::env::remove_var(key);
    }
}

#[test]
#[serial]
fn defaults_without_env() {
    clear_env();

    let cfg = Config::from_env().unwrap();
    assert!(cfg.dsn.is_none());
    assert_eq!(cfg.environment, "production");
    assert!(!cfg.report_after_job_retries);
    assert_eq!(cfg.max_attempts, 25);
    assert!(!cfg.log_json);
}

#[test]
#[serial]
fn reads_values_and_fallbacks() {
    clear_env();
    std::env::set_var("SENTRY_DSN", "https://key@errors.example.com/1");
    std::env::set_var("JOBSENTRY_ENVIRONMENT", "staging");
    std::env::set_var("JOBSENTRY_REPORT_AFTER_JOB_RETRIES", "yes");
    std::env::set_var("MAX_ATTEMPTS", "5");

    let cfg = Config::from_env().unwrap();
    clear_env();

    assert_eq!(cfg.dsn.as_deref(), Some("https://key@errors.example.com/1"));
    assert_eq!(cfg.max_attempts, 5);

    let options = cfg.reporter_options();
    assert_eq!(options.environment, "staging");
    assert!(options.delayed_job.report_after_job_retries);
}

#[test]
#[serial]
fn rejects_bad_max_attempts() {
    clear_env();
    std::env::set_var("JOBSENTRY_MAX_ATTEMPTS", "-2");

    let err = Config::from_env().unwrap_err();
    clear_env();

    assert_eq!(
        err,
        ConfigError::OutOfRange {
            key: "JOBSENTRY_MAX_ATTEMPTS",
            value: -2
        }
    );
}

#[test]
#[serial]
fn errors_name_the_fallback_key_that_supplied_the_value() {
    clear_env();
    std::env::set_var("MAX_ATTEMPTS", "lots");

    let err = Config::from_env().unwrap_err();
    clear_env();

    assert_eq!(
        err,
        ConfigError::InvalidNumber {
            key: "MAX_ATTEMPTS",
            value: "lots".to_string()
        }
    );
}
