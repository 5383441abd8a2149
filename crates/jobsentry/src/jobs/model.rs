use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A job as handed to the worker by the queue, right before it is invoked.
///
/// `attempts` counts the runs that already happened; the run in progress is
/// not included until the queue records its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub job_type: String,
    #[serde(default = "default_queue")]
    pub queue: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub attempts: i32,

    /// Raw serialized payload (JSON text).
    pub handler: String,
    #[serde(default)]
    pub last_error: Option<String>,

    pub run_at: DateTime<Utc>,
    #[serde(default)]
    pub locked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub locked_by: Option<String>,

    pub created_at: DateTime<Utc>,
}

fn default_queue() -> String {
    "default".to_string()
}

impl Job {
    pub fn new(job_type: impl Into<String>, handler: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            job_type: job_type.into(),
            queue: default_queue(),
            priority: 0,
            attempts: 0,
            handler: handler.into(),
            last_error: None,
            run_at: now,
            locked_at: None,
            locked_by: None,
            created_at: now,
        }
    }

    /// Decode `handler` into the job body.
    pub fn payload_object(&self) -> Result<Payload, serde_json::Error> {
        serde_json::from_str(&self.handler)
    }
}

/// Deserialized job body.
///
/// Wrapped payloads come from a framework adapter and carry their own
/// structured job description under `job_data`; everything else is plain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Wrapped { job_data: Map<String, Value> },
    Plain(Value),
}

impl Payload {
    pub fn job_data(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Wrapped { job_data } => Some(job_data),
            Payload::Plain(_) => None,
        }
    }
}
