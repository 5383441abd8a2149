use crate::jobs::Job;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Longest prefix of `last_error` and `handler` kept in extras.
pub const MAX_TEXT_BYTES: usize = 1001;

/// Cut `s` to at most `max` bytes without splitting a character.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Job metadata attached to the scope of one invocation.
pub fn generate_extra(job: &Job) -> BTreeMap<String, Value> {
    let mut extra = BTreeMap::new();
    let mut put = |key: &str, value: Value| {
        extra.insert(format!("delayed_job.{key}"), value);
    };

    put("id", json!(job.id.to_string()));
    put("priority", json!(job.priority));
    put("attempts", json!(job.attempts));
    put("run_at", json!(job.run_at));
    put("locked_at", json!(job.locked_at));
    put("locked_by", json!(job.locked_by));
    put("queue", json!(job.queue));
    put("created_at", json!(job.created_at));
    put(
        "last_error",
        json!(job
            .last_error
            .as_deref()
            .map(|e| truncate_bytes(e, MAX_TEXT_BYTES))),
    );
    put("handler", json!(truncate_bytes(&job.handler, MAX_TEXT_BYTES)));

    // undecodable payloads contribute nothing here; the job body reports its own error
    if let Ok(payload) = job.payload_object() {
        if let Some(job_data) = payload.job_data() {
            for (key, value) in job_data {
                extra.insert(format!("active_job.{key}"), value.clone());
            }
        }
    }

    extra
}

pub fn generate_tags(job: &Job) -> [(&'static str, String); 2] {
    [
        ("delayed_job.queue", job.queue.clone()),
        ("delayed_job.id", job.id.to_string()),
    ]
}
