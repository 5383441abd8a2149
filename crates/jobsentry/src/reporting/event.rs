use crate::reporting::Scope;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::{any::Any, collections::BTreeMap};

/// `error_type` of events built from a panic.
pub const PANIC_ERROR_TYPE: &str = "panic";

/// Extra information handed to the reporter along with the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hint {
    /// Whether the error was raised outside of a request/job boundary.
    pub background: bool,
    /// Integration that captured the error.
    pub integration: &'static str,
}

/// An error together with the scope it was captured in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedEvent {
    pub timestamp: DateTime<Utc>,
    pub error_type: String,
    pub message: String,
    /// `source()` chain, outermost cause first.
    pub causes: Vec<String>,
    pub tags: BTreeMap<String, String>,
    pub extras: BTreeMap<String, Value>,
    pub hint: Hint,
}

impl CapturedEvent {
    pub fn new<E>(error: &E, scope: &Scope, hint: Hint) -> Self
    where
        E: std::error::Error,
    {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            timestamp: Utc::now(),
            error_type: std::any::type_name::<E>().to_string(),
            message: error.to_string(),
            causes,
            tags: scope.tags().clone(),
            extras: scope.extras().clone(),
            hint,
        }
    }

    /// Event for a panic payload, as caught by `catch_unwind`.
    pub fn from_panic(payload: &(dyn Any + Send), scope: &Scope, hint: Hint) -> Self {
        Self {
            timestamp: Utc::now(),
            error_type: PANIC_ERROR_TYPE.to_string(),
            message: panic_message(payload),
            causes: Vec::new(),
            tags: scope.tags().clone(),
            extras: scope.extras().clone(),
            hint,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
