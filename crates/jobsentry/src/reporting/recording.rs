use crate::reporting::{CapturedEvent, ReportError, Reporter, ReporterOptions, Scope};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex, MutexGuard,
};

/// Reporter that keeps everything in memory.
///
/// Meant for tests of code that installs the integration.
#[derive(Debug)]
pub struct RecordingReporter {
    initialized: bool,
    options: ReporterOptions,
    fail_captures: AtomicBool,
    opened: AtomicUsize,
    closed: AtomicUsize,
    events: Mutex<Vec<CapturedEvent>>,
    last_closed: Mutex<Option<Scope>>,
}

impl RecordingReporter {
    pub fn new(options: ReporterOptions) -> Self {
        Self::build(true, options)
    }

    pub fn uninitialized() -> Self {
        Self::build(false, ReporterOptions::default())
    }

    fn build(initialized: bool, options: ReporterOptions) -> Self {
        Self {
            initialized,
            options,
            fail_captures: AtomicBool::new(false),
            opened: AtomicUsize::new(0),
            closed: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
            last_closed: Mutex::new(None),
        }
    }

    /// Make every following `capture` call fail.
    pub fn fail_captures(&self, fail: bool) {
        self.fail_captures.store(fail, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    pub fn scopes_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn scopes_closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn last_closed_scope(&self) -> Option<Scope> {
        lock(&self.last_closed).clone()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Reporter for RecordingReporter {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn options(&self) -> &ReporterOptions {
        &self.options
    }

    fn open_scope(&self) {
        self.opened.fetch_add(1, Ordering::SeqCst);
    }

    fn close_scope(&self, scope: &Scope) {
        *lock(&self.last_closed) = Some(scope.clone());
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    fn capture(&self, event: &CapturedEvent) -> Result<(), ReportError> {
        if self.fail_captures.load(Ordering::SeqCst) {
            return Err(ReportError::Rejected("capture disabled".to_string()));
        }
        lock(&self.events).push(event.clone());
        Ok(())
    }
}
