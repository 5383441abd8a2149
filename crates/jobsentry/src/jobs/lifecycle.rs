use crate::jobs::{Job, JobError};
use std::{future::Future, pin::Pin, sync::Arc};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The rest of the `invoke_job` chain: the next plugin, or the job body itself.
pub type Next<'a> = Box<dyn FnOnce() -> BoxFuture<'a, Result<(), JobError>> + Send + 'a>;

/// Hook wrapped around every job invocation.
///
/// A plugin must call `next` at most once and should hand back whatever
/// result the chain produced.
pub trait JobPlugin: Send + Sync {
    fn around_invoke<'a>(
        &'a self,
        job: &'a Job,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), JobError>>;
}

/// Plugins registered on the worker, in registration order.
#[derive(Clone, Default)]
pub struct Lifecycle {
    plugins: Vec<Arc<dyn JobPlugin>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_plugin(&mut self, plugin: Arc<dyn JobPlugin>) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run `body` for `job` with every plugin wrapped around it.
    /// The first registered plugin is the outermost one.
    pub fn invoke_job<'a, F>(
        &'a self,
        job: &'a Job,
        body: F,
    ) -> BoxFuture<'a, Result<(), JobError>>
    where
        F: FnOnce() -> BoxFuture<'a, Result<(), JobError>> + Send + 'a,
    {
        let body: Next<'a> = Box::new(body);

        let chain = self
            .plugins
            .iter()
            .rev()
            .fold(body, |next, plugin| -> Next<'a> {
                Box::new(move || plugin.around_invoke(job, next))
            });

        chain()
    }
}
