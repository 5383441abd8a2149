use crate::reporting::Reporter;
use serde_json::Value;
use std::{
    collections::BTreeMap,
    ops::{Deref, DerefMut},
};

/// Tags and extras attached to whatever gets captured while the scope is open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    tags: BTreeMap<String, String>,
    extras: BTreeMap<String, Value>,
}

impl Scope {
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(key.into(), value.into());
    }

    pub fn set_tags<K, V>(&mut self, tags: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in tags {
            self.set_tag(k, v);
        }
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        self.extras.insert(key.into(), value);
    }

    pub fn set_extras<K>(&mut self, extras: impl IntoIterator<Item = (K, Value)>)
    where
        K: Into<String>,
    {
        for (k, v) in extras {
            self.set_extra(k, v);
        }
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extras
    }
}

/// An isolated scope that is open for as long as the guard lives.
///
/// Dropping the guard closes the scope, so it is released on return, on
/// error, while unwinding, and when the owning future is cancelled.
pub struct ScopeGuard<'a> {
    reporter: &'a dyn Reporter,
    scope: Scope,
}

impl<'a> ScopeGuard<'a> {
    pub fn open(reporter: &'a dyn Reporter) -> Self {
        reporter.open_scope();
        Self {
            reporter,
            scope: Scope::default(),
        }
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Scope;

    fn deref(&self) -> &Scope {
        &self.scope
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.reporter.close_scope(&self.scope);
    }
}
