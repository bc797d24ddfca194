//! The single "current report" slot.
//!
//! Writers swap in a whole new `Arc<Dashboard>`; readers clone the `Arc` and
//! release the lock immediately, so a reader sees either the old dashboard or
//! the new one, never a mix.

use std::sync::{Arc, RwLock};

use crate::Dashboard;

#[derive(Debug, Default)]
pub struct ReportSlot {
    inner: RwLock<Option<Arc<Dashboard>>>,
}

impl ReportSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `next`, returning the dashboard it replaced.
    pub fn replace(&self, next: Dashboard) -> Option<Arc<Dashboard>> {
        let next = Arc::new(next);
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.replace(next)
    }

    /// The dashboard published last, if any.
    pub fn current(&self) -> Option<Arc<Dashboard>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
    }

    pub fn clear(&self) -> Option<Arc<Dashboard>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner()).take()
    }
}
