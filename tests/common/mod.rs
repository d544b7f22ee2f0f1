//! Shared helpers for end-to-end suite tests

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Thread-safe ordered log of which suite components ran
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn push(&self, label: impl Into<String>) {
        self.entries.lock().push(label.into());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn count_of(&self, label: &str) -> usize {
        self.entries.lock().iter().filter(|e| *e == label).count()
    }
}

/// Shared invocation counter for hooks and bodies
#[derive(Clone, Default)]
pub struct Counter {
    count: Arc<AtomicUsize>,
}

impl Counter {
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}
