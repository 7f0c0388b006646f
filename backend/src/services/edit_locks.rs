//! Optional per-class serialization of edits.
//!
//! Without it two concurrent edits to the same class may both load the
//! document before either saves, and the second save drops the first edit.
//! Holding a class's guard across load-mutate-save rules that out for edits
//! made through one process. Other classes are never blocked.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::models::ClassId;

type Registry = Arc<Mutex<HashMap<ClassId, Arc<AsyncMutex<()>>>>>;

/// Registry of one async mutex per class identifier.
///
/// An entry lives only while some edit holds or waits for it.
#[derive(Clone, Default)]
pub struct EditLocks {
    locks: Registry,
}

/// Held while an edit to one class is in progress.
pub struct EditGuard {
    guard: Option<OwnedMutexGuard<()>>,
    lock: Arc<AsyncMutex<()>>,
    class_id: ClassId,
    registry: Registry,
}

impl EditLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `class_id`.
    pub async fn acquire(&self, class_id: &ClassId) -> EditGuard {
        let lock = {
            let mut locks = self.locks.lock();
            Arc::clone(locks.entry(class_id.clone()).or_default())
        };
        EditGuard {
            guard: Some(Arc::clone(&lock).lock_owned().await),
            lock,
            class_id: class_id.clone(),
            registry: Arc::clone(&self.locks),
        }
    }

    /// Number of classes with an edit in progress or waiting.
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for EditGuard {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.registry.lock();
        // Registry and this guard are the only holders: nobody else waits.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.class_id);
        }
    }
}
