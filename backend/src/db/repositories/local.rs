//! In-memory local repository implementation.
//!
//! Documents are kept as serialized JSON text so that loads go through the
//! same parsing path as the file backend, and corrupt documents can be seeded
//! for tests. Switches simulate an unreachable store and failing writes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository};
use crate::models::{ClassId, ScheduleDocument};

/// In-memory local repository.
///
/// # Example
/// ```
/// use course_schedule::db::repositories::LocalRepository;
/// use course_schedule::models::{ClassId, ScheduleDocument};
///
/// let repo = LocalRepository::new();
/// repo.insert_document(ClassId::from("403"), &ScheduleDocument::new("403", ""));
/// assert_eq!(repo.document_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    documents: HashMap<ClassId, String>,
    is_healthy: bool,
    fail_writes: bool,
    loads: usize,
    saves: usize,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            documents: HashMap::new(),
            is_healthy: true,
            fail_writes: false,
            loads: 0,
            saves: 0,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document without going through `save`.
    pub fn insert_document(&self, class_id: ClassId, document: &ScheduleDocument) {
        let text = match document.to_json_pretty() {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to serialize seeded document {}: {}", class_id, e);
                return;
            }
        };
        self.data.write().documents.insert(class_id, text);
    }

    /// Store raw document text, valid or not.
    pub fn insert_raw(&self, class_id: ClassId, text: impl Into<String>) {
        self.data.write().documents.insert(class_id, text.into());
    }

    /// Raw text currently stored for `class_id`.
    pub fn raw(&self, class_id: &ClassId) -> Option<String> {
        self.data.read().documents.get(class_id).cloned()
    }

    /// Set the health status for testing store failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make every subsequent `save` fail with `WriteFailure`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.data.write().fail_writes = fail;
    }

    /// Clear all documents and counters.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            fail_writes: data.fail_writes,
            ..Default::default()
        };
    }

    pub fn document_count(&self) -> usize {
        self.data.read().documents.len()
    }

    /// Number of `load` and `save` calls made so far.
    pub fn operation_count(&self) -> usize {
        let data = self.data.read();
        data.loads + data.saves
    }

    pub fn save_count(&self) -> usize {
        self.data.read().saves
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn load(&self, class_id: &ClassId) -> RepositoryResult<ScheduleDocument> {
        let text = {
            let mut data = self.data.write();
            data.loads += 1;
            data.documents.get(class_id).cloned()
        };
        let context = || ErrorContext::class_document("load", class_id);

        let text = text.ok_or_else(|| {
            RepositoryError::not_found_with_context("no document for class", context())
        })?;
        ScheduleDocument::from_json(&text).map_err(|e| {
            RepositoryError::corrupt_with_context(
                "document is not a well-formed class document",
                context().with_details(e.to_string()),
            )
        })
    }

    async fn save(&self, class_id: &ClassId, document: &ScheduleDocument) -> RepositoryResult<()> {
        let context = || ErrorContext::class_document("save", class_id);
        let text = document.to_json_pretty().map_err(|e| {
            RepositoryError::internal_with_context(
                "failed to serialize document",
                context().with_details(e.to_string()),
            )
        })?;

        let mut data = self.data.write();
        data.saves += 1;
        if data.fail_writes {
            return Err(RepositoryError::write_failure_with_context(
                "simulated write failure",
                context(),
            ));
        }
        data.documents.insert(class_id.clone(), text);
        Ok(())
    }

    async fn list_classes(&self) -> RepositoryResult<Vec<ClassId>> {
        let mut classes: Vec<ClassId> = self.data.read().documents.keys().cloned().collect();
        classes.sort();
        Ok(classes)
    }
}
