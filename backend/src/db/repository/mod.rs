//! Repository trait for class document storage.
//!
//! Implementations are swapped through [`crate::db::RepositoryFactory`]. The
//! trait makes no promise about concurrent access: two `load`/`save` pairs on
//! the same class may interleave, and the last `save` wins.

use async_trait::async_trait;

use crate::models::{ClassId, ScheduleDocument};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Storage of one [`ScheduleDocument`] per class identifier.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can be shared
/// by every request handler.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Read and parse the document for `class_id`.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - no document exists for the class
    /// * `Err(RepositoryError::CorruptDocument)` - the document does not parse
    async fn load(&self, class_id: &ClassId) -> RepositoryResult<ScheduleDocument>;

    /// Replace the whole document for `class_id`.
    ///
    /// # Returns
    /// * `Err(RepositoryError::WriteFailure)` - the document could not be persisted
    async fn save(&self, class_id: &ClassId, document: &ScheduleDocument) -> RepositoryResult<()>;

    /// Identifiers of every class that has a document, sorted.
    async fn list_classes(&self) -> RepositoryResult<Vec<ClassId>>;
}
