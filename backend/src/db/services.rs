//! High-level database service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers and by tests. The
//! edit path lives here: validate the request, load the class document,
//! replace the content of the first matching entry, and write the whole
//! document back.
//!
//! # Usage
//!
//! ```no_run
//! use course_schedule::db::{services, repositories::FileRepository};
//! use course_schedule::models::EditRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = FileRepository::new("data");
//!     let request = EditRequest::new("403", "03/02", "P1", "小考");
//!     let outcome = services::submit_edit(&repo, request).await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

use log::{info, warn};

use super::repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository};
use crate::models::{CellEdit, ClassId, EditOutcome, EditRequest, ScheduleDocument};

// ==================== Health & Registry ====================

/// Check if the backing store is reachable.
pub async fn health_check<R: ScheduleRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Fetch a class document as stored.
pub async fn get_document<R: ScheduleRepository + ?Sized>(
    repo: &R,
    class_id: &ClassId,
) -> RepositoryResult<ScheduleDocument> {
    repo.load(class_id).await
}

/// Classes to present, in display order.
///
/// A configured registry wins; otherwise every stored document is listed.
pub async fn list_classes<R: ScheduleRepository + ?Sized>(
    repo: &R,
    configured: &[ClassId],
) -> RepositoryResult<Vec<ClassId>> {
    if !configured.is_empty() {
        return Ok(configured.to_vec());
    }
    repo.list_classes().await
}

// ==================== Edit Operations ====================

/// Check that `classId`, `date` and `period` are present and non-empty.
///
/// Performs no I/O.
pub fn validate_edit(request: EditRequest) -> RepositoryResult<CellEdit> {
    request.validate().map_err(|missing| {
        RepositoryError::validation_with_context(
            format!("missing required fields: {}", missing.join(", ")),
            ErrorContext::new("apply_edit").with_entity("edit_request"),
        )
    })
}

/// Replace the content of the entry keyed by (`date`, `period`).
///
/// The document is written back even when no entry matches; that case is
/// logged and reported as [`EditOutcome::EntryNotMatched`], not as an error.
///
/// # Errors
/// * `NotFound` - no document for the class
/// * `CorruptDocument` - the stored document does not parse
/// * `WriteFailure` - the document could not be written back
pub async fn apply_edit<R: ScheduleRepository + ?Sized>(
    repo: &R,
    edit: &CellEdit,
) -> RepositoryResult<EditOutcome> {
    let mut document = repo
        .load(&edit.class_id)
        .await
        .map_err(|e| e.with_operation("apply_edit"))?;

    let outcome = match document.find_entry_mut(&edit.date, &edit.period) {
        Some(entry) => {
            entry.content = edit.content.clone();
            EditOutcome::Updated
        }
        None => {
            warn!(
                "No entry for class {} on {} {}; document left unchanged",
                edit.class_id, edit.date, edit.period
            );
            EditOutcome::EntryNotMatched
        }
    };

    repo.save(&edit.class_id, &document)
        .await
        .map_err(|e| e.with_operation("apply_edit"))?;

    if outcome == EditOutcome::Updated {
        info!(
            "Updated class {} - {} {} ({})",
            edit.class_id, edit.date, edit.period, edit.content
        );
    }
    Ok(outcome)
}

/// Validate a raw request and apply it.
pub async fn submit_edit<R: ScheduleRepository + ?Sized>(
    repo: &R,
    request: EditRequest,
) -> RepositoryResult<EditOutcome> {
    let edit = validate_edit(request)?;
    apply_edit(repo, &edit).await
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;
