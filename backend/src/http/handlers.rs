//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::dto::{ClassListResponse, HealthResponse, SaveResponse};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{ClassId, EditRequest};
use crate::services::{self, ClassSummary, Overview};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the document
/// store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let storage = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage,
    }))
}

// =============================================================================
// Documents
// =============================================================================

/// GET /data/{classId}.json
///
/// Current class document, never cached. Query strings are ignored.
pub async fn get_class_document(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let class_id = file
        .strip_suffix(".json")
        .filter(|id| !id.is_empty())
        .map(ClassId::from)
        .ok_or_else(|| AppError::NotFound("class document not found".to_string()))?;

    let document = db_services::get_document(state.repository.as_ref(), &class_id).await?;
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(document)))
}

/// GET /classes
///
/// Configured class registry, or every stored class when none is configured.
pub async fn list_classes(State(state): State<AppState>) -> HandlerResult<ClassListResponse> {
    let classes = db_services::list_classes(state.repository.as_ref(), &state.classes).await?;
    let total = classes.len();
    Ok(Json(ClassListResponse { classes, total }))
}

// =============================================================================
// Edits
// =============================================================================

/// POST /save
///
/// Replace the content of one (`date`, `period`) cell of a class document.
/// An edit that matches no entry still succeeds and leaves the document as is.
pub async fn save_content(
    State(state): State<AppState>,
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> HandlerResult<SaveResponse> {
    let Json(request) = payload.map_err(|e| {
        let message = format!("invalid request body: {}", e.body_text());
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    })?;
    let edit = db_services::validate_edit(request)?;

    let _guard = match &state.edit_locks {
        Some(locks) if edit.class_id.is_storable() => Some(locks.acquire(&edit.class_id).await),
        _ => None,
    };
    db_services::apply_edit(state.repository.as_ref(), &edit).await?;

    Ok(Json(SaveResponse::success()))
}

// =============================================================================
// Views
// =============================================================================

/// GET /classes/{class_id}/summary
///
/// Annotated entries and per-segment lesson counts for one class.
pub async fn get_class_summary(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> HandlerResult<ClassSummary> {
    let class_id = ClassId::from(class_id);
    let summary = services::class_summary(
        state.repository.as_ref(),
        &class_id,
        &state.calendar,
        state.today(),
    )
    .await?;
    Ok(Json(summary))
}

/// GET /overview
///
/// Weekly matrix across every listed class.
pub async fn get_overview(State(state): State<AppState>) -> HandlerResult<Overview> {
    let classes = db_services::list_classes(state.repository.as_ref(), &state.classes).await?;
    let overview = services::overview(
        state.repository.as_ref(),
        &classes,
        &state.calendar,
        state.today(),
    )
    .await?;
    Ok(Json(overview))
}
