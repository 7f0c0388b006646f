//! Data Transfer Objects for the HTTP API.
//!
//! Document, summary and overview bodies are the model and service types
//! themselves; only the small envelopes live here.

use serde::{Deserialize, Serialize};

pub use crate::models::{ClassId, EditRequest, ScheduleDocument};
pub use crate::services::{ClassSummary, Overview};

/// Body returned by a successful `POST /save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
}

impl SaveResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Storage status
    pub storage: String,
}

/// Response for listing classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassListResponse {
    /// Class identifiers in display order
    pub classes: Vec<ClassId>,
    /// Total count
    pub total: usize,
}
