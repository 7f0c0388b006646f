//! HTTP client for the schedule server.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use super::cell::{CellEditor, EditMode};
use crate::models::{CellEdit, ClassId, EditRequest, ScheduleDocument};

/// Errors returned by [`ScheduleClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the server's `error` field when present.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// HTTP status of a server-side failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SaveBody {
    status: String,
}

#[derive(Debug, Deserialize)]
struct ClassListBody {
    classes: Vec<ClassId>,
}

/// Client for the document reads and `POST /save`.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    base_url: String,
    http: reqwest::Client,
}

impl ScheduleClient {
    /// Client without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::build(base_url, reqwest::Client::builder())
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Self::build(base_url, reqwest::Client::builder().timeout(timeout))
    }

    fn build(
        base_url: impl Into<String>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current document, bypassing intermediary caches.
    pub async fn fetch_document(&self, class_id: &ClassId) -> Result<ScheduleDocument, ClientError> {
        let url = format!("{}/data/{}.json", self.base_url, class_id);
        let response = self
            .http
            .get(&url)
            .query(&[("t", Utc::now().timestamp_millis())])
            .send()
            .await?;
        let body = Self::checked_body(response).await?;
        ScheduleDocument::from_json(&body).map_err(|e| {
            ClientError::UnexpectedResponse(format!("invalid class document: {}", e))
        })
    }

    /// Classes the server lists, in display order.
    pub async fn list_classes(&self) -> Result<Vec<ClassId>, ClientError> {
        let response = self
            .http
            .get(format!("{}/classes", self.base_url))
            .send()
            .await?;
        let body = Self::checked_body(response).await?;
        let list: ClassListBody = serde_json::from_str(&body)
            .map_err(|e| ClientError::UnexpectedResponse(format!("invalid class list: {}", e)))?;
        Ok(list.classes)
    }

    /// Submit one cell edit.
    pub async fn save(&self, edit: &CellEdit) -> Result<(), ClientError> {
        let response = self
            .http
            .post(format!("{}/save", self.base_url))
            .json(&EditRequest::from(edit.clone()))
            .send()
            .await?;
        let body = Self::checked_body(response).await?;
        let saved: SaveBody = serde_json::from_str(&body)
            .map_err(|e| ClientError::UnexpectedResponse(format!("invalid save response: {}", e)))?;
        if saved.status != "success" {
            return Err(ClientError::UnexpectedResponse(format!(
                "save status '{}'",
                saved.status
            )));
        }
        Ok(())
    }

    async fn checked_body(response: reqwest::Response) -> Result<String, ClientError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| body.trim().to_string());
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

impl CellEditor {
    /// Blur the cell and, if that produced an edit, save it and settle the
    /// cell with the outcome.
    ///
    /// Returns `None` when nothing was submitted.
    pub async fn submit(
        &mut self,
        mode: EditMode,
        client: &ScheduleClient,
    ) -> Option<Result<(), ClientError>> {
        let edit = self.blur(mode)?;
        let result = client.save(&edit).await;
        match &result {
            Ok(()) => self.finish(Ok(())),
            Err(ClientError::Server { message, .. }) => self.finish(Err(message.clone())),
            Err(e) => {
                log::warn!("Saving {} {} of class {} failed: {}", edit.date, edit.period, edit.class_id, e);
                self.finish(Err(e.to_string()))
            }
        }
        Some(result)
    }
}
