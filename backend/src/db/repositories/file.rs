//! File-backed repository: one `<classId>.json` per class.
//!
//! Saves go through a uniquely named temp file in the data directory which is
//! synced and then renamed over the target, so a crash mid-write never leaves
//! a truncated document behind. Nothing is cached and nothing is locked.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository};
use crate::models::{ClassId, ScheduleDocument};

const DOCUMENT_EXTENSION: &str = "json";

/// Repository storing class documents as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileRepository {
    data_dir: PathBuf,
}

impl FileRepository {
    /// Create a repository rooted at `data_dir`. The directory is not created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the document for `class_id`, or `None` when the identifier
    /// cannot name a file inside the data directory.
    pub fn document_path(&self, class_id: &ClassId) -> Option<PathBuf> {
        if !class_id.is_storable() {
            return None;
        }
        Some(
            self.data_dir
                .join(format!("{}.{}", class_id, DOCUMENT_EXTENSION)),
        )
    }

    fn temp_path(&self, class_id: &ClassId) -> PathBuf {
        self.data_dir
            .join(format!(".{}.{}.tmp", class_id, Uuid::new_v4().simple()))
    }

    async fn write_atomic(&self, class_id: &ClassId, path: &Path, text: &str) -> std::io::Result<()> {
        let tmp_path = self.temp_path(class_id);
        let result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(text.as_bytes()).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp_path, path).await
        }
        .await;

        if result.is_err() {
            if let Err(e) = tokio::fs::remove_file(&tmp_path).await {
                if e.kind() != ErrorKind::NotFound {
                    warn!("Failed to remove temp file {}: {}", tmp_path.display(), e);
                }
            }
        }
        result
    }
}

#[async_trait]
impl ScheduleRepository for FileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(tokio::fs::metadata(&self.data_dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn load(&self, class_id: &ClassId) -> RepositoryResult<ScheduleDocument> {
        let context = || ErrorContext::class_document("load", class_id);
        let path = self.document_path(class_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "class id does not name a document",
                context(),
            )
        })?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RepositoryError::not_found_with_context(
                    "no document for class",
                    context(),
                ));
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(RepositoryError::corrupt_with_context(
                    "document is not valid UTF-8",
                    context().with_details(e.to_string()),
                ));
            }
            Err(e) => {
                return Err(RepositoryError::internal_with_context(
                    "failed to read document",
                    context().with_details(format!("{}: {}", path.display(), e)),
                ));
            }
        };

        debug!("Loaded class document {} ({} bytes)", class_id, text.len());
        ScheduleDocument::from_json(&text).map_err(|e| {
            RepositoryError::corrupt_with_context(
                "document is not a well-formed class document",
                context().with_details(e.to_string()),
            )
        })
    }

    async fn save(&self, class_id: &ClassId, document: &ScheduleDocument) -> RepositoryResult<()> {
        let context = || ErrorContext::class_document("save", class_id);
        let path = self.document_path(class_id).ok_or_else(|| {
            RepositoryError::validation_with_context(
                "class id does not name a document",
                context(),
            )
        })?;

        let text = document.to_json_pretty().map_err(|e| {
            RepositoryError::internal_with_context(
                "failed to serialize document",
                context().with_details(e.to_string()),
            )
        })?;

        self.write_atomic(class_id, &path, &text).await.map_err(|e| {
            RepositoryError::write_failure_with_context(
                "failed to write document",
                context().with_details(format!("{}: {}", path.display(), e)),
            )
        })?;

        debug!("Saved class document {} ({} bytes)", class_id, text.len());
        Ok(())
    }

    async fn list_classes(&self) -> RepositoryResult<Vec<ClassId>> {
        let mut dir = match tokio::fs::read_dir(&self.data_dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Data directory {} does not exist", self.data_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(RepositoryError::internal_with_context(
                    "failed to list documents",
                    ErrorContext::new("list_classes").with_details(e.to_string()),
                ));
            }
        };

        let mut classes = Vec::new();
        loop {
            let entry = dir.next_entry().await.map_err(|e| {
                RepositoryError::internal_with_context(
                    "failed to list documents",
                    ErrorContext::new("list_classes").with_details(e.to_string()),
                )
            })?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            classes.push(ClassId::new(stem));
        }

        classes.sort();
        Ok(classes)
    }
}
