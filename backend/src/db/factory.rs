//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::{FileRepository, LocalRepository};
use super::repository::{RepositoryError, RepositoryResult, ScheduleRepository};
use crate::config::ServiceConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// One JSON file per class in a data directory
    File,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("file", "fs", "local", "memory")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "fs" => Ok(Self::File),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use course_schedule::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `data_dir` - Data directory (required for the file repository)
    pub fn create(
        repo_type: RepositoryType,
        data_dir: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn ScheduleRepository>> {
        match repo_type {
            RepositoryType::File => {
                let data_dir = data_dir.ok_or_else(|| {
                    RepositoryError::configuration("File repository requires a data directory")
                })?;
                Ok(Self::create_file(data_dir))
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a file repository rooted at `data_dir`.
    pub fn create_file(data_dir: &Path) -> Arc<dyn ScheduleRepository> {
        Arc::new(FileRepository::new(data_dir))
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<dyn ScheduleRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create the repository described by a service configuration.
    pub fn from_config(config: &ServiceConfig) -> RepositoryResult<Arc<dyn ScheduleRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        Self::create(repo_type, Some(&config.repository.data_dir))
    }
}
