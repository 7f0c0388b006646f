//! Application state for the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::ServiceConfig;
use crate::db::repository::{RepositoryError, RepositoryResult, ScheduleRepository};
use crate::models::{Calendar, CalendarSettings, ClassId};
use crate::services::EditLocks;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document store
    pub repository: Arc<dyn ScheduleRepository>,
    /// Semester calendar used by the summary and overview endpoints
    pub calendar: Arc<Calendar>,
    /// Configured class registry; empty means "whatever is stored"
    pub classes: Arc<Vec<ClassId>>,
    /// Present when edits to one class are serialized
    pub edit_locks: Option<EditLocks>,
    /// Directory served for paths no route matches
    pub static_dir: Option<PathBuf>,
    /// Fixed "today" for the statistics; the local date when unset
    pub today: Option<NaiveDate>,
}

impl AppState {
    /// Create a new application state with the given repository and the
    /// default calendar.
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> RepositoryResult<Self> {
        let calendar = CalendarSettings::default()
            .resolve()
            .map_err(RepositoryError::configuration)?;
        Ok(Self {
            repository,
            calendar: Arc::new(calendar),
            classes: Arc::new(Vec::new()),
            edit_locks: None,
            static_dir: None,
            today: None,
        })
    }

    /// Build the state described by `config` around `repository`.
    pub fn from_config(
        repository: Arc<dyn ScheduleRepository>,
        config: &ServiceConfig,
    ) -> RepositoryResult<Self> {
        let calendar = config
            .calendar
            .resolve()
            .map_err(RepositoryError::configuration)?;
        Ok(Self {
            repository,
            calendar: Arc::new(calendar),
            classes: Arc::new(config.classes()),
            edit_locks: config.server.serialize_edits.then(EditLocks::new),
            static_dir: config.server.static_dir.clone(),
            today: None,
        })
    }

    pub fn with_classes(mut self, classes: Vec<ClassId>) -> Self {
        self.classes = Arc::new(classes);
        self
    }

    pub fn with_edit_locks(mut self) -> Self {
        self.edit_locks = Some(EditLocks::new());
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Date the statistics count from.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
