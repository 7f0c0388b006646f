//! Service configuration file support.
//!
//! Configuration is read from a TOML file with three tables:
//!
//! ```toml
//! [repository]
//! type = "file"
//! data_dir = "data"
//! classes = ["401", "403", "404"]
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! static_dir = "."
//! serialize_edits = false
//!
//! [calendar]
//! year = 2026
//! semester_start = "02/09"
//! ```
//!
//! Every field has a default, so an absent file yields a working setup.
//! `HOST`, `PORT`, `DATA_DIR`, `STATIC_DIR` and `REPOSITORY_TYPE` override the
//! file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::db::factory::RepositoryType;
use crate::db::repository::RepositoryError;
use crate::models::{CalendarSettings, ClassId};

/// File name searched for by [`ServiceConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "course-schedule.toml";

/// Full service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub calendar: CalendarSettings,
}

/// Repository settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Class registry in display order. Empty means every stored document.
    #[serde(default)]
    pub classes: Vec<String>,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for every path the API does not handle.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// Serialize load-edit-save sequences per class.
    #[serde(default)]
    pub serialize_edits: bool,
}

fn default_repo_type() -> String {
    "file".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
            data_dir: default_data_dir(),
            classes: Vec::new(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            serialize_edits: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ServiceConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find the configuration file in the standard locations:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_default_location() -> Option<PathBuf> {
        [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load configuration from the default location.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let path = Self::find_default_location().ok_or_else(|| {
            RepositoryError::configuration(format!(
                "No {} found in standard locations",
                CONFIG_FILE_NAME
            ))
        })?;
        Self::from_file(path)
    }

    /// Load from `path` if given, otherwise from the default location, falling
    /// back to built-in defaults when no file exists. Environment overrides are
    /// applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, RepositoryError> {
        let path = path.map(Path::to_path_buf).or_else(Self::find_default_location);
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                log::info!("No {} found; using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `DATA_DIR`, `STATIC_DIR` and `REPOSITORY_TYPE`.
    pub fn apply_env_overrides(&mut self) -> Result<(), RepositoryError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), RepositoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                RepositoryError::configuration(format!("PORT must be a valid port number, got '{}'", port))
            })?;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.repository.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }
        if let Some(repo_type) = lookup("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        Ok(())
    }

    /// Check the repository type and the calendar dates.
    pub fn validate(&self) -> Result<(), RepositoryError> {
        self.repository_type()
            .map_err(|e| RepositoryError::configuration(format!("Invalid repository type: {}", e)))?;
        self.calendar
            .resolve()
            .map_err(|e| RepositoryError::configuration(format!("Invalid calendar: {}", e)))?;
        Ok(())
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Configured class registry.
    pub fn classes(&self) -> Vec<ClassId> {
        self.repository.classes.iter().map(ClassId::new).collect()
    }

    /// `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
