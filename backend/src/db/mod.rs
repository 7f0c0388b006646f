//! Storage module for class documents.
//!
//! This module provides abstractions for document storage via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, client)                   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Edit request validation                              │
//! │  - Load / match / replace / save                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ File Repository  │     │ Local Repository        │
//! │ (<classId>.json) │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use services::{
    apply_edit, get_document, health_check, list_classes, submit_edit, validate_edit,
};

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{FileRepository, LocalRepository};
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, ScheduleRepository};
