//! Repository implementations module.
//!
//! This module contains the implementations of the `ScheduleRepository` trait:
//! - `file`: one JSON document per class in a data directory
//! - `local`: In-memory implementation for unit testing and local development
pub mod file;
pub mod local;

pub use file::FileRepository;
pub use local::LocalRepository;
