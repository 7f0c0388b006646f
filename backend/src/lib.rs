//! # Course Schedule
//!
//! Storage and single-cell editing of per-class course schedules.
//!
//! Each class keeps its schedule in one JSON document (`<classId>.json`)
//! holding a class name, a note, and an ordered list of entries keyed by
//! (`date`, `period`). The only mutation is replacing the content of one
//! entry; documents are read back whole.
//!
//! ## Architecture
//!
//! - [`models`]: documents, edit requests and the semester calendar
//! - [`db`]: repository trait, file and in-memory stores, edit services
//! - [`services`]: lesson classification, summaries, overview, edit locks
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: axum server exposing `POST /save` and the read endpoints
//! - [`client`]: cell edit lifecycle and the HTTP client

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
