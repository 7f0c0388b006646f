//! Client side of the edit flow.
//!
//! - `cell`: per-cell edit lifecycle driven by an explicit [`EditMode`]
//! - `remote`: HTTP client for the document reads and `POST /save`
//!
//! The edit mode only gates what the client offers; the server accepts edits
//! from any caller.

pub mod cell;

#[cfg(feature = "http-client")]
pub mod remote;

pub use cell::{CellEditor, CellState, EditMode, Indicator};

#[cfg(feature = "http-client")]
pub use remote::{ClientError, ScheduleClient};
