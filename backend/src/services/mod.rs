//! Service layer built on top of the repository.
//!
//! - `calendar`: lesson classification and per-term counts
//! - `overview`: single-class summary and weekly matrix views
//! - `edit_locks`: optional per-class serialization of edits

pub mod calendar;
pub mod edit_locks;
pub mod overview;

pub use calendar::{classify, term_stats, week_number, ContentType, SegmentStats, TermStats};
pub use edit_locks::{EditGuard, EditLocks};
pub use overview::{class_summary, overview, ClassSummary, EntryView, Overview, WeekRow};
