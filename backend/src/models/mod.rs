//! Data model: class documents, edit requests and the semester calendar.

pub mod calendar;
pub mod document;
pub mod edit;

pub use calendar::{parse_month_day, Calendar, CalendarSettings, ContentKeywords, ExamWindow};
pub use document::{ClassId, ScheduleDocument, ScheduleEntry};
pub use edit::{CellEdit, EditOutcome, EditRequest};
