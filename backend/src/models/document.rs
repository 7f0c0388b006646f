//! Class documents as persisted on disk.
//!
//! A class document is a single JSON object holding the class display name, a
//! free-text note and the ordered lesson schedule. Fields this crate does not
//! know about are captured in `extra` maps so that rewriting a document after
//! an edit never drops data that other tools put there.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Identifier of a class document (`"403"`, `"410"`, ...).
///
/// The identifier doubles as the file stem of the backing document, so
/// [`ClassId::is_storable`] decides whether it may be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier can name a file inside the data directory.
    ///
    /// Empty names, `.`/`..`, path separators and NUL bytes are rejected.
    pub fn is_storable(&self) -> bool {
        let id = self.0.as_str();
        !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\', '\0'])
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClassId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Optional text field where an explicit `null` reads as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One course's persisted schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    /// Display name, never changed by this crate.
    pub class_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,
    pub schedule: Vec<ScheduleEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One lesson slot of a class document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// `MM/DD` within the semester year.
    pub date: String,
    /// Display label derived from `date` when the document was generated.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub weekday: String,
    pub period: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScheduleEntry {
    pub fn new(
        date: impl Into<String>,
        weekday: impl Into<String>,
        period: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            weekday: weekday.into(),
            period: period.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    pub fn matches(&self, date: &str, period: &str) -> bool {
        self.date == date && self.period == period
    }
}

impl ScheduleDocument {
    pub fn new(class_name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            note: note.into(),
            schedule: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_entry(mut self, entry: ScheduleEntry) -> Self {
        self.schedule.push(entry);
        self
    }

    /// First entry keyed by (`date`, `period`).
    pub fn find_entry(&self, date: &str, period: &str) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|e| e.matches(date, period))
    }

    pub fn find_entry_mut(&mut self, date: &str, period: &str) -> Option<&mut ScheduleEntry> {
        self.schedule.iter_mut().find(|e| e.matches(date, period))
    }

    /// Parse a document from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize as two-space indented JSON, the on-disk layout.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
