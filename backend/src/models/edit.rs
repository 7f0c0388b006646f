//! Single-cell edit requests.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::document::ClassId;

/// Edit request as received from a client.
///
/// Every field is optional on the wire so that a missing key can be reported
/// as a bad request instead of a deserialization failure. Numbers and booleans
/// are accepted in place of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub class_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub period: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

/// An edit whose identifying keys are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub class_id: ClassId,
    pub date: String,
    pub period: String,
    pub content: String,
}

/// What an applied edit did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Updated,
    /// No entry carried the requested (`date`, `period`); the document was
    /// written back unchanged.
    EntryNotMatched,
}

impl EditRequest {
    pub fn new(
        class_id: impl Into<String>,
        date: impl Into<String>,
        period: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            class_id: Some(class_id.into()),
            date: Some(date.into()),
            period: Some(period.into()),
            content: Some(content.into()),
        }
    }

    /// Names of the required keys that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("classId", &self.class_id),
            ("date", &self.date),
            ("period", &self.period),
        ] {
            if value.as_deref().map_or(true, str::is_empty) {
                missing.push(name);
            }
        }
        missing
    }

    /// Check the required keys and produce a [`CellEdit`].
    ///
    /// Returns the missing key names on failure. An absent `content` is an
    /// empty edit.
    pub fn validate(self) -> Result<CellEdit, Vec<&'static str>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(CellEdit {
            class_id: ClassId::new(self.class_id.unwrap_or_default()),
            date: self.date.unwrap_or_default(),
            period: self.period.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
        })
    }
}

impl CellEdit {
    pub fn new(
        class_id: impl Into<ClassId>,
        date: impl Into<String>,
        period: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            date: date.into(),
            period: period.into(),
            content: content.into(),
        }
    }
}

impl From<CellEdit> for EditRequest {
    fn from(edit: CellEdit) -> Self {
        Self {
            class_id: Some(edit.class_id.to_string()),
            date: Some(edit.date),
            period: Some(edit.period),
            content: Some(edit.content),
        }
    }
}
