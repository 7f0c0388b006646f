//! Edit lifecycle of a single schedule cell.
//!
//! ```text
//! Viewing ──(edit mode on / focus)──▶ Editing ──(blur)──▶ Submitting
//!    ▲                                                     │      │
//!    │◀──────────── ok, indicator Saved ───────────────────┘      │
//!    │                                                            ▼
//!    └──────── dismiss, indicator Failed ◀──────────── EditErrorShown
//! ```
//!
//! The displayed text is always what the user typed, whatever the save
//! outcome. Nothing is retried; the user edits again to retry.

use crate::models::{CellEdit, ClassId, ScheduleEntry};

/// Whether cells accept edits. Held by the caller and passed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    View,
    Edit,
}

impl EditMode {
    pub fn is_editing(self) -> bool {
        self == EditMode::Edit
    }

    pub fn toggled(self) -> Self {
        match self {
            EditMode::View => EditMode::Edit,
            EditMode::Edit => EditMode::View,
        }
    }
}

/// Transient marker shown after a submission settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Saved,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    Viewing { indicator: Option<Indicator> },
    Editing,
    Submitting,
    EditErrorShown { message: String },
}

/// One editable (`date`, `period`) cell of a class.
#[derive(Debug, Clone)]
pub struct CellEditor {
    class_id: ClassId,
    date: String,
    period: String,
    text: String,
    state: CellState,
}

impl CellEditor {
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
            text: content.into(),
            state: CellState::Viewing { indicator: None },
        }
    }

    /// Cell for a loaded entry.
    pub fn for_entry(class_id: ClassId, entry: &ScheduleEntry) -> Self {
        Self::new(class_id, &entry.date, &entry.period, &entry.content)
    }

    pub fn state(&self) -> &CellState {
        &self.state
    }

    /// Text currently displayed in the cell.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    /// Apply an edit mode change.
    ///
    /// Turning edit mode on opens a viewing cell; turning it off closes an
    /// open cell without submitting. A submission in flight is unaffected.
    pub fn set_mode(&mut self, mode: EditMode) {
        let next = match (&self.state, mode) {
            (CellState::Viewing { .. }, EditMode::Edit) => CellState::Editing,
            (CellState::Editing, EditMode::View) => CellState::Viewing { indicator: None },
            _ => return,
        };
        self.state = next;
    }

    /// Focus the cell. Only opens it in edit mode.
    pub fn focus(&mut self, mode: EditMode) {
        if mode.is_editing() && matches!(self.state, CellState::Viewing { .. }) {
            self.state = CellState::Editing;
        }
    }

    /// Replace the typed text. Ignored unless the cell is open.
    pub fn input(&mut self, text: impl Into<String>) -> bool {
        if self.state != CellState::Editing {
            return false;
        }
        self.text = text.into();
        true
    }

    /// Leave the cell. In edit mode the trimmed text becomes the submitted
    /// edit and the cell moves to `Submitting`.
    pub fn blur(&mut self, mode: EditMode) -> Option<CellEdit> {
        if !mode.is_editing() || self.state != CellState::Editing {
            return None;
        }
        self.text = self.text.trim().to_string();
        self.state = CellState::Submitting;
        Some(CellEdit::new(
            self.class_id.clone(),
            self.date.clone(),
            self.period.clone(),
            self.text.clone(),
        ))
    }

    /// Settle a submission with the save outcome.
    pub fn finish(&mut self, outcome: Result<(), String>) {
        if self.state != CellState::Submitting {
            return;
        }
        self.state = match outcome {
            Ok(()) => CellState::Viewing {
                indicator: Some(Indicator::Saved),
            },
            Err(message) => CellState::EditErrorShown { message },
        };
    }

    /// Close the failure message, leaving the `Failed` marker.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, CellState::EditErrorShown { .. }) {
            self.state = CellState::Viewing {
                indicator: Some(Indicator::Failed),
            };
        }
    }

    /// Drop an expired `Saved`/`Failed` marker.
    pub fn clear_indicator(&mut self) {
        if let CellState::Viewing { indicator } = &mut self.state {
            *indicator = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> CellEditor {
        CellEditor::new("403", "03/02", "P1", "上課")
    }

    #[test]
    fn test_view_mode_never_submits() {
        let mut cell = cell();
        cell.focus(EditMode::View);
        assert_eq!(cell.state(), &CellState::Viewing { indicator: None });
        assert!(!cell.input("x"));
        assert!(cell.blur(EditMode::View).is_none());
        assert_eq!(cell.text(), "上課");
    }

    #[test]
    fn test_successful_edit_cycle() {
        let mut cell = cell();
        cell.set_mode(EditMode::Edit);
        assert_eq!(cell.state(), &CellState::Editing);
        assert!(cell.input("  小考 \n"));

        let edit = cell.blur(EditMode::Edit).unwrap();
        assert_eq!(edit, CellEdit::new("403", "03/02", "P1", "小考"));
        assert_eq!(cell.state(), &CellState::Submitting);

        cell.finish(Ok(()));
        assert_eq!(
            cell.state(),
            &CellState::Viewing { indicator: Some(Indicator::Saved) }
        );
        cell.clear_indicator();
        assert_eq!(cell.state(), &CellState::Viewing { indicator: None });
        assert_eq!(cell.text(), "小考");
    }

    #[test]
    fn test_failed_edit_keeps_typed_text() {
        let mut cell = cell();
        cell.focus(EditMode::Edit);
        cell.input("段考");
        cell.blur(EditMode::Edit).unwrap();
        cell.finish(Err("class document not found".into()));

        assert_eq!(
            cell.state(),
            &CellState::EditErrorShown { message: "class document not found".into() }
        );
        cell.dismiss_error();
        assert_eq!(
            cell.state(),
            &CellState::Viewing { indicator: Some(Indicator::Failed) }
        );
        assert_eq!(cell.text(), "段考");

        // Retrying means editing again.
        cell.focus(EditMode::Edit);
        assert_eq!(cell.state(), &CellState::Editing);
    }

    #[test]
    fn test_leaving_edit_mode_closes_without_submit() {
        let mut cell = cell();
        cell.set_mode(EditMode::Edit);
        cell.input("draft");
        cell.set_mode(EditMode::View);
        assert_eq!(cell.state(), &CellState::Viewing { indicator: None });
        assert!(cell.blur(EditMode::View).is_none());
    }

    #[test]
    fn test_submission_ignores_mode_and_input() {
        let mut cell = cell();
        cell.set_mode(EditMode::Edit);
        cell.blur(EditMode::Edit).unwrap();
        cell.set_mode(EditMode::View);
        assert!(!cell.input("late"));
        assert_eq!(cell.state(), &CellState::Submitting);
        assert!(cell.blur(EditMode::Edit).is_none());
    }

    #[test]
    fn test_mode_toggle() {
        assert_eq!(EditMode::default(), EditMode::View);
        assert!(EditMode::View.toggled().is_editing());
        assert!(!EditMode::Edit.toggled().is_editing());
    }
}
