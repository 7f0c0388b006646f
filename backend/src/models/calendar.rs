//! Semester calendar settings.
//!
//! Dates are written `MM/DD` like schedule entries and resolved against
//! [`CalendarSettings::year`]. The defaults describe the spring 2026 semester.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Semester calendar as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub year: i32,
    /// First day of week 1.
    pub semester_start: String,
    /// Dates whose entries always count as holidays.
    pub holidays: Vec<String>,
    /// Dates whose entries always count as exams.
    pub exam_dates: Vec<String>,
    /// Exam windows in chronological order. Lessons are counted per segment
    /// between consecutive windows.
    pub exam_windows: Vec<ExamWindow>,
    pub keywords: ContentKeywords,
}

/// Inclusive exam window, both ends `MM/DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamWindow {
    pub start: String,
    pub end: String,
}

/// Substrings that classify lesson content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentKeywords {
    pub holiday: Vec<String>,
    pub exam: Vec<String>,
    pub quiz: Vec<String>,
    pub exercise: Vec<String>,
}

/// Calendar with every date resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub year: i32,
    pub semester_start: NaiveDate,
    pub holidays: Vec<String>,
    pub exam_dates: Vec<String>,
    pub exam_windows: Vec<(NaiveDate, NaiveDate)>,
    pub keywords: ContentKeywords,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            year: 2026,
            semester_start: "02/09".to_string(),
            holidays: strings(&["02/27", "04/03", "04/06", "05/01", "06/19"]),
            exam_dates: strings(&["03/30", "03/31", "05/13", "05/14", "06/26", "06/29"]),
            exam_windows: vec![
                ExamWindow::new("03/30", "03/31"),
                ExamWindow::new("05/13", "05/14"),
                ExamWindow::new("06/26", "06/29"),
            ],
            keywords: ContentKeywords::default(),
        }
    }
}

impl Default for ContentKeywords {
    fn default() -> Self {
        Self {
            holiday: strings(&["放假", "停課", "調課", "連假", "春假", "國定假日", "校慶補假"]),
            exam: strings(&["段考"]),
            quiz: strings(&["小考"]),
            exercise: strings(&["練習"]),
        }
    }
}

impl ExamWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Resolve an `MM/DD` label within `year`.
///
/// Leading zeros and surrounding whitespace are accepted. Out-of-range days
/// yield `None`.
pub fn parse_month_day(year: i32, label: &str) -> Option<NaiveDate> {
    let (month, day) = label.trim().split_once('/')?;
    let month: u32 = month.trim().parse().ok()?;
    let day: u32 = day.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

impl CalendarSettings {
    /// Resolve every configured date, failing on the first invalid one.
    pub fn resolve(&self) -> Result<Calendar, String> {
        let date = |label: &str, what: &str| {
            parse_month_day(self.year, label)
                .ok_or_else(|| format!("Invalid {} date '{}' for year {}", what, label, self.year))
        };

        let semester_start = date(&self.semester_start, "semester_start")?;
        let mut exam_windows = Vec::with_capacity(self.exam_windows.len());
        for window in &self.exam_windows {
            let start = date(&window.start, "exam window start")?;
            let end = date(&window.end, "exam window end")?;
            if end < start {
                return Err(format!(
                    "Exam window {}-{} ends before it starts",
                    window.start, window.end
                ));
            }
            exam_windows.push((start, end));
        }
        for label in self.holidays.iter().chain(&self.exam_dates) {
            date(label, "holiday/exam")?;
        }

        Ok(Calendar {
            year: self.year,
            semester_start,
            holidays: self.holidays.clone(),
            exam_dates: self.exam_dates.clone(),
            exam_windows,
            keywords: self.keywords.clone(),
        })
    }
}
