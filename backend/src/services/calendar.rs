//! Lesson classification and per-term counts.
//!
//! Pure functions over a resolved [`Calendar`]. `today` is always passed in so
//! results do not depend on the wall clock.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{parse_month_day, Calendar, ScheduleEntry};

/// Kind of lesson an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// No content yet.
    Empty,
    Holiday,
    Exam,
    Quiz,
    Exercise,
    Normal,
}

impl ContentType {
    /// Whether an entry of this kind counts as a lesson in [`term_stats`].
    pub fn is_lesson(self) -> bool {
        !matches!(self, ContentType::Holiday | ContentType::Exam)
    }
}

/// Lesson counts for one segment between exams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Lessons on or after `today`.
    pub remaining: u32,
    pub total: u32,
}

/// Lesson counts per segment; segment `i` ends at exam window `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStats {
    pub segments: Vec<SegmentStats>,
}

/// Resolve an entry's `MM/DD` date in the calendar year.
pub fn parse_entry_date(calendar: &Calendar, date: &str) -> Option<NaiveDate> {
    parse_month_day(calendar.year, date)
}

/// Classify lesson content.
///
/// Fixed holiday and exam dates take precedence over the text; keywords are
/// checked in the order holiday, exam, quiz, exercise.
pub fn classify(content: &str, date: &str, calendar: &Calendar) -> ContentType {
    if content.is_empty() {
        return ContentType::Empty;
    }
    if calendar.holidays.iter().any(|d| d == date) {
        return ContentType::Holiday;
    }
    if calendar.exam_dates.iter().any(|d| d == date) {
        return ContentType::Exam;
    }

    let keywords = &calendar.keywords;
    let contains_any = |words: &[String]| words.iter().any(|w| content.contains(w.as_str()));
    if contains_any(&keywords.holiday) {
        ContentType::Holiday
    } else if contains_any(&keywords.exam) {
        ContentType::Exam
    } else if contains_any(&keywords.quiz) {
        ContentType::Quiz
    } else if contains_any(&keywords.exercise) {
        ContentType::Exercise
    } else {
        ContentType::Normal
    }
}

/// Semester week of `date`; week 1 starts on `semester_start`.
///
/// Dates before the semester give zero or negative weeks.
pub fn week_number(date: NaiveDate, semester_start: NaiveDate) -> i64 {
    (date - semester_start).num_days().div_euclid(7) + 1
}

/// `M/D` label of the first day of `week`.
pub fn week_start_label(semester_start: NaiveDate, week: i64) -> String {
    let start = semester_start + Duration::days((week - 1) * 7);
    format!("{}/{}", start.month(), start.day())
}

/// Index of the segment `date` falls in, if any.
///
/// Segment 0 is everything before the first exam window; segment `i` lies
/// strictly between the end of window `i - 1` and the start of window `i`.
fn segment_of(date: NaiveDate, calendar: &Calendar) -> Option<usize> {
    let mut previous_end: Option<NaiveDate> = None;
    for (index, (start, end)) in calendar.exam_windows.iter().enumerate() {
        let after_previous = previous_end.map_or(true, |prev| date > prev);
        if after_previous && date < *start {
            return Some(index);
        }
        previous_end = Some(*end);
    }
    None
}

/// Count lessons per segment, skipping holidays, exams and undated entries.
pub fn term_stats(schedule: &[ScheduleEntry], calendar: &Calendar, today: NaiveDate) -> TermStats {
    let mut segments = vec![SegmentStats::default(); calendar.exam_windows.len()];

    for entry in schedule {
        let Some(date) = parse_entry_date(calendar, &entry.date) else {
            continue;
        };
        if !classify(&entry.content, &entry.date, calendar).is_lesson() {
            continue;
        }
        if let Some(index) = segment_of(date, calendar) {
            let segment = &mut segments[index];
            segment.total += 1;
            if date >= today {
                segment.remaining += 1;
            }
        }
    }

    TermStats { segments }
}
