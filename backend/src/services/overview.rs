//! Read-only views over class documents: a single-class summary and the
//! weekly matrix across every class.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{classify, parse_entry_date, term_stats, week_start_label, week_number, ContentType, TermStats};
use crate::db::repository::{RepositoryResult, ScheduleRepository};
use crate::models::{Calendar, ClassId, ScheduleDocument, ScheduleEntry};

/// An entry annotated with its semester week and content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    pub date: String,
    pub weekday: String,
    pub period: String,
    pub content: String,
    /// `None` when the date does not parse.
    pub week: Option<i64>,
    pub content_type: ContentType,
    /// Normal lesson already behind `today`.
    pub past: bool,
}

/// One class with annotated entries and lesson counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub class_id: ClassId,
    pub class_name: String,
    pub note: String,
    pub entries: Vec<EntryView>,
    pub stats: TermStats,
}

/// One row of the weekly matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRow {
    pub week: i64,
    /// `M/D` of the first day of the week.
    pub week_start: String,
    /// Entries per class; classes with nothing that week are absent.
    pub classes: BTreeMap<ClassId, Vec<EntryView>>,
}

/// Weekly matrix across classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    /// Column order.
    pub classes: Vec<ClassId>,
    pub stats: BTreeMap<ClassId, TermStats>,
    /// Every week from the first populated one to the last, gaps included.
    pub weeks: Vec<WeekRow>,
}

fn entry_view(entry: &ScheduleEntry, calendar: &Calendar, today: NaiveDate) -> EntryView {
    let date = parse_entry_date(calendar, &entry.date);
    let content_type = classify(&entry.content, &entry.date, calendar);
    EntryView {
        date: entry.date.clone(),
        weekday: entry.weekday.clone(),
        period: entry.period.clone(),
        content: entry.content.clone(),
        week: date.map(|d| week_number(d, calendar.semester_start)),
        content_type,
        past: content_type == ContentType::Normal && date.is_some_and(|d| d < today),
    }
}

/// Summarize an already loaded document.
pub fn summarize(
    class_id: &ClassId,
    document: &ScheduleDocument,
    calendar: &Calendar,
    today: NaiveDate,
) -> ClassSummary {
    ClassSummary {
        class_id: class_id.clone(),
        class_name: document.class_name.clone(),
        note: document.note.clone(),
        entries: document
            .schedule
            .iter()
            .map(|entry| entry_view(entry, calendar, today))
            .collect(),
        stats: term_stats(&document.schedule, calendar, today),
    }
}

/// Load one class and summarize it.
pub async fn class_summary<R: ScheduleRepository + ?Sized>(
    repo: &R,
    class_id: &ClassId,
    calendar: &Calendar,
    today: NaiveDate,
) -> RepositoryResult<ClassSummary> {
    let document = repo.load(class_id).await?;
    Ok(summarize(class_id, &document, calendar, today))
}

/// Build the weekly matrix for `classes`. Fails if any class fails to load.
pub async fn overview<R: ScheduleRepository + ?Sized>(
    repo: &R,
    classes: &[ClassId],
    calendar: &Calendar,
    today: NaiveDate,
) -> RepositoryResult<Overview> {
    let mut stats = BTreeMap::new();
    let mut by_week: BTreeMap<i64, BTreeMap<ClassId, Vec<EntryView>>> = BTreeMap::new();

    for class_id in classes {
        let summary = class_summary(repo, class_id, calendar, today).await?;
        for entry in summary.entries {
            let Some(week) = entry.week.filter(|w| *w > 0) else {
                continue;
            };
            by_week
                .entry(week)
                .or_default()
                .entry(class_id.clone())
                .or_default()
                .push(entry);
        }
        stats.insert(class_id.clone(), summary.stats);
    }

    let weeks = match (by_week.keys().next().copied(), by_week.keys().last().copied()) {
        (Some(first), Some(last)) => (first..=last)
            .map(|week| WeekRow {
                week,
                week_start: week_start_label(calendar.semester_start, week),
                classes: by_week.remove(&week).unwrap_or_default(),
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Overview {
        classes: classes.to_vec(),
        stats,
        weeks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::RepositoryError;
    use crate::models::CalendarSettings;

    fn calendar() -> Calendar {
        CalendarSettings::default().resolve().unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    fn repo() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.insert_document(
            ClassId::from("401"),
            &ScheduleDocument::new("401", "physics")
                .with_entry(ScheduleEntry::new("02/10", "二", "P1", "上課"))
                .with_entry(ScheduleEntry::new("03/03", "二", "P1", "小考")),
        );
        repo.insert_document(
            ClassId::from("403"),
            &ScheduleDocument::new("403", "")
                .with_entry(ScheduleEntry::new("02/02", "一", "P2", "預備週"))
                .with_entry(ScheduleEntry::new("02/11", "三", "P2", ""))
                .with_entry(ScheduleEntry::new("03/11", "三", "P2", "練習")),
        );
        repo
    }

    #[tokio::test]
    async fn test_class_summary() {
        let summary = class_summary(&repo(), &ClassId::from("401"), &calendar(), today())
            .await
            .unwrap();
        assert_eq!(summary.class_name, "401");
        assert_eq!(summary.note, "physics");
        assert_eq!(summary.entries[0].week, Some(1));
        assert!(summary.entries[0].past);
        assert_eq!(summary.entries[1].week, Some(4));
        assert_eq!(summary.entries[1].content_type, ContentType::Quiz);
        assert!(!summary.entries[1].past);
        assert_eq!(summary.stats.segments[0].total, 2);
        assert_eq!(summary.stats.segments[0].remaining, 0);
    }

    #[tokio::test]
    async fn test_overview_weeks_and_gaps() {
        let classes = [ClassId::from("401"), ClassId::from("403")];
        let view = overview(&repo(), &classes, &calendar(), today()).await.unwrap();

        let weeks: Vec<i64> = view.weeks.iter().map(|w| w.week).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4, 5]);
        assert_eq!(view.weeks[0].week_start, "2/9");
        assert_eq!(view.weeks[0].classes.len(), 2);
        assert!(view.weeks[1].classes.is_empty());
        assert_eq!(view.weeks[4].classes[&ClassId::from("403")][0].content, "練習");
        assert_eq!(view.stats.len(), 2);
        assert_eq!(view.classes, classes.to_vec());
    }

    #[tokio::test]
    async fn test_overview_missing_class_fails() {
        let classes = [ClassId::from("401"), ClassId::from("999")];
        let err = overview(&repo(), &classes, &calendar(), today()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_overview_empty() {
        let view = overview(&LocalRepository::new(), &[], &calendar(), today())
            .await
            .unwrap();
        assert!(view.weeks.is_empty());
    }
}
