//! Edit flow against the file-backed store.

mod support;

use course_schedule::db::repositories::FileRepository;
use course_schedule::db::repository::{RepositoryError, ScheduleRepository};
use course_schedule::db::{apply_edit, list_classes, submit_edit};
use course_schedule::models::{CellEdit, ClassId, EditOutcome, EditRequest};
use serde_json::Value;

use support::{data_dir_with, file_names, read_document, write_document, CLASS_403};

#[tokio::test]
async fn test_edit_matching_entry_403() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let repo = FileRepository::new(dir.path());

    let outcome = apply_edit(&repo, &CellEdit::new("403", "03/02", "P1", "小考"))
        .await
        .unwrap();
    assert_eq!(outcome, EditOutcome::Updated);

    let doc = repo.load(&ClassId::from("403")).await.unwrap();
    let entry = &doc.schedule[0];
    assert_eq!(entry.content, "小考");
    assert_eq!(entry.date, "03/02");
    assert_eq!(entry.weekday, "一");
    assert_eq!(entry.period, "P1");
}

#[tokio::test]
async fn test_edit_unmatched_period_403() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let repo = FileRepository::new(dir.path());

    let outcome = apply_edit(&repo, &CellEdit::new("403", "03/02", "P2", "X"))
        .await
        .unwrap();
    assert_eq!(outcome, EditOutcome::EntryNotMatched);

    let doc = repo.load(&ClassId::from("403")).await.unwrap();
    assert_eq!(doc.schedule.len(), 1);
    assert_eq!(doc.schedule[0].content, "上課");
}

#[tokio::test]
async fn test_written_file_is_pretty_and_keeps_unknown_fields() {
    let dir = data_dir_with(&[(
        "407",
        r#"{"className":"407","note":"n","teacher":"Lin","schedule":[{"date":"02/10","weekday":"二","period":"P2","content":"","room":"Lab"}]}"#,
    )]);
    let repo = FileRepository::new(dir.path());

    apply_edit(&repo, &CellEdit::new("407", "02/10", "P2", "練習"))
        .await
        .unwrap();

    let text = read_document(dir.path(), "407");
    assert!(text.contains('\n'));
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["teacher"], "Lin");
    assert_eq!(value["schedule"][0]["room"], "Lab");
    assert_eq!(value["schedule"][0]["content"], "練習");
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["className", "note", "schedule", "teacher"]);
}

#[tokio::test]
async fn test_no_temp_files_left_behind() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let repo = FileRepository::new(dir.path());

    for content in ["a", "b", "c"] {
        apply_edit(&repo, &CellEdit::new("403", "03/02", "P1", content))
            .await
            .unwrap();
    }
    assert_eq!(file_names(dir.path()), vec!["403.json"]);
}

#[tokio::test]
async fn test_missing_and_corrupt_documents() {
    let dir = data_dir_with(&[("405", "{\"className\": \"405\", \"schedule\": [")]);
    let repo = FileRepository::new(dir.path());

    let err = apply_edit(&repo, &CellEdit::new("999", "03/02", "P1", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
    assert!(!dir.path().join("999.json").exists());

    let err = apply_edit(&repo, &CellEdit::new("405", "03/02", "P1", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::CorruptDocument { .. }));
    assert_eq!(
        read_document(dir.path(), "405"),
        "{\"className\": \"405\", \"schedule\": ["
    );
}

#[tokio::test]
async fn test_path_like_class_ids_never_escape_data_dir() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    std::fs::create_dir(&data).unwrap();
    write_document(root.path(), "secret", CLASS_403);
    let repo = FileRepository::new(&data);

    for id in ["../secret", "..", "a/b", "a\\b", ""] {
        let err = apply_edit(&repo, &CellEdit::new(id, "03/02", "P1", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }), "{:?}", id);
    }
    assert_eq!(read_document(root.path(), "secret"), CLASS_403);
}

#[tokio::test]
async fn test_missing_fields_rejected_before_io() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let repo = FileRepository::new(dir.path());

    let mut request = EditRequest::new("403", "03/02", "", "x");
    request.class_id = None;
    let err = submit_edit(&repo, request).await.unwrap_err();
    match err {
        RepositoryError::ValidationError { message, .. } => {
            assert_eq!(message, "missing required fields: classId, period");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(read_document(dir.path(), "403"), CLASS_403);
}

#[tokio::test]
async fn test_list_classes_from_directory() {
    let dir = data_dir_with(&[("410", CLASS_403), ("403", CLASS_403)]);
    std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
    std::fs::write(dir.path().join(".403.abc.tmp"), "x").unwrap();
    let repo = FileRepository::new(dir.path());

    let ids = list_classes(&repo, &[]).await.unwrap();
    assert_eq!(ids, vec![ClassId::from("403"), ClassId::from("410")]);

    let configured = [ClassId::from("410")];
    assert_eq!(list_classes(&repo, &configured).await.unwrap(), configured.to_vec());
}

#[tokio::test]
async fn test_health_check_needs_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FileRepository::new(dir.path()).health_check().await.unwrap());
    assert!(!FileRepository::new(dir.path().join("nope"))
        .health_check()
        .await
        .unwrap());
}
