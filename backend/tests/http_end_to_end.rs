//! Server on an ephemeral port driven through the HTTP client.

#![cfg(all(feature = "http-server", feature = "http-client"))]

mod support;

use std::sync::Arc;

use course_schedule::client::{CellEditor, CellState, ClientError, EditMode, Indicator, ScheduleClient};
use course_schedule::db::repositories::FileRepository;
use course_schedule::http::{create_router, AppState};
use course_schedule::models::{CellEdit, ClassId};

use support::{data_dir_with, read_document, CLASS_403};

async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn serve_dir(dir: &std::path::Path) -> ScheduleClient {
    let repo = Arc::new(FileRepository::new(dir));
    let base = spawn_server(AppState::new(repo).unwrap()).await;
    ScheduleClient::new(base).unwrap()
}

#[tokio::test]
async fn test_fetch_and_save_roundtrip() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let client = serve_dir(dir.path()).await;
    let id = ClassId::from("403");

    let doc = client.fetch_document(&id).await.unwrap();
    assert_eq!(doc.schedule[0].content, "上課");

    client
        .save(&CellEdit::new("403", "03/02", "P1", "小考"))
        .await
        .unwrap();

    let doc = client.fetch_document(&id).await.unwrap();
    assert_eq!(doc.schedule[0].content, "小考");
    assert!(read_document(dir.path(), "403").contains("小考"));
}

#[tokio::test]
async fn test_unmatched_edit_reports_success() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let client = serve_dir(dir.path()).await;

    client
        .save(&CellEdit::new("403", "03/02", "P2", "X"))
        .await
        .unwrap();

    let doc = client.fetch_document(&ClassId::from("403")).await.unwrap();
    assert_eq!(doc.schedule[0].content, "上課");
}

#[tokio::test]
async fn test_server_errors_carry_message() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let client = serve_dir(dir.path()).await;

    let err = client
        .save(&CellEdit::new("999", "03/02", "P1", "x"))
        .await
        .unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "class document not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client
        .save(&CellEdit::new("403", "", "P1", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));

    let err = client.fetch_document(&ClassId::from("999")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_cell_editor_through_server() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let client = serve_dir(dir.path()).await;
    let doc = client.fetch_document(&ClassId::from("403")).await.unwrap();

    let mut mode = EditMode::default();
    let mut cell = CellEditor::for_entry(ClassId::from("403"), &doc.schedule[0]);

    // View mode: nothing is sent.
    cell.focus(mode);
    assert!(cell.submit(mode, &client).await.is_none());

    mode = mode.toggled();
    cell.set_mode(mode);
    cell.input(" 段考 ");
    cell.submit(mode, &client).await.unwrap().unwrap();
    assert_eq!(
        cell.state(),
        &CellState::Viewing { indicator: Some(Indicator::Saved) }
    );

    let doc = client.fetch_document(&ClassId::from("403")).await.unwrap();
    assert_eq!(doc.schedule[0].content, "段考");
}

#[tokio::test]
async fn test_cell_editor_failure_keeps_text() {
    let dir = data_dir_with(&[("403", CLASS_403)]);
    let client = serve_dir(dir.path()).await;

    let mut cell = CellEditor::new("404", "03/02", "P1", "");
    cell.set_mode(EditMode::Edit);
    cell.input("小考");
    let result = cell.submit(EditMode::Edit, &client).await.unwrap();

    assert!(result.is_err());
    assert_eq!(
        cell.state(),
        &CellState::EditErrorShown { message: "class document not found".to_string() }
    );
    assert_eq!(cell.text(), "小考");
}

#[tokio::test]
async fn test_serialized_concurrent_edits_all_persist() {
    let json = r#"{"className":"406","note":"","schedule":[
        {"date":"03/02","weekday":"一","period":"P1","content":""},
        {"date":"03/03","weekday":"二","period":"P1","content":""},
        {"date":"03/04","weekday":"三","period":"P1","content":""},
        {"date":"03/05","weekday":"四","period":"P1","content":""}
    ]}"#;
    let dir = data_dir_with(&[("406", json)]);
    let repo = Arc::new(FileRepository::new(dir.path()));
    let base = spawn_server(AppState::new(repo).unwrap().with_edit_locks()).await;
    let client = ScheduleClient::new(base).unwrap();

    let dates = ["03/02", "03/03", "03/04", "03/05"];
    let mut tasks = Vec::new();
    for (i, date) in dates.iter().enumerate() {
        let client = client.clone();
        let edit = CellEdit::new("406", *date, "P1", format!("lesson {}", i));
        tasks.push(tokio::spawn(async move { client.save(&edit).await }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let doc = client.fetch_document(&ClassId::from("406")).await.unwrap();
    for (i, entry) in doc.schedule.iter().enumerate() {
        assert_eq!(entry.content, format!("lesson {}", i));
    }
}

#[tokio::test]
async fn test_list_classes() {
    let dir = data_dir_with(&[("403", CLASS_403), ("401", CLASS_403)]);
    let client = serve_dir(dir.path()).await;
    assert_eq!(
        client.list_classes().await.unwrap(),
        vec![ClassId::from("401"), ClassId::from("403")]
    );
}
