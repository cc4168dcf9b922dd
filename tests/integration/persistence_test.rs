//! Integration tests for the JSON file gateway behind the HTTP API.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{Value, json};

use seathold_storage::providers::JsonFileGateway;

use crate::helpers::TestApp;

fn read_document(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_lock_writes_through_and_keeps_other_collections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.integrated.json");
    std::fs::write(
        &path,
        serde_json::to_string(&json!({
            "buildings": [{ "id": "b1" }],
            "rooms": [{ "id": "r1", "buildingId": "b1" }],
            "seats": [{ "id": 1, "roomId": "r1", "label": "A1", "lockedBy": null }]
        }))
        .unwrap(),
    )
    .unwrap();

    let gateway = JsonFileGateway::new(&path, true).await.unwrap();
    let app = TestApp::with_gateway(Arc::new(gateway)).await;

    let seat = app.lock("1", "U1", 30).await;
    assert_eq!(seat["label"], "A1");
    assert_eq!(seat["roomId"], "r1");

    let stored = read_document(&path);
    assert_eq!(stored["buildings"], json!([{ "id": "b1" }]));
    assert_eq!(stored["rooms"][0]["buildingId"], "b1");
    assert_eq!(stored["seats"][0]["lockedBy"], "U1");
    assert_eq!(stored["seats"][0]["label"], "A1");

    let response = app
        .post("/seats/unlock", json!({ "seatId": 1, "userId": "U1" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let stored = read_document(&path);
    assert!(stored["seats"][0]["lockedBy"].is_null());
    assert_eq!(stored["seats"][0]["status"], "free");
}

#[tokio::test]
async fn test_expired_lease_stays_in_file_until_next_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    let gateway = JsonFileGateway::new(&path, false).await.unwrap();
    let app = TestApp::with_gateway(Arc::new(gateway)).await;

    app.lock("5", "U1", 10).await;
    app.clock.advance_secs(11);

    let listed = app.get("/seats?id=5").await;
    assert!(listed.body[0]["lockedBy"].is_null());
    assert_eq!(read_document(&path)["seats"][0]["lockedBy"], "U1");

    let swept = app.lock_manager.sweep_expired().await.unwrap();
    assert_eq!(swept, 1);
    assert!(read_document(&path)["seats"][0]["lockedBy"].is_null());
}

#[tokio::test]
async fn test_untouched_seats_are_written_back_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let untouched = r#"{"id":2,"roomId":7,"label":"B2"}"#;
    std::fs::write(
        &path,
        format!(r#"{{"seats":[{{"id":1,"roomId":7}},{untouched}]}}"#),
    )
    .unwrap();

    let gateway = JsonFileGateway::new(&path, false).await.unwrap();
    let app = TestApp::with_gateway(Arc::new(gateway)).await;

    let seat = app.lock("1", "U1", 30).await;
    assert_eq!(seat["id"], 1);
    assert_eq!(seat["roomId"], 7);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains(untouched), "seat 2 rewritten: {raw}");

    let stored = read_document(&path);
    assert_eq!(stored["seats"][0]["id"], 1);
    assert_eq!(stored["seats"][0]["roomId"], 7);
    assert_eq!(stored["seats"][0]["lockedBy"], "U1");
}
