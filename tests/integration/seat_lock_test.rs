//! Integration tests for seat locking over HTTP.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_lock_conflict_then_takeover_after_expiry() {
    let app = TestApp::new().await;

    let seat = app.lock("5", "U1", 10).await;
    assert_eq!(seat["id"], "5");
    assert_eq!(seat["lockedBy"], "U1");
    assert_eq!(seat["status"], "locked");
    let locked_at = seat["lockedAt"].as_i64().unwrap();
    assert_eq!(seat["holdUntil"].as_i64().unwrap(), locked_at + 10_000);

    app.clock.advance_secs(4);
    let response = app
        .post(
            "/seats/lock",
            json!({ "seatId": 5, "userId": "U2", "ttlSeconds": 10 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert_eq!(response.body["message"], "Seat already locked");
    assert_eq!(response.body["details"]["holder"], "U1");
    assert_eq!(response.body["details"]["remaining_seconds"], 6);

    app.clock.advance_secs(7);
    let seat = app.lock("5", "U2", 10).await;
    assert_eq!(seat["lockedBy"], "U2");
}

#[tokio::test]
async fn test_lock_requires_seat_and_user() {
    let app = TestApp::new().await;

    let response = app.post("/seats/lock", json!({ "seatId": "1" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(response.body["message"], "userId is required");

    let response = app
        .post("/seats/lock", json!({ "seatId": "", "userId": "U1" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.post("/seats/unlock", json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let app = TestApp::new().await;

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/seats/lock")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), req)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_id_alias_and_room() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/seats/lock",
            json!({ "seatId": 3, "roomId": "r1", "ownerId": "U1" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["roomId"], "r1");
    let locked_at = response.body["lockedAt"].as_i64().unwrap();
    let default_ttl = app.config.lease.default_ttl_seconds as i64;
    assert_eq!(
        response.body["holdUntil"].as_i64().unwrap(),
        locked_at + default_ttl * 1000
    );
}

#[tokio::test]
async fn test_refresh_by_other_owner_conflicts() {
    let app = TestApp::new().await;
    app.lock("7", "U1", 60).await;

    let response = app
        .post("/seats/refresh", json!({ "seatId": "7", "userId": "U2" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["reason"], "not_owner");
}

#[tokio::test]
async fn test_refresh_extends_from_now() {
    let app = TestApp::new().await;
    let first = app.lock("7", "U1", 60).await;

    app.clock.advance_secs(45);
    let response = app
        .post(
            "/seats/refresh",
            json!({ "seatId": "7", "userId": "U1", "ttlSeconds": 60 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["lockedAt"], first["lockedAt"]);
    assert_eq!(
        response.body["holdUntil"].as_i64().unwrap(),
        first["lockedAt"].as_i64().unwrap() + 105_000
    );
}

#[tokio::test]
async fn test_refresh_reasons() {
    let app = TestApp::new().await;

    let response = app
        .post("/seats/refresh", json!({ "seatId": "9", "userId": "U1" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["reason"], "not_locked");

    app.lock("9", "U1", 10).await;
    app.clock.advance_secs(15);
    let response = app
        .post("/seats/refresh", json!({ "seatId": "9", "userId": "U1" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["details"]["reason"], "expired");
    assert_eq!(response.body["message"], "Lock expired");
}

#[tokio::test]
async fn test_unlock_unknown_seat_succeeds() {
    let app = TestApp::new().await;

    let response = app
        .post("/seats/unlock", json!({ "seatId": 42, "userId": "anyone" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "ok": true }));

    let seats = app.get("/seats").await;
    assert_eq!(seats.body, json!([]));
}

#[tokio::test]
async fn test_unlock_foreign_lock_is_forbidden() {
    let app = TestApp::new().await;
    app.lock("1", "U1", 30).await;

    let response = app
        .post("/seats/unlock", json!({ "seatId": "1", "userId": "U2" }))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");

    let response = app
        .post("/seats/unlock", json!({ "seatId": "1", "userId": "U1" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let seats = app.get("/seats?id=1").await;
    assert_eq!(seats.body[0]["status"], "free");
    assert!(seats.body[0]["lockedBy"].is_null());
    assert!(seats.body[0]["holdUntil"].is_null());
    assert!(seats.body[0]["lockedAt"].is_number());
}

#[tokio::test]
async fn test_seat_listing_filters_and_hides_lapsed_leases() {
    let app = TestApp::new().await;
    for (seat, room, ttl) in [("1", "r1", 10), ("2", "r1", 60), ("3", "r2", 60)] {
        let response = app
            .post(
                "/seats/lock",
                json!({ "seatId": seat, "roomId": room, "userId": "U1", "ttlSeconds": ttl }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    app.clock.advance_secs(20);

    let room = app.get("/seats?roomId=r1").await;
    assert_eq!(room.status, StatusCode::OK);
    let seats = room.body.as_array().unwrap();
    assert_eq!(seats.len(), 2);
    assert!(seats[0]["lockedBy"].is_null());
    assert_eq!(seats[0]["status"], "free");
    assert_eq!(seats[1]["lockedBy"], "U1");

    let one = app.get("/seats?id=3").await;
    assert_eq!(one.body.as_array().unwrap().len(), 1);

    let all = app.get("/seats?roomId=").await;
    assert_eq!(all.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_lock_ttl_is_clamped_and_truncated() {
    let app = TestApp::new().await;

    for (seat, ttl, held_ms) in [
        ("t1", json!(-5), 10_000),
        ("t2", json!("30.7"), 30_000),
        ("t3", json!(0), 120_000),
    ] {
        let response = app
            .post(
                "/seats/lock",
                json!({ "seatId": seat, "userId": "U1", "ttlSeconds": ttl }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.body["holdUntil"].as_i64().unwrap() - response.body["lockedAt"].as_i64().unwrap(),
            held_ms,
            "ttl {ttl}"
        );
    }
}
