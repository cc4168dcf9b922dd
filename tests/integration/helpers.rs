//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use seathold_api::{AppState, build_app};
use seathold_core::config::AppConfig;
use seathold_core::traits::ManualClock;
use seathold_lock::{LockManager, SeatStore};
use seathold_storage::DocumentGateway;
use seathold_storage::providers::MemoryGateway;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock driving lease expiry
    pub clock: ManualClock,
    /// Lock manager behind the router
    pub lock_manager: Arc<LockManager>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application backed by an empty in-memory document
    pub async fn new() -> Self {
        Self::with_gateway(Arc::new(MemoryGateway::new())).await
    }

    /// Create a test application backed by an arbitrary gateway
    pub async fn with_gateway(gateway: Arc<dyn DocumentGateway>) -> Self {
        let config = AppConfig::default();
        let clock = ManualClock::default();

        let store = Arc::new(
            SeatStore::open(gateway)
                .await
                .expect("Failed to open seat store"),
        );
        let lock_manager = Arc::new(LockManager::new(
            store,
            Arc::new(clock.clone()),
            config.lease.clone(),
        ));

        let state = AppState::new(Arc::new(config.clone()), Arc::clone(&lock_manager));

        Self {
            router: build_app(state),
            clock,
            lock_manager,
            config,
        }
    }

    /// POST a JSON body
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// GET a path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Lock `seat` for `user` and assert it succeeded
    pub async fn lock(&self, seat: &str, user: &str, ttl: u64) -> Value {
        let response = self
            .post(
                "/seats/lock",
                serde_json::json!({ "seatId": seat, "userId": user, "ttlSeconds": ttl }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Lock failed: {:?}",
            response.body
        );
        response.body
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        let body = match body {
            Some(b) => {
                req = req.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&b).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };

        let req = req.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
