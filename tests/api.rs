//! End-to-end tests against the full router.

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};

use http_body_util::BodyExt;

use serde_json::{Value, json};

use tempfile::TempDir;

use tower::ServiceExt;

use account_board::{app::AppState, routes, store::RecordStore};

/// A router over a store in its own temp directory.
struct Harness {
    router: Router,
    path: PathBuf,
    _dir: TempDir,
}

impl Harness {
    async fn new() -> Harness {
        Harness::with_contents(None).await
    }

    async fn with_contents(contents: Option<&str>) -> Harness {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("accounts.json");

        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }

        let store = RecordStore::open(&path).await.unwrap();

        Harness {
            router: routes::router(AppState { store }),
            path,
            _dir: dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        (status, body.to_vec())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let (status, body) = self.send(request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn file(&self) -> Vec<u8> {
        std::fs::read(&self.path).unwrap()
    }

    /// Puts a directory where the backing file was, so every write fails.
    fn break_store(&self) {
        std::fs::remove_file(&self.path).unwrap();
        std::fs::create_dir(&self.path).unwrap();
    }
}

#[tokio::test]
async fn liveness() {
    let harness = Harness::new().await;

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = harness.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, routes::LIVENESS.as_bytes());
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let harness = Harness::new().await;

    let (status, body) = harness.get("/api/accounts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_replaces_existing_account() {
    let harness = Harness::new().await;

    let (status, body) = harness
        .post("/api/update", json!({ "username": "metal", "balance": 100 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Account updated successfully" })
    );

    harness
        .post("/api/update", json!({ "username": "knux", "balance": 5 }))
        .await;
    harness
        .post("/api/update", json!({ "username": "metal", "balance": 250 }))
        .await;

    let (_, body) = harness.get("/api/accounts").await;
    let records = body.as_array().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["username"], "metal");
    assert_eq!(records[0]["balance"], 250);
    assert_eq!(records[1]["username"], "knux");
}

#[tokio::test]
async fn update_applies_defaults() {
    let harness = Harness::new().await;

    harness
        .post("/api/update", json!({ "username": "metal" }))
        .await;

    let (status, account) = harness.get("/api/accounts/metal").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(account["kind"], "account");
    assert_eq!(account["balance"], json!(0));
    assert_eq!(account["status"], "Offline");
    assert_eq!(account["game"], "Unknown");
    assert_eq!(account["server"], "N/A");
    assert!(account["lastUpdated"].is_string());
}

#[tokio::test]
async fn update_defaults_empty_values() {
    let harness = Harness::new().await;

    harness
        .post(
            "/api/update",
            json!({ "username": "metal", "status": "", "game": "", "server": "" }),
        )
        .await;

    let (_, account) = harness.get("/api/accounts/metal").await;

    assert_eq!(account["status"], "Offline");
    assert_eq!(account["game"], "Unknown");
    assert_eq!(account["server"], "N/A");
}

#[tokio::test]
async fn update_ignores_client_timestamp() {
    let harness = Harness::new().await;

    harness
        .post(
            "/api/update",
            json!({ "username": "metal", "lastUpdated": "1999-01-01T00:00:00Z" }),
        )
        .await;

    let (_, account) = harness.get("/api/accounts/metal").await;

    assert_ne!(account["lastUpdated"], "1999-01-01T00:00:00Z");
}

#[tokio::test]
async fn update_without_username_is_rejected() {
    let harness = Harness::new().await;
    harness
        .post("/api/update", json!({ "username": "metal" }))
        .await;

    let before = harness.file();

    let (status, body) = harness.post("/api/update", json!({ "balance": 9 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = harness.post("/api/update", json!({ "username": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert_eq!(harness.file(), before);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let harness = Harness::new().await;
    let before = harness.file();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/update")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ \"username\": "))
        .unwrap();
    let (status, body) = harness.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].is_string());
    assert_eq!(harness.file(), before);
}

#[tokio::test]
async fn stat_submissions_accumulate() {
    let harness = Harness::new().await;

    let (status, body) = harness
        .post(
            "/api/accounts",
            json!({ "userId": "42", "username": "metal", "kills": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Stats submitted successfully");
    assert_eq!(body["data"]["kills"], 3);
    assert_eq!(body["data"]["deaths"], 0);

    harness
        .post(
            "/api/accounts",
            json!({ "userId": "42", "username": "metal", "kills": 8 }),
        )
        .await;

    let (_, body) = harness.get("/api/accounts").await;
    let records = body.as_array().unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record["kind"] == "stat"));
    assert_eq!(records[0]["kills"], 3);
    assert_eq!(records[1]["kills"], 8);
}

#[tokio::test]
async fn stat_without_user_id_is_rejected() {
    let harness = Harness::new().await;
    let before = harness.file();

    let (status, body) = harness
        .post("/api/accounts", json!({ "username": "metal" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(harness.file(), before);
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let harness = Harness::new().await;

    let (status, body) = harness.get("/api/accounts/nobody").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Account not found" }));
}

#[tokio::test]
async fn lookup_prefers_account_over_stats() {
    let harness = Harness::new().await;

    harness
        .post(
            "/api/accounts",
            json!({ "userId": "42", "username": "metal", "kills": 3 }),
        )
        .await;
    harness
        .post("/api/update", json!({ "username": "metal", "status": "Online" }))
        .await;

    let (status, body) = harness.get("/api/accounts/metal").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "account");
    assert_eq!(body["status"], "Online");
}

#[tokio::test]
async fn corrupt_store_reads_empty() {
    let harness = Harness::with_contents(Some("this is not json")).await;

    let (status, body) = harness.get("/api/accounts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // still serving
    let (status, _) = harness.get("/api/accounts/metal").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn legacy_store_is_readable() {
    let legacy = json!([
        {
            "username": "metal",
            "balance": 40,
            "status": "Online",
            "game": "Ring Racers",
            "server": "eu-1",
            "lastUpdated": "2024-05-01T12:00:00.000Z"
        }
    ]);
    let harness = Harness::with_contents(Some(legacy.to_string().as_str())).await;

    let (status, body) = harness.get("/api/accounts/metal").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "account");
    assert_eq!(body["server"], "eu-1");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let harness = Harness::new().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/accounts")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = harness.router.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn update_keeps_unrecognized_records() {
    let stored = json!([
        {
            "kind": "account",
            "username": "metal",
            "balance": 40,
            "status": "Online",
            "game": "Ring Racers",
            "server": "eu-1",
            "lastUpdated": "2024-05-01T12:00:00Z"
        },
        {
            "username": "knux",
            "balance": "5",
            "status": "Online",
            "game": "Ring Racers",
            "server": "us-2",
            "lastUpdated": "2024-05-01T12:00:00.000Z"
        }
    ]);
    let harness = Harness::with_contents(Some(stored.to_string().as_str())).await;

    let (status, body) = harness.get("/api/accounts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, stored);

    let (status, _) = harness.post("/api/update", json!({ "username": "amy" })).await;
    assert_eq!(status, StatusCode::OK);

    let on_disk: Value = serde_json::from_slice(&harness.file()).unwrap();
    let records = on_disk.as_array().unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0], stored[0]);
    assert_eq!(records[1], stored[1]);
    assert_eq!(records[2]["username"], "amy");
}

#[tokio::test]
async fn update_write_failure_is_500() {
    let harness = Harness::new().await;
    harness.break_store();

    let (status, body) = harness
        .post("/api/update", json!({ "username": "metal" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to update account" }));
}

#[tokio::test]
async fn stat_write_failure_is_500() {
    let harness = Harness::new().await;
    harness.break_store();

    let (status, body) = harness
        .post(
            "/api/accounts",
            json!({ "userId": "42", "username": "metal" }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to save stats" }));
}

#[tokio::test]
async fn api_responses_are_not_cached() {
    let harness = Harness::new().await;

    let request = Request::builder()
        .uri("/api/accounts")
        .body(Body::empty())
        .unwrap();
    let response = harness.router.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    assert_eq!(
        response
            .headers()
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .unwrap(),
        "nosniff"
    );
}
