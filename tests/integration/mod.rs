//! Integration tests for the item service.
//!
//! These drive the full router in-process, the same way a client would over
//! HTTP, and check the item lifecycle end to end.
//! Run with: cargo test --test integration

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use item_store::api::{create_router, AppState};
use item_store::config::Config;
use item_store::store::ItemStore;

/// Build a router over a freshly seeded store.
fn test_app() -> Router {
    create_router(AppState::new(
        ItemStore::with_sample_items(),
        Config::default(),
    ))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Create, read, patch, delete, then confirm the item is gone.
#[tokio::test]
async fn test_item_lifecycle() {
    let app = test_app();

    let (status, initial) = call(&app, Method::GET, "/api/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(initial["count"], 3);

    let (status, created) =
        call(&app, Method::POST, "/api/items", Some(json!({"name": "X"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["id"], 4);
    assert_eq!(created["data"]["description"], "");

    let (status, fetched) = call(&app, Method::GET, "/api/items/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);

    let (status, updated) = call(
        &app,
        Method::PUT,
        "/api/items/4",
        Some(json!({"description": "d"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["name"], "X");
    assert_eq!(updated["data"]["description"], "d");
    assert!(updated["data"]["updatedAt"].is_string());
    assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);

    let (status, deleted) = call(&app, Method::DELETE, "/api/items/4", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"]["id"], 4);

    let (status, missing) = call(&app, Method::GET, "/api/items/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({"success": false, "error": "Item not found"}));

    let (_, last) = call(&app, Method::GET, "/api/items", None).await;
    assert_eq!(last["count"], initial["count"]);
}

/// A deleted maximum id is not handed out again.
#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let app = test_app();

    let (_, first) = call(&app, Method::POST, "/api/items", Some(json!({"name": "a"}))).await;
    assert_eq!(first["data"]["id"], 4);

    let (status, _) = call(&app, Method::DELETE, "/api/items/4", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, second) = call(&app, Method::POST, "/api/items", Some(json!({"name": "b"}))).await;
    assert_eq!(second["data"]["id"], 5);
}

/// Health and info report the same environment and version.
#[tokio::test]
async fn test_diagnostics_are_consistent() {
    let config = Config {
        node_env: "staging".to_string(),
        app_version: "2.3.4".to_string(),
        ..Config::default()
    };
    let app = create_router(AppState::new(ItemStore::new(), config));

    let (health_status, health) = call(&app, Method::GET, "/health", None).await;
    let (info_status, info) = call(&app, Method::GET, "/api/info", None).await;

    assert_eq!(health_status, StatusCode::OK);
    assert_eq!(info_status, StatusCode::OK);
    assert_eq!(health["environment"], "staging");
    assert_eq!(health["environment"], info["environment"]);
    assert_eq!(health["version"], "2.3.4");
    assert_eq!(health["version"], info["version"]);
}

/// Repeated health checks stay healthy.
#[tokio::test]
async fn test_health_is_stable() {
    let app = test_app();

    for _ in 0..5 {
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}

/// Many simultaneous creates over HTTP never collide.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates() {
    let app = test_app();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                call(&app, Method::POST, "/api/items", Some(json!({"name": format!("n{i}")}))).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        ids.push(body["data"]["id"].as_u64().unwrap());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 32);
    assert_eq!(ids.first(), Some(&4));
    assert_eq!(ids.last(), Some(&35));

    let (_, list) = call(&app, Method::GET, "/api/items", None).await;
    assert_eq!(list["count"], 35);
}

/// An empty store starts numbering at one.
#[tokio::test]
async fn test_empty_store_starts_at_one() {
    let app = create_router(AppState::new(ItemStore::new(), Config::default()));

    let (status, list) = call(&app, Method::GET, "/api/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!({"success": true, "count": 0, "data": []}));

    let (_, created) = call(&app, Method::POST, "/api/items", Some(json!({"name": "only"}))).await;
    assert_eq!(created["data"]["id"], 1);
}
