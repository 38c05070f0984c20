//! HTTP API tests driven through the router with `oneshot`

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use column_scout::api::{create_router, AppState};
use column_scout::config::FetcherConfig;
use column_scout::query::QueryService;
use column_scout::store::{MemoryBackend, Store};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

/// Helper: router over an in-memory store with an offline fetcher
fn create_test_app() -> (Router, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = Arc::new(Store::load(backend.clone()).expect("Failed to load store"));
    let config = FetcherConfig {
        offline: true,
        max_jitter_ms: 0,
        ..FetcherConfig::default()
    };
    let queries = QueryService::from_config(&config, store).expect("Failed to build service");
    (create_router(AppState::new(queries), None), backend)
}

/// Helper: send one request and decode the JSON body (Null when empty)
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_list_names_on_fresh_store() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([""]));

    // Idempotent read
    let (_, again) = send(&app, Method::GET, "/api/", None).await;
    assert_eq!(again, body);
}

#[tokio::test]
async fn test_run_query_returns_fragment_and_urls() {
    let (app, backend) = create_test_app();
    let url = "http://sfbay.example.org/search/bik?query=fixie";

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/",
        Some(json!({ "searchURL": url, "columnIndex": 1, "setIndex": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let response = body["response"].as_str().unwrap();
    assert!(response.starts_with("<ul>"));
    assert!(response.contains(r#"<li class="result-row" data-pid="6744258112">"#));
    assert_eq!(body["urls"], json!([null, url]));

    let reloaded = Store::load(backend).unwrap();
    assert_eq!(reloaded.urls(0).unwrap(), vec![None, Some(url.to_string())]);
}

#[tokio::test]
async fn test_run_query_into_next_set_creates_it() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/",
        Some(json!({ "searchURL": "http://a.example/", "columnIndex": 0, "setIndex": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["urls"], json!(["http://a.example/"]));

    let (_, names) = send(&app, Method::GET, "/api/", None).await;
    assert_eq!(names, json!(["", ""]));
}

#[tokio::test]
async fn test_run_query_with_bad_indices() {
    let (app, _) = create_test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/",
        Some(json!({ "searchURL": "http://a.example/", "columnIndex": 0, "setIndex": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("set index 7"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/",
        Some(json!({ "searchURL": "http://a.example/", "columnIndex": -1, "setIndex": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_url_set_auto_create_boundary() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::GET, "/api/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "urls": [] }));

    let (status, body) = send(&app, Method::GET, "/api/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "urls": [] }));

    let (status, _) = send(&app, Method::GET, "/api/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, names) = send(&app, Method::GET, "/api/", None).await;
    assert_eq!(names, json!(["", ""]));
}

#[tokio::test]
async fn test_rename_returns_all_names() {
    let (app, _) = create_test_app();
    send(&app, Method::GET, "/api/1", None).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/1",
        Some(json!({ "setIndex": 0, "name": "Bikes" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!(["", "Bikes"]));

    let (status, _) = send(&app, Method::POST, "/api/5", Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_compacts_columns() {
    let (app, _) = create_test_app();
    for (column, url) in ["http://a.example/", "http://b.example/", "http://c.example/"]
        .iter()
        .enumerate()
    {
        send(
            &app,
            Method::POST,
            "/api/",
            Some(json!({ "searchURL": url, "columnIndex": column, "setIndex": 0 })),
        )
        .await;
    }

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/",
        Some(json!({ "setIndex": 0, "columnIndex": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "urls": ["http://a.example/", "http://c.example/"] }));

    let (status, _) = send(
        &app,
        Method::DELETE,
        "/api/",
        Some(json!({ "setIndex": 0, "columnIndex": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_appends_unset_column() {
    let (app, _) = create_test_app();

    let (status, body) = send(&app, Method::PUT, "/api/", Some(json!({ "setIndex": 0 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "urls": [null] }));

    let (status, _) = send(&app, Method::PUT, "/api/", Some(json!({ "setIndex": 4 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let (app, _) = create_test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let (status, _) = send(&app, Method::GET, "/api/abc", None).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_static_files_are_served_when_configured() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>columns</h1>").unwrap();
    std::fs::create_dir(dir.path().join("images")).unwrap();
    std::fs::write(dir.path().join("images/logo.txt"), "logo").unwrap();

    let config = FetcherConfig {
        offline: true,
        max_jitter_ms: 0,
        ..FetcherConfig::default()
    };
    let queries = QueryService::from_config(&config, Arc::new(Store::in_memory())).unwrap();
    let app = create_router(AppState::new(queries), Some(dir.path()));

    for (uri, expected) in [("/static/index.html", "<h1>columns</h1>"), ("/images/logo.txt", "logo")] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], expected.as_bytes());
    }
}
