//! Helpers shared by the REST handler tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`

use super::router;
use crate::storage::DbConnection;
use crate::AppState;

/// Router over a fresh in-memory database, without the `/api` prefix
pub async fn setup_test_app() -> Router {
    let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
    router().with_state(AppState::new(db))
}

/// Send one request and decode the JSON body (`Null` when the body is not JSON)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn create_ledger(app: &Router, name: &str) -> String {
    let (status, body) = send(app, Method::POST, "/ledgers", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_kid(app: &Router, ledger_id: &str, name: &str) -> i64 {
    let uri = format!("/ledgers/{}/kids", ledger_id);
    let (status, body) =
        send(app, Method::POST, &uri, Some(json!({ "name": name, "emoji": "🙂" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

pub async fn create_account(
    app: &Router,
    ledger_id: &str,
    kid_id: i64,
    name: &str,
    balance: f64,
) -> i64 {
    let uri = format!("/ledgers/{}/kids/{}/accounts", ledger_id, kid_id);
    let (status, body) =
        send(app, Method::POST, &uri, Some(json!({ "name": name, "balance": balance }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}
