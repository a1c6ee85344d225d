//! Shared helpers for HTTP tests against the in-memory store.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use devhub_api::{app, AppState, MemoryStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn test_app() -> Router {
    app(AppState::new(MemoryStore::new()))
}

/// Parse a response body; empty bodies read as `Null`.
pub async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response).await)
}

pub async fn create_developer(app: &Router, name: &str, email: &str) -> i64 {
    let (status, body) = send(app, "POST", "/developers", Some(json!({"name": name, "email": email}))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

pub fn project_body(developer_id: i64) -> Value {
    json!({
        "name": "Portfolio",
        "description": "Personal website",
        "estimatedTime": "2 weeks",
        "repository": "https://example.com/ana/portfolio",
        "startDate": "2024-01-10",
        "developerId": developer_id
    })
}

pub async fn create_project(app: &Router, developer_id: i64) -> i64 {
    let (status, body) = send(app, "POST", "/projects", Some(project_body(developer_id))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

pub const ACCEPTED: &str =
    "JavaScript, Python, React, Express.js, HTML, CSS, Django, PostgreSQL and MongoDB";
