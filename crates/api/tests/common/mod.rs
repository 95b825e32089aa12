#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use listings_api::config::{LogFormat, ServerConfig};
use listings_api::router::build_app_router;
use listings_api::state::AppState;
use listings_core::clock::FixedClock;
use sqlx::PgPool;
use tower::ServiceExt;

/// The date every test app treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: LogFormat::Pretty,
    }
}

/// Build the production router over `pool`, with the clock pinned to [`today`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_on(pool, today())
}

pub fn build_test_app_on(pool: PgPool, today: NaiveDate) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        clock: Arc::new(FixedClock(today)),
    };
    build_app_router(state, &config)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(json.to_string())).await
}

/// POST a raw body, for requests that are not valid JSON.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    send(app, Method::POST, uri, Some(body.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(json.to_string())).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
