#![allow(dead_code)]

use std::sync::Once;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use parley_api::auth::{generate_jwt, Claims};
use parley_api::database::DatabaseManager;

pub const TEST_SECRET: &str = "integration-test-secret";

static INIT: Once = Once::new();

/// Pin the settings every test binary relies on. Must run before anything
/// touches the config singleton, so every test calls it first.
pub fn init() {
    INIT.call_once(|| {
        let _ = dotenvy::dotenv();
        std::env::set_var("JSON_WEB_TOKEN", TEST_SECRET);
        std::env::set_var("DATABASE_CONNECTION_TIMEOUT", "3");
        std::env::set_var("API_ENABLE_REQUEST_LOGGING", "false");
    });
}

pub fn app() -> Router {
    init();
    parley_api::app()
}

pub fn token_for(memberid: i32, email: &str) -> Result<String> {
    init();
    Ok(generate_jwt(&Claims::new(memberid, email))?)
}

/// True when DATABASE_URL points at a reachable Postgres; migrations are applied on the way
pub async fn database_ready() -> bool {
    init();
    if let Err(e) = DatabaseManager::health_check().await {
        eprintln!("skipping database-backed test: {}", e);
        return false;
    }
    match DatabaseManager::migrate().await {
        Ok(()) => true,
        Err(e) => {
            eprintln!("skipping database-backed test, migrations failed: {}", e);
            false
        }
    }
}

pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

/// Send one request through a fresh router
pub async fn call(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<Reply> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("x-access-token", token);
    }

    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    send(request).await
}

pub async fn send(request: Request<Body>) -> Result<Reply> {
    let response = app().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok(Reply { status, body })
}

/// Assert an error reply carries the expected status and message
pub fn assert_error(reply: &Reply, status: StatusCode, message: &str) {
    assert_eq!(reply.status, status, "unexpected status, body: {}", reply.body);
    assert_eq!(reply.body["success"], false, "body: {}", reply.body);
    assert_eq!(reply.body["message"], message, "body: {}", reply.body);
}
