#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use opportunity_api::auth::{generate_jwt, Claims};
use opportunity_api::config::{SearchConfig, SecurityConfig};
use opportunity_api::database::{MemoryOpportunityStore, Opportunity, OpportunityStore};
use opportunity_api::search::SearchEngine;
use opportunity_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn security() -> SecurityConfig {
    SecurityConfig {
        cors_origins: vec!["*".to_string()],
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiry_hours: 1,
    }
}

/// Router over an in-memory store seeded with `rows`
pub fn app_with(rows: Vec<Opportunity>) -> Router {
    app_with_store(Arc::new(MemoryOpportunityStore::new(rows)), SearchConfig::default())
}

pub fn app_with_store(store: Arc<dyn OpportunityStore>, search: SearchConfig) -> Router {
    app(AppState::new(SearchEngine::new(store, search), security()))
}

pub fn sponsor_token(sponsor_id: Uuid) -> String {
    generate_jwt(&Claims::sponsor(sponsor_id, 1), &security()).expect("token")
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}

pub async fn get_with_token(app: &Router, uri: &str, token: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())?;
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

/// Names of the returned opportunities, in response order
pub fn names(body: &Value) -> Vec<String> {
    body["opportunities"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r["opportunity_name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
