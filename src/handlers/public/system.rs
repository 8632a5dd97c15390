use axum::{extract::Extension, http::StatusCode};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::middleware::ApiResponse;

/// GET / - service description
pub async fn root() -> ApiResponse<Value> {
    let version = env!("CARGO_PKG_VERSION");

    ApiResponse::success(json!({
        "name": "Opportunity API",
        "version": version,
        "description": "Search and listing API for commercial real-estate investment opportunities",
        "endpoints": {
            "health": "/health (public)",
            "search": "/api/opportunities (public)",
            "detail": "/api/opportunities/:id (public)",
            "sponsor": "/api/sponsor/opportunities (sponsor token)",
        }
    }))
}

/// GET /health - store connectivity
pub async fn health(Extension(state): Extension<AppState>) -> ApiResponse<Value> {
    let now = chrono::Utc::now();

    match state.engine.ping().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiResponse::with_status(
                json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
