use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Extension, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;
use crate::search::SearchEngine;

/// Shared per-process state, injected into every request as an extension
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    pub fn new(engine: SearchEngine, security: SecurityConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            security: Arc::new(security),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.security);

    Router::new()
        .merge(public_routes())
        .merge(sponsor_routes())
        // Global middleware
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use handlers::public::{opportunities, system};

    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/api/opportunities", get(opportunities::search_get))
        .route("/api/opportunities/:id", get(opportunities::record_get))
}

fn sponsor_routes() -> Router {
    use handlers::protected::sponsor;

    Router::new()
        .route("/api/sponsor/opportunities", get(sponsor::opportunities_get))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    // AllowOrigin::list panics on a wildcard entry
    if security.cors_origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}
