use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::{validate_jwt, Claims, SPONSOR_ROLE};
use crate::error::ApiError;

/// Authenticated sponsor context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthSponsor {
    pub sponsor_id: Uuid,
}

impl From<Claims> for AuthSponsor {
    fn from(claims: Claims) -> Self {
        Self {
            sponsor_id: claims.sub,
        }
    }
}

/// JWT authentication middleware that validates tokens and injects [`AuthSponsor`]
pub async fn jwt_auth_middleware(headers: HeaderMap, mut request: Request, next: Next) -> Response {
    match authenticate(&headers, &request) {
        Ok(sponsor) => {
            request.extensions_mut().insert(sponsor);
            next.run(request).await
        }
        Err(api_error) => api_error.into_response(),
    }
}

fn authenticate(headers: &HeaderMap, request: &Request) -> Result<AuthSponsor, ApiError> {
    let state = request
        .extensions()
        .get::<AppState>()
        .ok_or_else(|| ApiError::internal_server_error("Application state missing"))?;

    let token = extract_jwt_from_headers(headers).map_err(ApiError::unauthorized)?;
    let claims = validate_jwt(&token, &state.security).map_err(|e| {
        tracing::debug!("Rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    if claims.role != SPONSOR_ROLE {
        return Err(ApiError::unauthorized("Sponsor account required"));
    }

    Ok(AuthSponsor::from(claims))
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
