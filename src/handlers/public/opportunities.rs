use std::collections::HashMap;

use axum::extract::{Extension, Path, Query};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::Opportunity;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::search::{SearchQuery, SearchResults, SearchScope};

/// GET /api/opportunities - public marketplace search
///
/// Accepts keyword, property_type, investment_strategy, min/max_investment,
/// min/max_irr, state, city, status, page and limit as query parameters.
/// Only publicly listed records in the resolved status are returned, featured
/// first, newest first.
pub async fn search_get(
    Extension(state): Extension<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchResults> {
    let results = state.engine.search_query(&SearchScope::Public, &query).await?;
    Ok(ApiResponse::success(results))
}

/// GET /api/opportunities/:id - a single publicly visible opportunity
pub async fn record_get(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Opportunity> {
    let id = Uuid::parse_str(&id).map_err(|_| {
        let field_errors = HashMap::from([("id".to_string(), format!("Expected a UUID, got '{}'", id))]);
        ApiError::validation_error("Invalid opportunity id", Some(field_errors))
    })?;

    match state.engine.find_public(id).await? {
        Some(opportunity) => Ok(ApiResponse::success(opportunity)),
        None => Err(ApiError::not_found("Opportunity not found")),
    }
}
