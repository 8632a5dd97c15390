use axum::extract::{Extension, Query};

use crate::app::AppState;
use crate::middleware::{ApiResponse, ApiResult, AuthSponsor};
use crate::search::{SearchQuery, SearchResults, SearchScope};

/// GET /api/sponsor/opportunities - the calling sponsor's own listings
///
/// Same filters as the public search, but restricted to the sponsor's records
/// regardless of listing visibility. `status` filters only when supplied.
pub async fn opportunities_get(
    Extension(state): Extension<AppState>,
    Extension(sponsor): Extension<AuthSponsor>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchResults> {
    let scope = SearchScope::Sponsor(sponsor.sponsor_id);
    let results = state.engine.search_query(&scope, &query).await?;
    Ok(ApiResponse::success(results))
}
