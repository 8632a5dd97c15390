use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{CountFailurePolicy, SearchConfig};
use crate::database::{DatabaseError, Opportunity, OpportunityStore, OPPORTUNITIES_TABLE};
use crate::filter::{Filter, Predicate};
use crate::types::OpportunityStatus;

use super::error::SearchError;
use super::pagination::Pagination;
use super::params::{SearchCriteria, SearchQuery};
use super::predicates::{build_predicates, search_order, SearchScope};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub opportunities: Vec<Opportunity>,
    pub pagination: Pagination,
}

/// Stateless search over an [`OpportunityStore`].
///
/// Each call builds two independent filters from one predicate list: a
/// sorted, ranged page query and an unsorted count query. Both run
/// concurrently and are not transactional, so under concurrent writes the
/// total may disagree with the page.
pub struct SearchEngine {
    store: Arc<dyn OpportunityStore>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn OpportunityStore>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    /// Sorted, ranged query for one page of results.
    pub fn page_filter(scope: &SearchScope, criteria: &SearchCriteria) -> Result<Filter, SearchError> {
        let filter = Filter::new(OPPORTUNITIES_TABLE)?
            .where_all(build_predicates(scope, criteria))
            .order(search_order())
            .range(criteria.page.from(), criteria.page.to())?;
        Ok(filter)
    }

    /// Same predicates as [`page_filter`](Self::page_filter), with no ordering or range.
    pub fn count_filter(scope: &SearchScope, criteria: &SearchCriteria) -> Result<Filter, SearchError> {
        Ok(Filter::new(OPPORTUNITIES_TABLE)?.where_all(build_predicates(scope, criteria)))
    }

    /// Parse raw parameters under the configured policy, then search.
    pub async fn search_query(&self, scope: &SearchScope, query: &SearchQuery) -> Result<SearchResults, SearchError> {
        let criteria = SearchCriteria::parse(query, scope, &self.config)?;
        self.search(scope, &criteria).await
    }

    pub async fn search(&self, scope: &SearchScope, criteria: &SearchCriteria) -> Result<SearchResults, SearchError> {
        let page_filter = Self::page_filter(scope, criteria)?;
        let count_filter = Self::count_filter(scope, criteria)?;

        if self.config.debug_logging {
            tracing::debug!(
                ?scope,
                page = criteria.page.page,
                limit = criteria.page.limit,
                predicates = page_filter.predicates().len(),
                "running opportunity search"
            );
        }

        let (rows, count) = futures::join!(
            self.store.select_any(&page_filter),
            self.store.count(&count_filter)
        );

        let opportunities = rows.map_err(SearchError::Fetch)?;
        let total = self.reconcile_count(count)?;

        Ok(SearchResults {
            opportunities,
            pagination: Pagination::new(criteria.page, total),
        })
    }

    fn reconcile_count(&self, count: Result<i64, DatabaseError>) -> Result<i64, SearchError> {
        match count {
            Ok(total) => Ok(total),
            Err(e) => match self.config.count_failure {
                CountFailurePolicy::Lenient => {
                    tracing::warn!("Opportunity count failed, reporting total as 0: {}", e);
                    Ok(0)
                }
                CountFailurePolicy::Strict => Err(SearchError::Count(e)),
            },
        }
    }

    /// A single opportunity, only if the public may see it.
    pub async fn find_public(&self, id: Uuid) -> Result<Option<Opportunity>, SearchError> {
        let visible_statuses = OpportunityStatus::ALL
            .iter()
            .filter(|s| s.is_publicly_visible())
            .map(|s| Predicate::eq("status", s.as_str()))
            .collect();

        let filter = Filter::new(OPPORTUNITIES_TABLE)?.where_all(vec![
            Predicate::eq("id", id),
            Predicate::eq("public_listing", true),
            Predicate::any(visible_statuses),
        ]);

        self.store.select_one(&filter).await.map_err(SearchError::Fetch)
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamPolicy;
    use crate::database::MemoryOpportunityStore;
    use crate::search::pagination::PageRequest;
    use crate::testing::{FailingStore, OpportunityBuilder};

    fn engine_with(rows: Vec<Opportunity>) -> SearchEngine {
        SearchEngine::new(Arc::new(MemoryOpportunityStore::new(rows)), SearchConfig::default())
    }

    fn criteria(page: i64, limit: i64) -> SearchCriteria {
        SearchCriteria::new(PageRequest::new(page, limit))
    }

    #[test]
    fn page_and_count_filters_share_predicates() {
        let mut c = criteria(2, 5);
        c.keyword = Some("office".into());
        let page = SearchEngine::page_filter(&SearchScope::Public, &c).unwrap();
        let count = SearchEngine::count_filter(&SearchScope::Public, &c).unwrap();

        assert_eq!(page.predicates(), count.predicates());
        assert_eq!(page.row_range().map(|r| (r.from, r.to)), Some((5, 9)));
        assert!(count.row_range().is_none());
        assert!(count.order_data().is_empty());
        assert_eq!(page.order_data(), search_order().as_slice());
    }

    #[tokio::test]
    async fn returns_only_visible_rows_featured_first() {
        let engine = engine_with(vec![
            OpportunityBuilder::new("old plain").created_days_ago(10).build(),
            OpportunityBuilder::new("new plain").created_days_ago(1).build(),
            OpportunityBuilder::new("old featured").featured(true).created_days_ago(20).build(),
            OpportunityBuilder::new("hidden").public(false).build(),
            OpportunityBuilder::new("closed").status("closed").build(),
        ]);

        let results = engine.search(&SearchScope::Public, &criteria(1, 10)).await.unwrap();
        let names: Vec<&str> = results.opportunities.iter().map(|o| o.opportunity_name.as_str()).collect();
        assert_eq!(names, vec!["old featured", "new plain", "old plain"]);
        assert_eq!(results.pagination.total, 3);
        assert_eq!(results.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn twelve_rows_second_page_of_five() {
        let rows = (0..12)
            .map(|i| OpportunityBuilder::new(&format!("opp {}", i)).created_days_ago(i).build())
            .collect();
        let engine = engine_with(rows);

        let results = engine.search(&SearchScope::Public, &criteria(2, 5)).await.unwrap();
        let names: Vec<&str> = results.opportunities.iter().map(|o| o.opportunity_name.as_str()).collect();
        assert_eq!(names, vec!["opp 5", "opp 6", "opp 7", "opp 8", "opp 9"]);
        assert_eq!(results.pagination.total, 12);
        assert_eq!(results.pagination.total_pages, 3);
        assert!(results.pagination.has_next);
        assert!(results.pagination.has_prev);
    }

    #[tokio::test]
    async fn page_failure_is_fatal() {
        let engine = SearchEngine::new(Arc::new(FailingStore::pages()), SearchConfig::default());
        let err = engine.search(&SearchScope::Public, &criteria(1, 10)).await.unwrap_err();
        assert!(matches!(err, SearchError::Fetch(_)));
    }

    #[tokio::test]
    async fn count_failure_follows_policy() {
        let store = Arc::new(FailingStore::counts(vec![OpportunityBuilder::new("only").build()]));

        let lenient = SearchEngine::new(store.clone(), SearchConfig::default());
        let results = lenient.search(&SearchScope::Public, &criteria(1, 10)).await.unwrap();
        assert_eq!(results.opportunities.len(), 1);
        assert_eq!(results.pagination.total, 0);
        assert_eq!(results.pagination.total_pages, 0);

        let strict = SearchEngine::new(
            store,
            SearchConfig {
                count_failure: CountFailurePolicy::Strict,
                ..SearchConfig::default()
            },
        );
        let err = strict.search(&SearchScope::Public, &criteria(1, 10)).await.unwrap_err();
        assert!(matches!(err, SearchError::Count(_)));
    }

    #[tokio::test]
    async fn search_query_applies_param_policy() {
        let engine = engine_with(vec![OpportunityBuilder::new("a").irr(0.1).build()]);
        let query = SearchQuery {
            min_irr: Some("lots".into()),
            ..SearchQuery::default()
        };
        assert!(matches!(
            engine.search_query(&SearchScope::Public, &query).await,
            Err(SearchError::Validation { .. })
        ));

        let lenient = SearchEngine::new(
            Arc::new(MemoryOpportunityStore::new(vec![OpportunityBuilder::new("a").irr(0.1).build()])),
            SearchConfig {
                params: ParamPolicy::Lenient,
                ..SearchConfig::default()
            },
        );
        let results = lenient.search_query(&SearchScope::Public, &query).await.unwrap();
        assert_eq!(results.opportunities.len(), 1);
    }

    #[tokio::test]
    async fn sponsor_scope_sees_only_own_listings() {
        let me = Uuid::new_v4();
        let engine = engine_with(vec![
            OpportunityBuilder::new("mine draft").sponsor(me).status("draft").public(false).build(),
            OpportunityBuilder::new("mine live").sponsor(me).build(),
            OpportunityBuilder::new("theirs").build(),
        ]);

        let results = engine.search(&SearchScope::Sponsor(me), &criteria(1, 20)).await.unwrap();
        assert_eq!(results.pagination.total, 2);
        assert!(results.opportunities.iter().all(|o| o.sponsor_id == me));
    }

    #[tokio::test]
    async fn find_public_hides_private_and_draft_records() {
        let public = OpportunityBuilder::new("public").build();
        let closed = OpportunityBuilder::new("closed").status("closed").build();
        let private = OpportunityBuilder::new("private").public(false).build();
        let draft = OpportunityBuilder::new("draft").status("draft").build();
        let ids = (public.id, closed.id, private.id, draft.id);
        let engine = engine_with(vec![public, closed, private, draft]);

        assert!(engine.find_public(ids.0).await.unwrap().is_some());
        assert!(engine.find_public(ids.1).await.unwrap().is_some());
        assert!(engine.find_public(ids.2).await.unwrap().is_none());
        assert!(engine.find_public(ids.3).await.unwrap().is_none());
        assert!(engine.find_public(Uuid::new_v4()).await.unwrap().is_none());
    }
}
