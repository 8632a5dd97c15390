use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Opportunity;
use crate::database::query_builder::QueryBuilder;
use crate::filter::Filter;

/// Read access to persisted opportunities.
///
/// The search engine only ever talks to this trait, so the same filters
/// run against PostgreSQL in production and against
/// [`MemoryOpportunityStore`](super::memory::MemoryOpportunityStore) in tests
/// and offline tooling.
#[async_trait]
pub trait OpportunityStore: Send + Sync {
    /// Rows matching the filter, ordered and ranged as the filter says.
    async fn select_any(&self, filter: &Filter) -> Result<Vec<Opportunity>, DatabaseError>;

    /// First row matching the filter, if any.
    async fn select_one(&self, filter: &Filter) -> Result<Option<Opportunity>, DatabaseError>;

    /// Number of rows matching the filter's predicates (ordering and range ignored).
    async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError>;

    /// Cheap connectivity check for health reporting.
    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgOpportunityStore {
    pool: PgPool,
}

impl PgOpportunityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OpportunityStore for PgOpportunityStore {
    async fn select_any(&self, filter: &Filter) -> Result<Vec<Opportunity>, DatabaseError> {
        QueryBuilder::<Opportunity>::new(filter.clone())
            .select_all(&self.pool)
            .await
    }

    async fn select_one(&self, filter: &Filter) -> Result<Option<Opportunity>, DatabaseError> {
        let single = filter.clone().range(0, 0)?;
        QueryBuilder::<Opportunity>::new(single)
            .select_optional(&self.pool)
            .await
    }

    async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError> {
        QueryBuilder::<Opportunity>::new(filter.clone())
            .count(&self.pool)
            .await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
