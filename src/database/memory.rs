use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Opportunity, OPPORTUNITIES_TABLE};
use crate::database::repository::OpportunityStore;
use crate::filter::Filter;

/// In-process opportunity store that evaluates filters directly on rows.
#[derive(Clone, Default)]
pub struct MemoryOpportunityStore {
    rows: Arc<RwLock<Vec<Opportunity>>>,
}

impl MemoryOpportunityStore {
    pub fn new(rows: Vec<Opportunity>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    pub async fn insert(&self, opportunity: Opportunity) {
        self.rows.write().await.push(opportunity);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check_table(filter: &Filter) -> Result<(), DatabaseError> {
        if filter.table_name() != OPPORTUNITIES_TABLE {
            return Err(DatabaseError::QueryError(format!(
                "relation \"{}\" does not exist",
                filter.table_name()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl OpportunityStore for MemoryOpportunityStore {
    async fn select_any(&self, filter: &Filter) -> Result<Vec<Opportunity>, DatabaseError> {
        Self::check_table(filter)?;
        let rows = self.rows.read().await;
        Ok(filter.apply(rows.as_slice()))
    }

    async fn select_one(&self, filter: &Filter) -> Result<Option<Opportunity>, DatabaseError> {
        Self::check_table(filter)?;
        let single = filter.clone().range(0, 0)?;
        let rows = self.rows.read().await;
        Ok(single.apply(rows.as_slice()).into_iter().next())
    }

    async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError> {
        Self::check_table(filter)?;
        let rows = self.rows.read().await;
        Ok(filter.count_matching(rows.as_slice()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
