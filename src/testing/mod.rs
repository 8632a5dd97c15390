use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::database::{Address, DatabaseError, MemoryOpportunityStore, Opportunity, OpportunityStore};
use crate::filter::Filter;

/// Fixed reference time so orderings in tests are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Builds public, active opportunities with overridable fields
pub struct OpportunityBuilder {
    inner: Opportunity,
}

impl OpportunityBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            inner: Opportunity {
                id: Uuid::new_v4(),
                sponsor_id: Uuid::new_v4(),
                opportunity_name: name.to_string(),
                opportunity_description: None,
                business_plan: None,
                value_creation_strategy: None,
                property_type: Some("office".to_string()),
                investment_strategy: Some("core".to_string()),
                status: "active".to_string(),
                address: None,
                total_project_cost: None,
                equity_requirement: None,
                minimum_investment: None,
                maximum_investment: None,
                target_raise_amount: None,
                projected_irr: None,
                projected_equity_multiple: None,
                cash_on_cash_return: None,
                hold_period_years: None,
                public_listing: true,
                featured_listing: false,
                accredited_only: false,
                created_at: base_time(),
                updated_at: base_time(),
            },
        }
    }

    pub fn sponsor(mut self, sponsor_id: Uuid) -> Self {
        self.inner.sponsor_id = sponsor_id;
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.inner.status = status.to_string();
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.inner.public_listing = public;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.inner.featured_listing = featured;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.inner.opportunity_description = Some(description.to_string());
        self
    }

    pub fn business_plan(mut self, plan: &str) -> Self {
        self.inner.business_plan = Some(plan.to_string());
        self
    }

    pub fn value_creation_strategy(mut self, strategy: &str) -> Self {
        self.inner.value_creation_strategy = Some(strategy.to_string());
        self
    }

    pub fn property_type(mut self, property_type: &str) -> Self {
        self.inner.property_type = Some(property_type.to_string());
        self
    }

    pub fn irr(mut self, irr: f64) -> Self {
        self.inner.projected_irr = Some(irr);
        self
    }

    pub fn minimum_investment(mut self, amount: f64) -> Self {
        self.inner.minimum_investment = Some(amount);
        self
    }

    pub fn city(mut self, city: &str, state: &str) -> Self {
        self.inner.address = Some(Json(Address {
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            ..Address::default()
        }));
        self
    }

    pub fn created_days_ago(mut self, days: i64) -> Self {
        self.inner.created_at = base_time() - Duration::days(days);
        self.inner.updated_at = self.inner.created_at;
        self
    }

    pub fn build(self) -> Opportunity {
        self.inner
    }
}

/// Store whose page or count queries always fail.
pub struct FailingStore {
    rows: MemoryOpportunityStore,
    fail_pages: bool,
    fail_counts: bool,
}

impl FailingStore {
    /// Every read fails.
    pub fn pages() -> Self {
        Self {
            rows: MemoryOpportunityStore::default(),
            fail_pages: true,
            fail_counts: true,
        }
    }

    /// Page reads succeed from `rows`; counts fail.
    pub fn counts(rows: Vec<Opportunity>) -> Self {
        Self {
            rows: MemoryOpportunityStore::new(rows),
            fail_pages: false,
            fail_counts: true,
        }
    }

    fn outage() -> DatabaseError {
        DatabaseError::ConnectionError("connection refused".to_string())
    }
}

#[async_trait]
impl OpportunityStore for FailingStore {
    async fn select_any(&self, filter: &Filter) -> Result<Vec<Opportunity>, DatabaseError> {
        if self.fail_pages {
            return Err(Self::outage());
        }
        self.rows.select_any(filter).await
    }

    async fn select_one(&self, filter: &Filter) -> Result<Option<Opportunity>, DatabaseError> {
        if self.fail_pages {
            return Err(Self::outage());
        }
        self.rows.select_one(filter).await
    }

    async fn count(&self, filter: &Filter) -> Result<i64, DatabaseError> {
        if self.fail_counts {
            return Err(Self::outage());
        }
        self.rows.count(filter).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(Self::outage())
    }
}
