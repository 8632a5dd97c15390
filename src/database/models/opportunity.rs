use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::filter::{FieldSource, FieldValue};

pub const OPPORTUNITIES_TABLE: &str = "opportunities";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Opportunity {
    pub id: Uuid,
    pub sponsor_id: Uuid,
    pub opportunity_name: String,
    pub opportunity_description: Option<String>,
    pub business_plan: Option<String>,
    pub value_creation_strategy: Option<String>,
    pub property_type: Option<String>,
    pub investment_strategy: Option<String>,
    pub status: String,
    pub address: Option<Json<Address>>,
    pub total_project_cost: Option<f64>,
    pub equity_requirement: Option<f64>,
    pub minimum_investment: Option<f64>,
    pub maximum_investment: Option<f64>,
    pub target_raise_amount: Option<f64>,
    pub projected_irr: Option<f64>,
    pub projected_equity_multiple: Option<f64>,
    pub cash_on_cash_return: Option<f64>,
    pub hold_period_years: Option<f64>,
    #[serde(default)]
    pub public_listing: bool,
    #[serde(default)]
    pub featured_listing: bool,
    #[serde(default)]
    pub accredited_only: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FieldSource for Opportunity {
    fn field(&self, column: &str) -> FieldValue {
        match column {
            "id" => self.id.into(),
            "sponsor_id" => self.sponsor_id.into(),
            "opportunity_name" => (&self.opportunity_name).into(),
            "opportunity_description" => self.opportunity_description.as_ref().into(),
            "business_plan" => self.business_plan.as_ref().into(),
            "value_creation_strategy" => self.value_creation_strategy.as_ref().into(),
            "property_type" => self.property_type.as_ref().into(),
            "investment_strategy" => self.investment_strategy.as_ref().into(),
            "status" => (&self.status).into(),
            "address" => match &self.address {
                Some(Json(address)) => serde_json::to_value(address)
                    .map(FieldValue::Json)
                    .unwrap_or(FieldValue::Null),
                None => FieldValue::Null,
            },
            "total_project_cost" => self.total_project_cost.into(),
            "equity_requirement" => self.equity_requirement.into(),
            "minimum_investment" => self.minimum_investment.into(),
            "maximum_investment" => self.maximum_investment.into(),
            "target_raise_amount" => self.target_raise_amount.into(),
            "projected_irr" => self.projected_irr.into(),
            "projected_equity_multiple" => self.projected_equity_multiple.into(),
            "cash_on_cash_return" => self.cash_on_cash_return.into(),
            "hold_period_years" => self.hold_period_years.into(),
            "public_listing" => self.public_listing.into(),
            "featured_listing" => self.featured_listing.into(),
            "accredited_only" => self.accredited_only.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Opportunity {
        serde_json::from_value(json!({
            "id": "6f1c2d9e-8c51-4c0f-9a38-1f7f0d8b7a11",
            "sponsor_id": "0b6c1f0e-3a7e-4a55-8f3a-5d7f8f2b9c01",
            "opportunity_name": "Riverside Flex Park",
            "opportunity_description": null,
            "business_plan": "Lease-up of vacant suites",
            "value_creation_strategy": null,
            "property_type": "industrial",
            "investment_strategy": "value_add",
            "status": "active",
            "address": { "street": "1 River Rd", "city": "Boise", "state": "ID", "zip": null, "country": "US" },
            "total_project_cost": null,
            "equity_requirement": null,
            "minimum_investment": 50000.0,
            "maximum_investment": null,
            "target_raise_amount": null,
            "projected_irr": 0.17,
            "projected_equity_multiple": null,
            "cash_on_cash_return": null,
            "hold_period_years": 5.0,
            "public_listing": true,
            "created_at": "2024-03-01T12:00:00Z",
            "updated_at": "2024-03-02T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn exposes_fields_for_filtering() {
        let opp = sample();
        assert_eq!(opp.field("minimum_investment"), FieldValue::Number(50000.0));
        assert_eq!(opp.field("opportunity_description"), FieldValue::Null);
        assert_eq!(opp.field("public_listing"), FieldValue::Bool(true));
        assert_eq!(opp.field("featured_listing"), FieldValue::Bool(false));
        assert_eq!(opp.field("no_such_column"), FieldValue::Null);
    }

    #[test]
    fn address_is_exposed_as_json_object() {
        match sample().field("address") {
            FieldValue::Json(v) => assert_eq!(v["city"], "Boise"),
            other => panic!("expected json, got {:?}", other),
        }
    }
}
