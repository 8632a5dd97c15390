use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{ParamPolicy, SearchConfig};
use crate::types::{InvestmentStrategy, PropertyType};

use super::error::SearchError;
use super::pagination::PageRequest;
use super::predicates::SearchScope;

/// Raw query-string parameters, exactly as the caller sent them.
///
/// Every field is kept as text so malformed values reach [`SearchCriteria::parse`]
/// and get handled by the configured [`ParamPolicy`] instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub property_type: Option<String>,
    pub investment_strategy: Option<String>,
    pub min_investment: Option<String>,
    pub max_investment: Option<String>,
    pub min_irr: Option<String>,
    pub max_irr: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Validated search input.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub keyword: Option<String>,
    pub property_type: Option<String>,
    pub investment_strategy: Option<String>,
    pub min_investment: Option<f64>,
    pub max_investment: Option<f64>,
    pub min_irr: Option<f64>,
    pub max_irr: Option<f64>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// External status term, not yet resolved.
    pub status: Option<String>,
    pub page: PageRequest,
}

impl SearchCriteria {
    /// Criteria with no filters on the given page.
    pub fn new(page: PageRequest) -> Self {
        Self {
            keyword: None,
            property_type: None,
            investment_strategy: None,
            min_investment: None,
            max_investment: None,
            min_irr: None,
            max_irr: None,
            state: None,
            city: None,
            status: None,
            page,
        }
    }

    pub fn parse(query: &SearchQuery, scope: &SearchScope, config: &SearchConfig) -> Result<Self, SearchError> {
        let mut reader = ParamReader::new(config.params);

        let default_limit = scope.default_limit(config);
        let max_limit = scope.max_limit(config);

        let mut page = reader.positive_int("page", &query.page, 1);
        let mut limit = reader.positive_int("limit", &query.limit, default_limit);
        if limit > max_limit {
            tracing::warn!("Limit {} exceeds max {}, capping to max", limit, max_limit);
            limit = max_limit;
        }
        if PageRequest::new(page, limit).checked_range().is_none() {
            reader.reject("page", format!("Page {} is out of range", page));
            page = 1;
        }

        let criteria = Self {
            keyword: text(&query.keyword),
            property_type: reader.vocabulary::<PropertyType>("property_type", &query.property_type),
            investment_strategy: reader.vocabulary::<InvestmentStrategy>("investment_strategy", &query.investment_strategy),
            min_investment: reader.number("min_investment", &query.min_investment),
            max_investment: reader.number("max_investment", &query.max_investment),
            min_irr: reader.number("min_irr", &query.min_irr),
            max_irr: reader.number("max_irr", &query.max_irr),
            state: text(&query.state),
            city: text(&query.city),
            status: text(&query.status),
            page: PageRequest::new(page, limit),
        };

        reader.finish()?;
        Ok(criteria)
    }
}

/// Trimmed text, with empty values treated as absent.
fn text(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

struct ParamReader {
    policy: ParamPolicy,
    field_errors: HashMap<String, String>,
}

impl ParamReader {
    fn new(policy: ParamPolicy) -> Self {
        Self {
            policy,
            field_errors: HashMap::new(),
        }
    }

    fn reject(&mut self, field: &str, message: String) {
        match self.policy {
            ParamPolicy::Strict => {
                self.field_errors.insert(field.to_string(), message);
            }
            ParamPolicy::Lenient => {
                tracing::debug!(field, "ignoring malformed search parameter: {}", message);
            }
        }
    }

    fn number(&mut self, field: &str, raw: &Option<String>) -> Option<f64> {
        let value = text(raw)?;
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                self.reject(field, format!("Expected a number, got '{}'", value));
                None
            }
        }
    }

    fn positive_int(&mut self, field: &str, raw: &Option<String>, default: i64) -> i64 {
        let value = match text(raw) {
            Some(v) => v,
            None => return default,
        };
        match value.parse::<i64>() {
            Ok(n) if n >= 1 => n,
            _ => {
                self.reject(field, format!("Expected a positive integer, got '{}'", value));
                default
            }
        }
    }

    /// Known vocabulary values are normalised; unknown ones are rejected under
    /// the strict policy and passed through verbatim under the lenient one.
    fn vocabulary<E>(&mut self, field: &str, raw: &Option<String>) -> Option<String>
    where
        E: FromStr + ToString,
        E::Err: ToString,
    {
        let value = text(raw)?;
        match value.parse::<E>() {
            Ok(parsed) => Some(parsed.to_string()),
            Err(e) => match self.policy {
                ParamPolicy::Strict => {
                    self.field_errors.insert(field.to_string(), e.to_string());
                    None
                }
                ParamPolicy::Lenient => Some(value),
            },
        }
    }

    fn finish(self) -> Result<(), SearchError> {
        if self.field_errors.is_empty() {
            return Ok(());
        }
        Err(SearchError::Validation {
            message: "Invalid search parameters".to_string(),
            field_errors: self.field_errors,
        })
    }
}
