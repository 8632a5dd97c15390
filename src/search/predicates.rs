use uuid::Uuid;

use crate::config::SearchConfig;
use crate::filter::{FilterOrderInfo, Predicate};

use super::params::SearchCriteria;
use super::status::{resolve_status, DEFAULT_PUBLIC_STATUS};

/// Text columns searched by `keyword`.
pub const KEYWORD_COLUMNS: [&str; 4] = [
    "opportunity_name",
    "opportunity_description",
    "business_plan",
    "value_creation_strategy",
];

/// Whose view of the listings a search runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Anonymous marketplace search: only publicly listed records.
    Public,
    /// A sponsor browsing their own listings, whatever their visibility.
    Sponsor(Uuid),
}

impl SearchScope {
    pub fn default_limit(&self, config: &SearchConfig) -> i64 {
        match self {
            SearchScope::Public => config.default_limit,
            SearchScope::Sponsor(_) => config.sponsor_default_limit,
        }
    }

    pub fn max_limit(&self, config: &SearchConfig) -> i64 {
        match self {
            SearchScope::Public => config.max_limit,
            SearchScope::Sponsor(_) => config.sponsor_max_limit,
        }
    }
}

/// Rules the caller cannot switch off.
pub fn visibility_predicates(scope: &SearchScope, criteria: &SearchCriteria) -> Vec<Predicate> {
    match scope {
        SearchScope::Public => {
            let status = match criteria.status.as_deref() {
                Some(external) => resolve_status(external),
                None => DEFAULT_PUBLIC_STATUS.as_str().to_string(),
            };
            vec![
                Predicate::eq("status", status),
                Predicate::eq("public_listing", true),
            ]
        }
        SearchScope::Sponsor(sponsor_id) => {
            let mut predicates = vec![Predicate::eq("sponsor_id", *sponsor_id)];
            if let Some(external) = criteria.status.as_deref() {
                predicates.push(Predicate::eq("status", resolve_status(external)));
            }
            predicates
        }
    }
}

/// One predicate per supplied parameter; absent parameters add nothing.
pub fn criteria_predicates(criteria: &SearchCriteria) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(keyword) = &criteria.keyword {
        predicates.push(Predicate::any(
            KEYWORD_COLUMNS
                .iter()
                .map(|column| Predicate::contains(*column, keyword.as_str()))
                .collect(),
        ));
    }
    if let Some(property_type) = &criteria.property_type {
        predicates.push(Predicate::eq("property_type", property_type.as_str()));
    }
    if let Some(strategy) = &criteria.investment_strategy {
        predicates.push(Predicate::eq("investment_strategy", strategy.as_str()));
    }
    if let Some(min) = criteria.min_investment {
        predicates.push(Predicate::gte("minimum_investment", min));
    }
    if let Some(max) = criteria.max_investment {
        predicates.push(Predicate::lte("minimum_investment", max));
    }
    if let Some(min) = criteria.min_irr {
        predicates.push(Predicate::gte("projected_irr", min));
    }
    if let Some(max) = criteria.max_irr {
        predicates.push(Predicate::lte("projected_irr", max));
    }
    if let Some(state) = &criteria.state {
        predicates.push(Predicate::json_contains("address", "state", state.as_str()));
    }
    if let Some(city) = &criteria.city {
        predicates.push(Predicate::json_contains("address", "city", city.as_str()));
    }

    predicates
}

/// Full predicate list shared by the page query and the count query.
pub fn build_predicates(scope: &SearchScope, criteria: &SearchCriteria) -> Vec<Predicate> {
    let mut predicates = visibility_predicates(scope, criteria);
    predicates.extend(criteria_predicates(criteria));
    predicates
}

/// Featured listings first, newest first within each group.
pub fn search_order() -> Vec<FilterOrderInfo> {
    vec![
        FilterOrderInfo::desc("featured_listing"),
        FilterOrderInfo::desc("created_at"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::pagination::PageRequest;

    fn criteria() -> SearchCriteria {
        SearchCriteria::new(PageRequest::new(1, 10))
    }

    #[test]
    fn public_scope_defaults_to_active_and_public() {
        let p = build_predicates(&SearchScope::Public, &criteria());
        assert_eq!(
            p,
            vec![Predicate::eq("status", "active"), Predicate::eq("public_listing", true)]
        );
    }

    #[test]
    fn public_scope_resolves_status() {
        let mut c = criteria();
        c.status = Some("funded".into());
        let p = visibility_predicates(&SearchScope::Public, &c);
        assert_eq!(p[0], Predicate::eq("status", "closed"));
    }

    #[test]
    fn sponsor_scope_has_no_public_constraint() {
        let sponsor = Uuid::new_v4();
        let p = visibility_predicates(&SearchScope::Sponsor(sponsor), &criteria());
        assert_eq!(p, vec![Predicate::eq("sponsor_id", sponsor)]);

        let mut c = criteria();
        c.status = Some("cancelled".into());
        let p = visibility_predicates(&SearchScope::Sponsor(sponsor), &c);
        assert_eq!(p[1], Predicate::eq("status", "archived"));
    }

    #[test]
    fn keyword_is_a_single_or_group() {
        let mut c = criteria();
        c.keyword = Some("office".into());
        let p = criteria_predicates(&c);
        assert_eq!(p.len(), 1);
        match &p[0] {
            Predicate::Any(group) => assert_eq!(
                group,
                &vec![
                    Predicate::contains("opportunity_name", "office"),
                    Predicate::contains("opportunity_description", "office"),
                    Predicate::contains("business_plan", "office"),
                    Predicate::contains("value_creation_strategy", "office"),
                ]
            ),
            other => panic!("expected OR group, got {:?}", other),
        }
    }

    #[test]
    fn ranges_are_inclusive_bounds() {
        let mut c = criteria();
        c.min_investment = Some(10.0);
        c.max_investment = Some(20.0);
        c.min_irr = Some(0.1);
        c.max_irr = Some(0.3);
        assert_eq!(
            criteria_predicates(&c),
            vec![
                Predicate::gte("minimum_investment", 10.0),
                Predicate::lte("minimum_investment", 20.0),
                Predicate::gte("projected_irr", 0.1),
                Predicate::lte("projected_irr", 0.3),
            ]
        );
    }

    #[test]
    fn absent_parameters_add_nothing() {
        assert!(criteria_predicates(&criteria()).is_empty());
    }

    #[test]
    fn location_matches_nested_address() {
        let mut c = criteria();
        c.state = Some("tx".into());
        c.city = Some("Aus".into());
        assert_eq!(
            criteria_predicates(&c),
            vec![
                Predicate::json_contains("address", "state", "tx"),
                Predicate::json_contains("address", "city", "Aus"),
            ]
        );
    }
}
