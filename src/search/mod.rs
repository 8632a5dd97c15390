//! Opportunity search: parameter parsing, predicate composition, pagination.

pub mod engine;
pub mod error;
pub mod pagination;
pub mod params;
pub mod predicates;
pub mod status;

pub use engine::{SearchEngine, SearchResults};
pub use error::SearchError;
pub use pagination::{PageRequest, Pagination};
pub use params::{SearchCriteria, SearchQuery};
pub use predicates::SearchScope;
pub use status::resolve_status;
