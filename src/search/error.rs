use std::collections::HashMap;
use thiserror::Error;

use crate::database::DatabaseError;
use crate::filter::FilterError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("Failed to fetch opportunities: {0}")]
    Fetch(#[source] DatabaseError),

    #[error("Failed to count opportunities: {0}")]
    Count(#[source] DatabaseError),

    #[error("Invalid search filter: {0}")]
    Filter(#[from] FilterError),
}
