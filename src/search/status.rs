//! Public status vocabulary.
//!
//! Listing pages speak a richer status language than the store keeps. Every
//! public term collapses onto an [`OpportunityStatus`](crate::types::OpportunityStatus);
//! anything else is passed through untouched so internal values keep working.

use crate::types::OpportunityStatus;

/// Status used when the caller does not ask for one.
pub const DEFAULT_PUBLIC_STATUS: OpportunityStatus = OpportunityStatus::Active;

/// Map an external status term to the stored status value.
pub fn resolve_status(external: &str) -> String {
    match external {
        "fundraising" | "due_diligence" => OpportunityStatus::Active.as_str().to_string(),
        "funded" => OpportunityStatus::Closed.as_str().to_string(),
        "cancelled" => OpportunityStatus::Archived.as_str().to_string(),
        other => other.to_string(),
    }
}
