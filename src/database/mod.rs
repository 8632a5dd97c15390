pub mod manager;
pub mod memory;
pub mod models;
pub mod query_builder;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryOpportunityStore;
pub use models::{Address, Opportunity, OPPORTUNITIES_TABLE};
pub use repository::{OpportunityStore, PgOpportunityStore};
