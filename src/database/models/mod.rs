pub mod opportunity;

pub use opportunity::{Address, Opportunity, OPPORTUNITIES_TABLE};
