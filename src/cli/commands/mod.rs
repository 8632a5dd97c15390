pub mod fixture;
pub mod search;
pub mod token;
