// handlers/public/mod.rs - endpoints that require no authentication

pub mod opportunities; // marketplace search and detail
pub mod system;        // service info and health
