pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod search;
pub mod types;

#[cfg(any(test, feature = "testkit"))]
pub mod testing;

pub use app::{app, AppState};
