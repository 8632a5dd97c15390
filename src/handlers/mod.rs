// handlers/mod.rs - handlers grouped by security tier
//
// Public (no auth) → Protected (sponsor JWT)

pub mod protected; // /api/sponsor/* - bearer token required
pub mod public;    // /, /health, /api/opportunities/*
