// handlers/protected/mod.rs - endpoints behind jwt_auth_middleware
//
// Every handler here can rely on an AuthSponsor request extension.

pub mod sponsor; // a sponsor's own listings
