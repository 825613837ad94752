//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the domain crates and the server:
//! - Password policy and hashing (Argon2id)
//! - Client identification
//! - Request rate limiting

pub mod client;
pub mod password;
pub mod rate_limit;
