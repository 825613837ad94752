//! Listing Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, form validation, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL repository and filesystem media store
//! - `presentation/` - HTTP handlers, body extractor, router
//!
//! ## Media Model
//! - Uploads are stored under server-assigned names and referenced as `/uploads/<file>`
//! - Stored references never contain a host; responses prepend the configured site base
//! - A submission is fully validated before any upload is written

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ListingConfig;
pub use domain::repository::{ListingRepository, MediaStore};
pub use error::{ListingError, ListingResult};
pub use infra::{FsMediaStore, PgListingRepository};
pub use presentation::router::{listing_router, listing_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
