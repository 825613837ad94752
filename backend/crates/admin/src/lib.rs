//! Admin Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token service, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Admin signup (by an existing admin) and login with email + password
//! - Stateless HS256 bearer tokens, valid for 7 days
//! - Admin listing, partial update and guarded deletion
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application-wide pepper
//! - Unknown email and wrong password are indistinguishable
//! - An admin cannot delete itself, and the last admin cannot be deleted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::bootstrap::BootstrapAdminUseCase;
pub use application::config::AdminConfig;
pub use application::token::TokenService;
pub use domain::repository::{AdminRepository, DeleteOutcome};
pub use domain::value_object::AdminIdentity;
pub use error::{AdminError, AdminResult};
pub use infra::postgres::PgAdminRepository;
pub use presentation::router::{admin_router, admin_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
