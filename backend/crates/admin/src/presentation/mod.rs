//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AdminAppState;
pub use middleware::{AdminMiddlewareState, bearer_token, require_admin_token};
pub use router::{admin_router, admin_router_generic};
