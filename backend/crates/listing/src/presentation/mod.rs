//! Presentation Layer
//!
//! HTTP handlers, DTOs, body extractor, router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use extract::ListingSubmission;
pub use handlers::ListingAppState;
pub use router::{listing_router, listing_router_generic};
