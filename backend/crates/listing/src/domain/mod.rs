//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Listing, ListingDraft, ListingPatch)
//! - Domain value objects (ListingStatus, MediaPath, UploadedFiles)
//! - Domain services (form coercion and validation)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
