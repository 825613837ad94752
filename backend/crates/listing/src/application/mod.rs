//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod config;
pub mod create_listing;
pub mod get_listing;
pub mod list_listings;
pub mod remove_listing;
pub mod update_listing;
pub mod uploads;

pub use config::ListingConfig;
pub use create_listing::CreateListingUseCase;
pub use get_listing::GetListingUseCase;
pub use list_listings::ListListingsUseCase;
pub use remove_listing::RemoveListingUseCase;
pub use update_listing::UpdateListingUseCase;
