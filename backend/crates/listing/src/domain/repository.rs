//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{Listing, ListingPatch};
use crate::domain::value_objects::{ListingId, MediaPath, UploadedFile};
use crate::error::ListingResult;

/// Listing repository trait
#[trait_variant::make(ListingRepository: Send)]
pub trait LocalListingRepository {
    /// All listings, newest first
    async fn list_newest_first(&self) -> ListingResult<Vec<Listing>>;

    /// Find listing by ID
    async fn find_by_id(&self, listing_id: &ListingId) -> ListingResult<Option<Listing>>;

    /// Insert a new listing
    async fn create(&self, listing: &Listing) -> ListingResult<()>;

    /// Apply a partial update in a single statement.
    ///
    /// Returns `Ok(None)` when the listing does not exist.
    async fn update(
        &self,
        listing_id: &ListingId,
        patch: &ListingPatch,
    ) -> ListingResult<Option<Listing>>;

    /// Delete by ID. Returns whether a row was removed.
    async fn delete(&self, listing_id: &ListingId) -> ListingResult<bool>;
}

/// Storage for uploaded media files
#[trait_variant::make(MediaStore: Send)]
pub trait LocalMediaStore {
    /// Persist the file under a server-assigned name and return its path
    async fn save(&self, file: &UploadedFile) -> ListingResult<MediaPath>;
}
