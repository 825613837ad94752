//! Remove Listing Use Case
//!
//! Idempotent: removing a missing listing succeeds. Media files stay on disk.

use std::sync::Arc;

use crate::domain::repository::ListingRepository;
use crate::domain::value_objects::ListingId;
use crate::error::{ListingError, ListingResult};

pub struct RemoveListingUseCase<R>
where
    R: ListingRepository,
{
    repo: Arc<R>,
}

impl<R> RemoveListingUseCase<R>
where
    R: ListingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, listing_id: &str) -> ListingResult<()> {
        let listing_id = ListingId::parse_str(listing_id).map_err(|_| ListingError::InvalidId)?;

        if self.repo.delete(&listing_id).await? {
            tracing::info!(listing_id = %listing_id, "Listing removed");
        } else {
            tracing::debug!(listing_id = %listing_id, "Remove of missing listing");
        }

        Ok(())
    }
}
