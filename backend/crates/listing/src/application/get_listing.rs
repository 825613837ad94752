//! Get Listing Use Case

use std::sync::Arc;

use crate::domain::entities::Listing;
use crate::domain::repository::ListingRepository;
use crate::domain::value_objects::ListingId;
use crate::error::{ListingError, ListingResult};

pub struct GetListingUseCase<R>
where
    R: ListingRepository,
{
    repo: Arc<R>,
}

impl<R> GetListingUseCase<R>
where
    R: ListingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, listing_id: &str) -> ListingResult<Listing> {
        let listing_id = ListingId::parse_str(listing_id).map_err(|_| ListingError::InvalidId)?;

        self.repo
            .find_by_id(&listing_id)
            .await?
            .ok_or(ListingError::NotFound)
    }
}
