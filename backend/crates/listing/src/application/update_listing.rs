//! Update Listing Use Case
//!
//! Uploaded images replace the image list; otherwise an `images` text field
//! replaces it; otherwise it is left alone.

use std::sync::Arc;

use crate::application::uploads::{store_uploads, warn_orphaned};
use crate::domain::entities::Listing;
use crate::domain::repository::{ListingRepository, MediaStore};
use crate::domain::services::ListingForm;
use crate::domain::value_objects::{ListingId, UploadedFiles};
use crate::error::{ListingError, ListingResult};

pub struct UpdateListingUseCase<R, M>
where
    R: ListingRepository,
    M: MediaStore,
{
    repo: Arc<R>,
    media: Arc<M>,
}

impl<R, M> UpdateListingUseCase<R, M>
where
    R: ListingRepository,
    M: MediaStore,
{
    pub fn new(repo: Arc<R>, media: Arc<M>) -> Self {
        Self { repo, media }
    }

    pub async fn execute(
        &self,
        listing_id: &str,
        form: ListingForm,
        files: &UploadedFiles,
    ) -> ListingResult<Listing> {
        let listing_id = ListingId::parse_str(listing_id).map_err(|_| ListingError::InvalidId)?;
        let mut patch = form.into_patch()?;

        let stored = store_uploads(self.media.as_ref(), files).await?;
        if let Some(images) = stored.images.clone() {
            patch.images = Some(images);
        }
        if let Some(agent_photo) = stored.agent_photo.clone() {
            patch.agent_photo = Some(agent_photo);
        }

        let updated = match self.repo.update(&listing_id, &patch).await {
            Ok(Some(listing)) => listing,
            Ok(None) => {
                warn_orphaned(&stored);
                return Err(ListingError::NotFound);
            }
            Err(e) => {
                warn_orphaned(&stored);
                return Err(e);
            }
        };

        tracing::info!(
            listing_id = %updated.listing_id,
            images_replaced = patch.images.is_some(),
            "Listing updated"
        );

        Ok(updated)
    }
}
