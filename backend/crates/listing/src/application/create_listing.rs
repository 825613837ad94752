//! Create Listing Use Case

use std::sync::Arc;

use crate::application::uploads::{store_uploads, warn_orphaned};
use crate::domain::entities::Listing;
use crate::domain::repository::{ListingRepository, MediaStore};
use crate::domain::services::ListingForm;
use crate::domain::value_objects::UploadedFiles;
use crate::error::ListingResult;

pub struct CreateListingUseCase<R, M>
where
    R: ListingRepository,
    M: MediaStore,
{
    repo: Arc<R>,
    media: Arc<M>,
}

impl<R, M> CreateListingUseCase<R, M>
where
    R: ListingRepository,
    M: MediaStore,
{
    pub fn new(repo: Arc<R>, media: Arc<M>) -> Self {
        Self { repo, media }
    }

    pub async fn execute(&self, form: ListingForm, files: &UploadedFiles) -> ListingResult<Listing> {
        // Validate before anything touches the disk.
        let mut draft = form.into_draft()?;

        let stored = store_uploads(self.media.as_ref(), files).await?;
        if let Some(images) = stored.images.clone() {
            draft.images = images;
        }
        if let Some(agent_photo) = stored.agent_photo.clone() {
            draft.agent_photo = Some(agent_photo);
        }

        let listing = Listing::new(draft);

        if let Err(e) = self.repo.create(&listing).await {
            warn_orphaned(&stored);
            return Err(e);
        }

        tracing::info!(
            listing_id = %listing.listing_id,
            images = listing.images.len(),
            status = %listing.status,
            "Listing created"
        );

        Ok(listing)
    }
}
