//! Upload persistence shared by create and update.

use crate::domain::repository::MediaStore;
use crate::domain::value_objects::{MediaPath, UploadedFiles};
use crate::error::ListingResult;

/// Paths of freshly stored uploads
#[derive(Debug, Default)]
pub struct StoredUploads {
    /// `None` when no image files were sent
    pub images: Option<Vec<MediaPath>>,
    pub agent_photo: Option<MediaPath>,
}

impl StoredUploads {
    pub fn paths(&self) -> impl Iterator<Item = &MediaPath> {
        self.images.iter().flatten().chain(self.agent_photo.iter())
    }
}

/// Write image and agent photo uploads through the media store.
///
/// Must only be called once the rest of the submission has validated.
pub async fn store_uploads<M>(media: &M, files: &UploadedFiles) -> ListingResult<StoredUploads>
where
    M: MediaStore,
{
    let mut stored = StoredUploads::default();

    if !files.images().is_empty() {
        let mut images = Vec::with_capacity(files.images().len());
        for file in files.images() {
            images.push(media.save(file).await?);
        }
        stored.images = Some(images);
    }

    if let Some(file) = files.agent_photo() {
        stored.agent_photo = Some(media.save(file).await?);
    }

    Ok(stored)
}

/// Log uploads left without a referencing row
pub(crate) fn warn_orphaned(stored: &StoredUploads) {
    for path in stored.paths() {
        tracing::warn!(path = %path.as_str(), "Uploaded file left orphaned");
    }
}
