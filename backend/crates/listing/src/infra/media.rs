//! Filesystem Media Store
//!
//! Writes uploads into a single directory served at `/uploads/`.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::repository::MediaStore;
use crate::domain::value_objects::{MediaPath, UploadedFile};
use crate::error::ListingResult;

/// Media store backed by a local directory
#[derive(Debug, Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the uploads directory if missing
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }
}

/// `<uuid-v4>[.<ext>]`; the client name never reaches the filesystem.
pub fn server_file_name(file: &UploadedFile) -> String {
    let id = Uuid::new_v4();
    match file.extension() {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

impl MediaStore for FsMediaStore {
    async fn save(&self, file: &UploadedFile) -> ListingResult<MediaPath> {
        let file_name = server_file_name(file);

        self.ensure_root().await?;
        tokio::fs::write(self.root.join(&file_name), &file.data).await?;

        tracing::debug!(
            file_name = %file_name,
            bytes = file.data.len(),
            content_type = file.content_type.as_deref().unwrap_or("-"),
            "Stored upload"
        );

        Ok(MediaPath::uploaded(&file_name))
    }
}
