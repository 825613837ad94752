//! Domain Value Objects
//!
//! Immutable value types for the listing domain.

use std::collections::BTreeMap;
use std::str::FromStr;

use bytes::Bytes;
use derive_more::Display;

use crate::error::ListingError;

pub use kernel::id::ListingId;

/// Public URL prefix of stored media
pub const UPLOADS_PREFIX: &str = "/uploads/";

// ============================================================================
// Status
// ============================================================================

/// Listing status. Any value may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum ListingStatus {
    #[default]
    #[display("active")]
    Active,
    #[display("under-contract")]
    UnderContract,
    #[display("sold")]
    Sold,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 3] = [Self::Active, Self::UnderContract, Self::Sold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::UnderContract => "under-contract",
            Self::Sold => "sold",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ListingError::Validation(
                    "status must be one of: active, under-contract, sold".to_string(),
                )
            })
    }
}

// ============================================================================
// Media path
// ============================================================================

/// Host-independent media reference, normally `/uploads/<file>`.
///
/// Only turned into an absolute URL when a listing is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaPath(String);

impl MediaPath {
    /// Path of a file just written to the uploads directory
    pub fn uploaded(file_name: &str) -> Self {
        Self(format!("{UPLOADS_PREFIX}{file_name}"))
    }

    /// Normalize a client-supplied reference.
    ///
    /// `http(s)://<host>/uploads/<file>` becomes `/uploads/<file>`; anything
    /// else is kept verbatim.
    pub fn from_client(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();

        let after_scheme = lower
            .strip_prefix("http://")
            .or_else(|| lower.strip_prefix("https://"))
            .map(|rest| raw.len() - rest.len());

        if let Some(start) = after_scheme
            && let Some(host_end) = lower[start..].find('/')
        {
            let path_start = start + host_end;
            if host_end > 0 && lower[path_start..].starts_with(UPLOADS_PREFIX) {
                return Self(raw[path_start..].to_string());
            }
        }

        Self(raw.to_string())
    }

    /// Value read back from storage
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }

    /// Absolute URL for responses.
    ///
    /// The part from the first `/uploads/` onward (case-insensitive) is
    /// appended to `site_base`; with an empty base it is returned as-is.
    /// References without an uploads segment pass through unchanged.
    pub fn resolve(&self, site_base: &str) -> String {
        match self.0.to_ascii_lowercase().find(UPLOADS_PREFIX) {
            Some(idx) => format!("{}{}", site_base, &self.0[idx..]),
            None => self.0.clone(),
        }
    }
}

// ============================================================================
// Uploaded files
// ============================================================================

/// Multipart field carrying listing images
pub const IMAGE_FILES_FIELD: &str = "imageFiles";
/// Multipart field carrying the agent photo
pub const AGENT_PHOTO_FIELD: &str = "agentPhotoFile";

/// A file received in a multipart request, not yet stored
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied name, only used to derive an extension
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    /// Lowercase alphanumeric extension of the client file name, if any
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }

        let ext: String = ext
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(10)
            .collect::<String>()
            .to_ascii_lowercase();

        (!ext.is_empty()).then_some(ext)
    }
}

/// Uploaded files keyed by field name, in arrival order.
///
/// `imageFiles[]` is folded into `imageFiles` on insert.
#[derive(Debug, Clone, Default)]
pub struct UploadedFiles {
    by_field: BTreeMap<String, Vec<UploadedFile>>,
}

impl UploadedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, file: UploadedFile) {
        let field = field.strip_suffix("[]").unwrap_or(field);
        self.by_field.entry(field.to_string()).or_default().push(file);
    }

    pub fn field(&self, field: &str) -> &[UploadedFile] {
        self.by_field.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn images(&self) -> &[UploadedFile] {
        self.field(IMAGE_FILES_FIELD)
    }

    pub fn agent_photo(&self) -> Option<&UploadedFile> {
        self.field(AGENT_PHOTO_FIELD).first()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.values().all(Vec::is_empty)
    }
}
