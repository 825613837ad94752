//! Application Configuration
//!
//! Configuration for the listing application layer.

use std::path::PathBuf;

/// Default upload limit per request (20 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Listing application configuration
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Public base URL prepended to `/uploads/...` paths in responses.
    /// Empty keeps responses relative.
    pub site_base: String,
    /// Directory uploaded files are written to
    pub uploads_dir: PathBuf,
    /// Maximum accepted request body for create/update
    pub max_upload_bytes: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            site_base: String::new(),
            uploads_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ListingConfig {
    pub fn with_site_base(mut self, site_base: impl Into<String>) -> Self {
        self.site_base = site_base.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_uploads_dir(mut self, uploads_dir: impl Into<PathBuf>) -> Self {
        self.uploads_dir = uploads_dir.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_base_trailing_slash_is_trimmed() {
        let config = ListingConfig::default().with_site_base("https://api.example.com/ ");
        assert_eq!(config.site_base, "https://api.example.com");
    }

    #[test]
    fn test_defaults() {
        let config = ListingConfig::default();
        assert_eq!(config.site_base, "");
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
    }
}
