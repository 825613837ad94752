//! Domain Entities
//!
//! Core business entities for the listing domain.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ListingId, ListingStatus, MediaPath};

/// Listing entity - a property offered on the site
#[derive(Debug, Clone)]
pub struct Listing {
    pub listing_id: ListingId,
    pub title: String,
    pub price: f64,
    pub beds: i32,
    pub baths: i32,
    pub living_area: Option<f64>,
    pub status: ListingStatus,
    pub address: Option<String>,
    pub description: Option<String>,
    /// Ordered, storage-relative
    pub images: Vec<MediaPath>,
    pub agent_photo: Option<MediaPath>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Create a new listing from validated input
    pub fn new(draft: ListingDraft) -> Self {
        let now = Utc::now();
        Self {
            listing_id: ListingId::new(),
            title: draft.title,
            price: draft.price,
            beds: draft.beds,
            baths: draft.baths,
            living_area: draft.living_area,
            status: draft.status,
            address: draft.address,
            description: draft.description,
            images: draft.images,
            agent_photo: draft.agent_photo,
            created_at: now,
            updated_at: now,
        }
    }

    /// In-memory counterpart of the repository's partial update
    #[cfg(test)]
    pub(crate) fn apply(&mut self, patch: ListingPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(beds) = patch.beds {
            self.beds = beds;
        }
        if let Some(baths) = patch.baths {
            self.baths = baths;
        }
        if let Some(living_area) = patch.living_area {
            self.living_area = Some(living_area);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(agent_photo) = patch.agent_photo {
            self.agent_photo = Some(agent_photo);
        }
        self.updated_at = Utc::now();
    }
}

/// Validated input for a new listing
#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub title: String,
    pub price: f64,
    pub beds: i32,
    pub baths: i32,
    pub living_area: Option<f64>,
    pub status: ListingStatus,
    pub address: Option<String>,
    pub description: Option<String>,
    pub images: Vec<MediaPath>,
    pub agent_photo: Option<MediaPath>,
}

/// Validated partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub beds: Option<i32>,
    pub baths: Option<i32>,
    pub living_area: Option<f64>,
    pub status: Option<ListingStatus>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<MediaPath>>,
    pub agent_photo: Option<MediaPath>,
}
