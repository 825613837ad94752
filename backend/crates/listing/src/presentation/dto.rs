//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::domain::entities::Listing;

/// Listing as returned to clients, with media resolved to absolute URLs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub id: String,
    pub title: String,
    #[serde(serialize_with = "number")]
    pub price: f64,
    pub beds: i32,
    pub baths: i32,
    #[serde(serialize_with = "optional_number")]
    pub living_area: Option<f64>,
    pub status: String,
    pub address: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub agent_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListingView {
    pub fn resolve(listing: &Listing, site_base: &str) -> Self {
        Self {
            id: listing.listing_id.to_string(),
            title: listing.title.clone(),
            price: listing.price,
            beds: listing.beds,
            baths: listing.baths,
            living_area: listing.living_area,
            status: listing.status.to_string(),
            address: listing.address.clone(),
            description: listing.description.clone(),
            images: listing.images.iter().map(|p| p.resolve(site_base)).collect(),
            agent_photo: listing.agent_photo.as_ref().map(|p| p.resolve(site_base)),
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

/// `{ "ok": true }`
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

// Whole numbers go out as integers (`250000`, not `250000.0`).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn optional_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => number(v, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ListingDraft;
    use crate::domain::value_objects::{ListingStatus, MediaPath};

    fn listing() -> Listing {
        Listing::new(ListingDraft {
            title: "Loft".into(),
            price: 250_000.0,
            beds: 2,
            baths: 1,
            living_area: Some(82.5),
            status: ListingStatus::UnderContract,
            address: None,
            description: None,
            images: vec![MediaPath::uploaded("a.jpg")],
            agent_photo: Some(MediaPath::from_db("https://cdn.example.com/agent.png")),
        })
    }

    #[test]
    fn test_view_serialization() {
        let json = serde_json::to_value(ListingView::resolve(&listing(), "https://api.example.com"))
            .unwrap();

        assert_eq!(json["price"], serde_json::json!(250000));
        assert_eq!(json["livingArea"], serde_json::json!(82.5));
        assert_eq!(json["status"], "under-contract");
        assert_eq!(json["images"][0], "https://api.example.com/uploads/a.jpg");
        assert_eq!(json["agentPhoto"], "https://cdn.example.com/agent.png");
        assert!(json["createdAt"].is_string());
        assert!(json["address"].is_null());
    }
}
