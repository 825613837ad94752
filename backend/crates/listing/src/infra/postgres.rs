//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Listing, ListingPatch};
use crate::domain::repository::ListingRepository;
use crate::domain::value_objects::{ListingId, ListingStatus, MediaPath};
use crate::error::{ListingError, ListingResult};

/// PostgreSQL-backed listing repository
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const LISTING_COLUMNS: &str = "listing_id, title, price, beds, baths, living_area, status, \
     address, description, images, agent_photo, created_at, updated_at";

impl ListingRepository for PgListingRepository {
    async fn list_newest_first(&self) -> ListingResult<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_listing()).collect()
    }

    async fn find_by_id(&self, listing_id: &ListingId) -> ListingResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE listing_id = $1"
        ))
        .bind(listing_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_listing()).transpose()
    }

    async fn create(&self, listing: &Listing) -> ListingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO listings (
                listing_id,
                title,
                price,
                beds,
                baths,
                living_area,
                status,
                address,
                description,
                images,
                agent_photo,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(listing.listing_id.as_uuid())
        .bind(&listing.title)
        .bind(listing.price)
        .bind(listing.beds)
        .bind(listing.baths)
        .bind(listing.living_area)
        .bind(listing.status.as_str())
        .bind(listing.address.as_deref())
        .bind(listing.description.as_deref())
        .bind(media_to_db(&listing.images))
        .bind(listing.agent_photo.as_ref().map(|p| p.as_str()))
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(
        &self,
        listing_id: &ListingId,
        patch: &ListingPatch,
    ) -> ListingResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            r#"
            UPDATE listings SET
                title = COALESCE($2, title),
                price = COALESCE($3, price),
                beds = COALESCE($4, beds),
                baths = COALESCE($5, baths),
                living_area = COALESCE($6, living_area),
                status = COALESCE($7, status),
                address = COALESCE($8, address),
                description = COALESCE($9, description),
                images = COALESCE($10, images),
                agent_photo = COALESCE($11, agent_photo),
                updated_at = $12
            WHERE listing_id = $1
            RETURNING {LISTING_COLUMNS}
            "#
        ))
        .bind(listing_id.as_uuid())
        .bind(patch.title.as_deref())
        .bind(patch.price)
        .bind(patch.beds)
        .bind(patch.baths)
        .bind(patch.living_area)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.address.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.images.as_deref().map(media_to_db))
        .bind(patch.agent_photo.as_ref().map(|p| p.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_listing()).transpose()
    }

    async fn delete(&self, listing_id: &ListingId) -> ListingResult<bool> {
        let deleted = sqlx::query("DELETE FROM listings WHERE listing_id = $1")
            .bind(listing_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

fn media_to_db(paths: &[MediaPath]) -> Vec<String> {
    paths.iter().map(|p| p.as_str().to_string()).collect()
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ListingRow {
    listing_id: Uuid,
    title: String,
    price: f64,
    beds: i32,
    baths: i32,
    living_area: Option<f64>,
    status: String,
    address: Option<String>,
    description: Option<String>,
    images: Vec<String>,
    agent_photo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ListingRow {
    fn into_listing(self) -> ListingResult<Listing> {
        let status = self
            .status
            .parse::<ListingStatus>()
            .map_err(|_| ListingError::Internal(format!("Invalid stored status: {}", self.status)))?;

        Ok(Listing {
            listing_id: ListingId::from_uuid(self.listing_id),
            title: self.title,
            price: self.price,
            beds: self.beds,
            baths: self.baths,
            living_area: self.living_area,
            status,
            address: self.address,
            description: self.description,
            images: self.images.into_iter().map(MediaPath::from_db).collect(),
            agent_photo: self.agent_photo.map(MediaPath::from_db),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
