//! Listing Router

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use std::sync::Arc;

use crate::application::config::ListingConfig;
use crate::domain::repository::{ListingRepository, MediaStore};
use crate::infra::media::FsMediaStore;
use crate::infra::postgres::PgListingRepository;
use crate::presentation::handlers::{self, ListingAppState};

/// Create the listing router with PostgreSQL and the uploads directory
pub fn listing_router(repo: PgListingRepository, config: ListingConfig) -> Router {
    let media = FsMediaStore::new(config.uploads_dir.clone());
    listing_router_generic(repo, media, config)
}

/// Create a generic listing router for any repository and media store
pub fn listing_router_generic<R, M>(repo: R, media: M, config: ListingConfig) -> Router
where
    R: ListingRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let body_limit = config.max_upload_bytes;

    let state = ListingAppState {
        repo: Arc::new(repo),
        media: Arc::new(media),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list::<R, M>).post(handlers::create::<R, M>),
        )
        .route(
            "/{id}",
            get(handlers::get::<R, M>)
                .put(handlers::update::<R, M>)
                .delete(handlers::remove::<R, M>),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
