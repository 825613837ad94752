//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::ListingConfig;
use crate::application::{
    CreateListingUseCase, GetListingUseCase, ListListingsUseCase, RemoveListingUseCase,
    UpdateListingUseCase,
};
use crate::domain::repository::{ListingRepository, MediaStore};
use crate::error::ListingResult;
use crate::presentation::dto::{ListingView, OkResponse};
use crate::presentation::extract::ListingSubmission;

/// Shared state for listing handlers
#[derive(Clone)]
pub struct ListingAppState<R, M>
where
    R: ListingRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub media: Arc<M>,
    pub config: Arc<ListingConfig>,
}

/// GET /api/listings
pub async fn list<R, M>(
    State(state): State<ListingAppState<R, M>>,
) -> ListingResult<Json<Vec<ListingView>>>
where
    R: ListingRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let listings = ListListingsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(
        listings
            .iter()
            .map(|l| ListingView::resolve(l, &state.config.site_base))
            .collect(),
    ))
}

/// GET /api/listings/{id}
pub async fn get<R, M>(
    State(state): State<ListingAppState<R, M>>,
    Path(listing_id): Path<String>,
) -> ListingResult<Json<ListingView>>
where
    R: ListingRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let listing = GetListingUseCase::new(state.repo.clone())
        .execute(&listing_id)
        .await?;

    Ok(Json(ListingView::resolve(&listing, &state.config.site_base)))
}

/// POST /api/listings
pub async fn create<R, M>(
    State(state): State<ListingAppState<R, M>>,
    submission: ListingSubmission,
) -> ListingResult<(StatusCode, Json<ListingView>)>
where
    R: ListingRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let use_case = CreateListingUseCase::new(state.repo.clone(), state.media.clone());
    let listing = use_case
        .execute(submission.form, &submission.files)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ListingView::resolve(&listing, &state.config.site_base)),
    ))
}

/// PUT /api/listings/{id}
pub async fn update<R, M>(
    State(state): State<ListingAppState<R, M>>,
    Path(listing_id): Path<String>,
    submission: ListingSubmission,
) -> ListingResult<Json<ListingView>>
where
    R: ListingRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    let use_case = UpdateListingUseCase::new(state.repo.clone(), state.media.clone());
    let listing = use_case
        .execute(&listing_id, submission.form, &submission.files)
        .await?;

    Ok(Json(ListingView::resolve(&listing, &state.config.site_base)))
}

/// DELETE /api/listings/{id}
pub async fn remove<R, M>(
    State(state): State<ListingAppState<R, M>>,
    Path(listing_id): Path<String>,
) -> ListingResult<Json<OkResponse>>
where
    R: ListingRepository + Clone + Send + Sync + 'static,
    M: MediaStore + Clone + Send + Sync + 'static,
{
    RemoveListingUseCase::new(state.repo.clone())
        .execute(&listing_id)
        .await?;

    Ok(Json(OkResponse::ok()))
}
