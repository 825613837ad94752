//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use std::sync::Arc;

use crate::application::config::AdminConfig;
use crate::application::token::TokenService;
use crate::application::{
    CurrentAdminUseCase, DeleteAdminUseCase, ListAdminsUseCase, SignInInput, SignInUseCase,
    SignUpInput, SignUpUseCase, UpdateAdminInput, UpdateAdminUseCase,
};
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::AdminIdentity;
use crate::error::{AdminError, AdminResult};
use crate::presentation::dto::{
    AdminEnvelope, AdminView, AuthResponse, OkResponse, SignInRequest, SignUpRequest,
    UpdateAdminRequest,
};

/// Shared state for admin handlers
#[derive(Clone)]
pub struct AdminAppState<R>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AdminConfig>,
}

// ============================================================================
// Sign Up / Login
// ============================================================================

/// POST /api/admin/signup
pub async fn sign_up<R>(
    State(state): State<AdminAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<SignUpRequest>, AdminError>,
) -> AdminResult<(StatusCode, Json<AuthResponse>)>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: output.token.token,
            admin: AdminView::from(&output.admin),
        }),
    ))
}

/// POST /api/admin/login
pub async fn login<R>(
    State(state): State<AdminAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<SignInRequest>, AdminError>,
) -> AdminResult<Json<AuthResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: output.token.token,
        admin: AdminView::from(&output.admin),
    }))
}

// ============================================================================
// Admin management
// ============================================================================

/// GET /api/admin/me
pub async fn me<R>(
    State(state): State<AdminAppState<R>>,
    Extension(identity): Extension<AdminIdentity>,
) -> AdminResult<Json<AdminEnvelope>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let admin = CurrentAdminUseCase::new(state.repo.clone())
        .execute(&identity)
        .await?;

    Ok(Json(AdminEnvelope {
        admin: AdminView::from(&admin),
    }))
}

/// GET /api/admin
pub async fn list_admins<R>(
    State(state): State<AdminAppState<R>>,
) -> AdminResult<Json<Vec<AdminView>>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let admins = ListAdminsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(admins.iter().map(AdminView::from).collect()))
}

/// PUT /api/admin/{id}
pub async fn update_admin<R>(
    State(state): State<AdminAppState<R>>,
    Path(admin_id): Path<String>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateAdminRequest>, AdminError>,
) -> AdminResult<Json<AdminEnvelope>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateAdminUseCase::new(state.repo.clone(), state.config.clone());

    let admin = use_case
        .execute(UpdateAdminInput {
            admin_id,
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok(Json(AdminEnvelope {
        admin: AdminView::from(&admin),
    }))
}

/// DELETE /api/admin/{id}
pub async fn delete_admin<R>(
    State(state): State<AdminAppState<R>>,
    Extension(identity): Extension<AdminIdentity>,
    Path(admin_id): Path<String>,
) -> AdminResult<Json<OkResponse>>
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    DeleteAdminUseCase::new(state.repo.clone())
        .execute(&identity, &admin_id)
        .await?;

    Ok(Json(OkResponse::ok()))
}
