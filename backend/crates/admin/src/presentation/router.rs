//! Admin Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AdminConfig;
use crate::application::token::TokenService;
use crate::domain::repository::AdminRepository;
use crate::infra::postgres::PgAdminRepository;
use crate::presentation::handlers::{self, AdminAppState};
use crate::presentation::middleware::{AdminMiddlewareState, require_admin_token};

/// Create the Admin router with PostgreSQL repository
pub fn admin_router(repo: PgAdminRepository, config: AdminConfig) -> Router {
    admin_router_generic(repo, config)
}

/// Create a generic Admin router for any repository implementation
///
/// `/login` is public; every other route requires a bearer token.
pub fn admin_router_generic<R>(repo: R, config: AdminConfig) -> Router
where
    R: AdminRepository + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(TokenService::new(&config));

    let state = AdminAppState {
        repo: Arc::new(repo),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/me", get(handlers::me::<R>))
        .route("/", get(handlers::list_admins::<R>))
        .route(
            "/{id}",
            put(handlers::update_admin::<R>).delete(handlers::delete_admin::<R>),
        )
        .route_layer(from_fn_with_state(
            AdminMiddlewareState { tokens },
            require_admin_token,
        ));

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .merge(protected)
        .with_state(state)
}
