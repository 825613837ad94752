//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod debug;
mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use admin::application::BootstrapAdminInput;
use admin::{AdminConfig, BootstrapAdminUseCase, PgAdminRepository, admin_router};
use axum::extract::State;
use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use listing::{FsMediaStore, ListingConfig, PgListingRepository, listing_router};
use platform::rate_limit::MemoryRateLimitStore;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;
use crate::debug::debug_router;
use crate::rate_limit::{RateLimitState, limit_by_client};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,admin=info,listing=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let started = Instant::now();
    let config = ApiConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Admin configuration
    let admin_config = AdminConfig::new(config.jwt_secret.as_bytes().to_vec())?
        .with_pepper(config.password_pepper.as_ref().map(|p| p.as_bytes().to_vec()));
    let admin_repo = PgAdminRepository::new(pool.clone());

    if let Some(bootstrap) = &config.bootstrap_admin {
        let use_case =
            BootstrapAdminUseCase::new(Arc::new(admin_repo.clone()), Arc::new(admin_config.clone()));
        let created = use_case
            .execute(BootstrapAdminInput {
                email: bootstrap.email.clone(),
                password: bootstrap.password.clone(),
                name: None,
            })
            .await?;
        if created.is_none() {
            tracing::info!("Bootstrap admin skipped, admins already exist");
        }
    }

    // Listing configuration
    FsMediaStore::new(config.uploads_dir.clone())
        .ensure_root()
        .await?;

    let listing_config = ListingConfig::default()
        .with_site_base(config.site_base.clone())
        .with_uploads_dir(config.uploads_dir.clone())
        .with_max_upload_bytes(config.max_upload_bytes);

    // Build router
    let api = api_router(
        admin_router(admin_repo, admin_config),
        listing_router(PgListingRepository::new(pool.clone()), listing_config),
    );

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .merge(health_router(HealthState {
            started,
            environment: config.environment.clone(),
        }))
        .merge(debug_router(config.debug_uploads, config.uploads_dir.clone()))
        .layer(middleware::from_fn_with_state(
            RateLimitState {
                store: Arc::new(MemoryRateLimitStore::new()),
                config: config.rate_limit.clone(),
                trust_proxy: config.trust_proxy,
            },
            limit_by_client::<MemoryRateLimitStore>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.frontend_origins.as_deref()));

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// `/api` routes; anything unmatched below `/api` gets a JSON 404
fn api_router(admin: Router, listings: Router) -> Router {
    Router::new()
        .nest("/admin", admin)
        .nest("/listings", listings)
        .fallback(api_not_found)
}

async fn api_not_found() -> AppError {
    AppError::not_found("API route not found")
}

#[derive(Clone)]
struct HealthState {
    started: Instant,
    environment: String,
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    /// Seconds since startup
    uptime: f64,
    env: String,
}

fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

/// Liveness check. Does not touch the database.
async fn health(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        uptime: state.started.elapsed().as_secs_f64(),
        env: state.environment,
    })
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    match origins {
        Some(origins) => {
            let allowed: Vec<http::HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors.allow_origin(allowed).allow_credentials(true)
        }
        None => cors.allow_origin(AllowOrigin::any()),
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
