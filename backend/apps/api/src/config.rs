//! Server Configuration
//!
//! Read once from the environment at startup (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};

use admin::application::config::MIN_TOKEN_SECRET_LEN;
use listing::application::config::DEFAULT_MAX_UPLOAD_BYTES;
use platform::rate_limit::RateLimitConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_RATE_WINDOW_MS: u64 = 60_000;
const DEFAULT_RATE_MAX: u32 = 120;

#[derive(Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub jwt_secret: String,
    pub password_pepper: Option<String>,
    pub uploads_dir: PathBuf,
    /// Prepended to stored media paths in responses; empty keeps them relative
    pub site_base: String,
    pub max_upload_bytes: usize,
    /// Reported by `/health`
    pub environment: String,
    /// Allowed CORS origins; `None` allows any origin
    pub frontend_origins: Option<Vec<String>>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    /// Requests allowed per client per window
    pub rate_limit: RateLimitConfig,
    /// Key rate limits by `X-Forwarded-For` (set when behind a reverse proxy)
    pub trust_proxy: bool,
    /// Enables `GET /debug/uploads`
    pub debug_uploads: bool,
}

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.len() < MIN_TOKEN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_TOKEN_SECRET_LEN} bytes");
        }

        let bootstrap_admin = match (
            optional("BOOTSTRAP_ADMIN_EMAIL"),
            optional("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            _ => bail!("BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            database_url,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            port: parsed("PORT", DEFAULT_PORT)?,
            jwt_secret,
            password_pepper: optional("PASSWORD_PEPPER"),
            uploads_dir: optional("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR)),
            site_base: optional("SITE_BASE")
                .or_else(|| optional("VITE_API_URL"))
                .unwrap_or_default(),
            max_upload_bytes: parsed("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            environment: optional("NODE_ENV")
                .or_else(|| optional("APP_ENV"))
                .unwrap_or_else(|| "development".to_string()),
            frontend_origins: optional("FRONTEND_ORIGINS").map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            }),
            bootstrap_admin,
            rate_limit: RateLimitConfig::new(
                parsed("RATE_MAX", DEFAULT_RATE_MAX)?,
                Duration::from_millis(parsed("RATE_WINDOW_MS", DEFAULT_RATE_WINDOW_MS)?),
            ),
            trust_proxy: parsed("TRUST_PROXY", false)?,
            debug_uploads: optional("DEBUG_UPLOADS").as_deref() == Some("true"),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Unset and blank are treated the same
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
