//! Application Configuration
//!
//! Configuration for the Admin application layer.

use std::fmt;
use std::time::Duration;

use crate::error::{AdminError, AdminResult};

/// Minimum accepted length of the token signing secret, in bytes
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Default token lifetime (7 days)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Admin application configuration
///
/// There is no `Default`: the signing secret must come from deployment
/// configuration.
#[derive(Clone)]
pub struct AdminConfig {
    /// HMAC secret for signing bearer tokens
    pub token_secret: Vec<u8>,
    /// Bearer token lifetime
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AdminConfig {
    /// Create config with the given signing secret and default TTL
    pub fn new(token_secret: impl Into<Vec<u8>>) -> AdminResult<Self> {
        let token_secret = token_secret.into();
        if token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(AdminError::Internal(format!(
                "Token secret must be at least {} bytes",
                MIN_TOKEN_SECRET_LEN
            )));
        }

        Ok(Self {
            token_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        })
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper.filter(|p| !p.is_empty());
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
