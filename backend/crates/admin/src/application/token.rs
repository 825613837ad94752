//! Token Service
//!
//! Issues and verifies HS256 bearer tokens carrying `{id, email, iat, exp}`.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AdminConfig;
use crate::domain::value_object::{AdminId, AdminIdentity, Email};
use crate::error::{AdminError, AdminResult};

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin ID
    pub id: Uuid,
    /// Admin email at issuance
    pub email: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies admin bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    pub fn new(config: &AdminConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl: chrono::Duration::from_std(config.token_ttl)
                .unwrap_or_else(|_| chrono::Duration::days(7)),
        }
    }

    /// Issue a token expiring `ttl` from now
    pub fn issue(&self, identity: &AdminIdentity) -> AdminResult<IssuedToken> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if signed at `issued_at`
    pub fn issue_at(
        &self,
        identity: &AdminIdentity,
        issued_at: DateTime<Utc>,
    ) -> AdminResult<IssuedToken> {
        let expires_at = issued_at + self.ttl;

        let claims = Claims {
            id: identity.id.into_uuid(),
            email: identity.email.as_str().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AdminError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature and expiry, returning the embedded identity
    pub fn verify(&self, token: &str) -> AdminResult<AdminIdentity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AdminError::InvalidToken
        })?;

        Ok(AdminIdentity::new(
            AdminId::from_uuid(data.claims.id),
            Email::from_db(data.claims.email),
        ))
    }
}
