//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::admin::Admin;

// ============================================================================
// Admin view
// ============================================================================

/// Public view of an admin. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Admin> for AdminView {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.admin_id.to_string(),
            email: admin.email.as_str().to_string(),
            name: admin.name.clone(),
            created_at: admin.created_at,
        }
    }
}

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// Sign up request
///
/// Fields are optional so that absence maps to a domain error rather
/// than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Sign in request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Token + admin, returned by signup and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub admin: AdminView,
}

// ============================================================================
// Admin management
// ============================================================================

/// `{ "admin": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct AdminEnvelope {
    pub admin: AdminView,
}

/// Update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdminRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
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
