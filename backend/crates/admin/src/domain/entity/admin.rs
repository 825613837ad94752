//! Admin Entity
//!
//! A privileged account able to manage listings and other admins.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{AdminId, AdminIdentity, Email};

/// Admin entity
///
/// `password_hash` never leaves the server; presentation builds its own
/// view type from the remaining fields.
#[derive(Debug, Clone)]
pub struct Admin {
    /// Internal UUID identifier
    pub admin_id: AdminId,
    /// Login email (unique, lowercase)
    pub email: Email,
    /// Display name, empty when not provided
    pub name: String,
    /// Argon2id PHC hash
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Create a new admin
    pub fn new(email: Email, name: Option<String>, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            admin_id: AdminId::new(),
            email,
            name: name.map(|n| n.trim().to_string()).unwrap_or_default(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Identity embedded in issued tokens
    pub fn identity(&self) -> AdminIdentity {
        AdminIdentity::new(self.admin_id, self.email.clone())
    }

    /// In-memory counterpart of the repository's partial update
    #[cfg(test)]
    pub(crate) fn apply(&mut self, changes: AdminChanges) {
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(password_hash) = changes.password_hash {
            self.password_hash = password_hash;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of an admin; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct AdminChanges {
    pub email: Option<Email>,
    pub name: Option<String>,
    pub password_hash: Option<HashedPassword>,
}
