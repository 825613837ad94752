//! Admin Identity
//!
//! The `{id, email}` pair carried inside bearer tokens and attached to
//! request extensions by the auth middleware.

use kernel::id::AdminId;

use crate::domain::value_object::email::Email;

/// Identity of an authenticated admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub id: AdminId,
    pub email: Email,
}

impl AdminIdentity {
    pub fn new(id: AdminId, email: Email) -> Self {
        Self { id, email }
    }

    /// Whether this identity refers to the given admin
    pub fn is(&self, admin_id: &AdminId) -> bool {
        &self.id == admin_id
    }
}
