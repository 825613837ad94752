//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Cross-record rules are the store's job: email uniqueness is enforced at
//! write time and the last-admin rule is checked atomically with the delete.

use crate::domain::entity::admin::{Admin, AdminChanges};
use crate::domain::value_object::{AdminId, Email};
use crate::error::AdminResult;

/// Result of a guarded delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Record removed
    Deleted,
    /// Only one admin exists; nothing removed
    LastAdmin,
    /// No record with that id
    NotFound,
}

/// Admin repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Insert a new admin.
    ///
    /// Fails with `AdminError::AdminExists` if the email is already taken.
    async fn create(&self, admin: &Admin) -> AdminResult<()>;

    /// Find admin by ID
    async fn find_by_id(&self, admin_id: &AdminId) -> AdminResult<Option<Admin>>;

    /// Find admin by (normalized) email
    async fn find_by_email(&self, email: &Email) -> AdminResult<Option<Admin>>;

    /// All admins, newest first
    async fn list_newest_first(&self) -> AdminResult<Vec<Admin>>;

    /// Apply a partial update and return the updated record.
    ///
    /// Returns `Ok(None)` when the admin does not exist. Fails with
    /// `AdminError::EmailInUse` if the new email belongs to another admin.
    async fn update(&self, admin_id: &AdminId, changes: &AdminChanges)
    -> AdminResult<Option<Admin>>;

    /// Delete unless it would leave zero admins. Count check and delete are atomic.
    async fn delete_unless_last(&self, admin_id: &AdminId) -> AdminResult<DeleteOutcome>;

    /// Number of admins
    async fn count(&self) -> AdminResult<u64>;
}
