//! Current Admin Use Case
//!
//! Resolves the authenticated identity back to its stored record.

use std::sync::Arc;

use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::AdminIdentity;
use crate::error::{AdminError, AdminResult};

pub struct CurrentAdminUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
}

impl<R> CurrentAdminUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The token may outlive the record it names; that case is NotFound.
    pub async fn execute(&self, identity: &AdminIdentity) -> AdminResult<Admin> {
        self.repo
            .find_by_id(&identity.id)
            .await?
            .ok_or(AdminError::NotFound)
    }
}
