//! Delete Admin Use Case
//!
//! Refuses self-deletion and deletion of the last remaining admin.

use std::sync::Arc;

use crate::domain::repository::{AdminRepository, DeleteOutcome};
use crate::domain::value_object::{AdminId, AdminIdentity};
use crate::error::{AdminError, AdminResult};

pub struct DeleteAdminUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteAdminUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, caller: &AdminIdentity, target_id: &str) -> AdminResult<()> {
        let target_id = AdminId::parse_str(target_id).map_err(|_| AdminError::InvalidAdminId)?;

        tracing::info!(
            target_admin_id = %target_id,
            by = %caller.id,
            "Admin delete requested"
        );

        if caller.is(&target_id) {
            return Err(AdminError::CannotDeleteSelf);
        }

        match self.repo.delete_unless_last(&target_id).await? {
            DeleteOutcome::Deleted => {
                tracing::info!(admin_id = %target_id, "Admin deleted");
                Ok(())
            }
            DeleteOutcome::LastAdmin => Err(AdminError::LastAdmin),
            DeleteOutcome::NotFound => Err(AdminError::AdminNotFound),
        }
    }
}
