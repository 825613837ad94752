//! Update Admin Use Case
//!
//! Partial update of email, name and password.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AdminConfig;
use crate::application::sign_up::non_empty;
use crate::domain::entity::admin::{Admin, AdminChanges};
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{AdminId, Email};
use crate::error::{AdminError, AdminResult};

/// Update input
///
/// Empty `email`/`password` strings are ignored; a present `name` is
/// applied even when empty.
pub struct UpdateAdminInput {
    pub admin_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateAdminUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AdminConfig>,
}

impl<R> UpdateAdminUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AdminConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: UpdateAdminInput) -> AdminResult<Admin> {
        let admin_id =
            AdminId::parse_str(&input.admin_id).map_err(|_| AdminError::InvalidAdminId)?;

        let email = non_empty(input.email).map(Email::new).transpose()?;

        let password_hash = match non_empty(input.password) {
            Some(raw) => {
                let password = ClearTextPassword::new(raw)?;
                Some(
                    password
                        .hash(self.config.pepper())
                        .map_err(|e| AdminError::Internal(e.to_string()))?,
                )
            }
            None => None,
        };

        let changes = AdminChanges {
            email,
            name: input.name,
            password_hash,
        };

        let admin = self
            .repo
            .update(&admin_id, &changes)
            .await?
            .ok_or(AdminError::AdminNotFound)?;

        tracing::info!(
            admin_id = %admin.admin_id,
            email_changed = changes.email.is_some(),
            password_changed = changes.password_hash.is_some(),
            "Admin updated"
        );

        Ok(admin)
    }
}
