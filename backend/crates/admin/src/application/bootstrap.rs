//! Bootstrap Admin Use Case
//!
//! Signup requires an authenticated caller, so the first admin has to come
//! from deployment configuration. Runs once at startup and only acts on an
//! empty admins table.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AdminConfig;
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::Email;
use crate::error::{AdminError, AdminResult};

pub struct BootstrapAdminInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

pub struct BootstrapAdminUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AdminConfig>,
}

impl<R> BootstrapAdminUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AdminConfig>) -> Self {
        Self { repo, config }
    }

    /// Returns the created admin, or `None` if admins already exist.
    pub async fn execute(&self, input: BootstrapAdminInput) -> AdminResult<Option<Admin>> {
        if self.repo.count().await? > 0 {
            tracing::debug!("Admins present, skipping bootstrap");
            return Ok(None);
        }

        let email = Email::new(&input.email)?;
        let password = ClearTextPassword::new(input.password)?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AdminError::Internal(e.to_string()))?;

        let admin = Admin::new(email, input.name, password_hash);

        match self.repo.create(&admin).await {
            Ok(()) => {}
            // Another instance bootstrapped concurrently.
            Err(AdminError::AdminExists) => return Ok(None),
            Err(e) => return Err(e),
        }

        tracing::info!(admin_id = %admin.admin_id, email = %admin.email, "Bootstrap admin created");

        Ok(Some(admin))
    }
}
