//! Sign Up Use Case
//!
//! Creates a new admin account. The caller must already be authenticated;
//! creating the very first admin is handled at process bootstrap.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AdminConfig;
use crate::application::token::{IssuedToken, TokenService};
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::Email;
use crate::error::{AdminError, AdminResult};

/// Sign up input
pub struct SignUpInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Sign up output
pub struct SignUpOutput {
    pub token: IssuedToken,
    pub admin: Admin,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AdminConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AdminConfig>) -> Self {
        Self {
            repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AdminResult<SignUpOutput> {
        let (Some(email), Some(password)) = (non_empty(input.email), non_empty(input.password))
        else {
            return Err(AdminError::MissingFields);
        };

        let email = Email::new(email)?;
        let password = ClearTextPassword::new(password)?;

        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AdminError::Internal(e.to_string()))?;

        let admin = Admin::new(email, input.name, password_hash);

        // Uniqueness is decided by the store, not by a prior read.
        self.repo.create(&admin).await?;

        let token = self.tokens.issue(&admin.identity())?;

        tracing::info!(
            admin_id = %admin.admin_id,
            email = %admin.email,
            "Admin created"
        );

        Ok(SignUpOutput { token, admin })
    }
}

/// Treat empty strings like absent fields
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
