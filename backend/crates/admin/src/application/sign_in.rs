//! Sign In Use Case
//!
//! Authenticates an admin by email + password and issues a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AdminConfig;
use crate::application::sign_up::non_empty;
use crate::application::token::{IssuedToken, TokenService};
use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::Email;
use crate::error::{AdminError, AdminResult};

/// Sign in input
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    pub token: IssuedToken,
    pub admin: Admin,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AdminConfig>,
}

impl<R> SignInUseCase<R>
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

    pub async fn execute(&self, input: SignInInput) -> AdminResult<SignInOutput> {
        let (Some(email), Some(password)) = (non_empty(input.email), non_empty(input.password))
        else {
            return Err(AdminError::MissingFields);
        };

        let email = Email::new(email)?;

        // Unknown email and wrong password produce the same error.
        let admin = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AdminError::InvalidCredentials)?;

        let password = ClearTextPassword::for_verification(password);
        if !admin.password_hash.verify(&password, self.config.pepper()) {
            return Err(AdminError::InvalidCredentials);
        }

        let token = self.tokens.issue(&admin.identity())?;

        tracing::info!(admin_id = %admin.admin_id, "Admin signed in");

        Ok(SignInOutput { token, admin })
    }
}
