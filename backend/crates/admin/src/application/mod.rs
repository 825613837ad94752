//! Application Layer
//!
//! Use cases and application services.

pub mod bootstrap;
pub mod config;
pub mod current_admin;
pub mod delete_admin;
pub mod list_admins;
pub mod sign_in;
pub mod sign_up;
pub mod token;
pub mod update_admin;

// Re-exports
pub use bootstrap::{BootstrapAdminInput, BootstrapAdminUseCase};
pub use config::AdminConfig;
pub use current_admin::CurrentAdminUseCase;
pub use delete_admin::DeleteAdminUseCase;
pub use list_admins::ListAdminsUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{Claims, IssuedToken, TokenService};
pub use update_admin::{UpdateAdminInput, UpdateAdminUseCase};
