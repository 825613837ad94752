//! Value Object Module

pub mod admin_identity;
pub mod email;

pub use admin_identity::AdminIdentity;
pub use email::Email;
pub use kernel::id::AdminId;
