//! Email Value Object
//!
//! Represents a validated, lowercase-normalized admin email address.
//! Uniqueness is a store concern; this type only guarantees shape.

use std::str::FromStr;

use crate::error::AdminError;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    ///
    /// Input is trimmed and lowercased before the format check, so
    /// `Admin@Example.COM` and `admin@example.com` are the same address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, AdminError> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH || !Self::is_valid_format(&email) {
            return Err(AdminError::InvalidEmail);
        }

        Ok(Self(email))
    }

    /// `<local>@<domain>` where neither part contains `@` or whitespace,
    /// and the domain has at least one interior dot.
    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        let clean = |part: &str| !part.is_empty() && !part.chars().any(|c| c == '@' || c.is_whitespace());
        if !clean(local) || !clean(domain) {
            return false;
        }

        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, AdminError> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
