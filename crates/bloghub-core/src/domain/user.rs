use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// User entity - an account that can author posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Staff accounts may moderate comments and manage categories/tags.
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new non-staff user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate registration input before an account is created.
    pub fn validate_registration(
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), DomainError> {
        if username.trim().is_empty() {
            return Err(DomainError::Validation("Username is required.".to_string()));
        }
        if !email.contains('@') {
            return Err(DomainError::Validation(
                "Please enter a valid email address.".to_string(),
            ));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_requires_all_fields_valid() {
        assert!(User::validate_registration("sarah", "sarah@example.com", "longenough").is_ok());

        assert!(User::validate_registration("  ", "sarah@example.com", "longenough").is_err());
        assert!(User::validate_registration("sarah", "not-an-email", "longenough").is_err());
        assert!(User::validate_registration("sarah", "sarah@example.com", "short").is_err());
    }
}
