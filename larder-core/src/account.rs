//! Account fields shared by signup and the administrator bootstrap.

use crate::error::ValidationError;
use crate::require_text;

pub const MAX_USERNAME_LEN: usize = 150;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Username and email of a valid new account, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFields {
    pub username: String,
    pub email: String,
}

pub fn validate_account(
    username: &str,
    email: &str,
    password: &str,
) -> Result<AccountFields, ValidationError> {
    let username = require_text("Username", username, Some(MAX_USERNAME_LEN))?;
    let email = require_text("Email", email, Some(MAX_EMAIL_LEN))?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(AccountFields { username, email })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims() {
        let fields = validate_account(" cook ", " cook@example.com", "password").unwrap();
        assert_eq!(fields.username, "cook");
        assert_eq!(fields.email, "cook@example.com");
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(
            validate_account("", "cook@example.com", "password"),
            Err(ValidationError::Blank("Username"))
        );
        assert_eq!(
            validate_account("cook", "not-an-email", "password"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_account("cook", "cook@example.com", "short"),
            Err(ValidationError::PasswordTooShort(8))
        );
    }
}
