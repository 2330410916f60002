//! Small helpers shared across the domain modules.

use crate::errors::{Error, Result, ValidationError};

/// Shared email shape check. Kept deliberately loose; the store is not a
/// mail validator. Uniqueness is enforced separately by the storage layer.
pub fn validate_email(email: &str) -> Result<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "email".to_string(),
        )));
    }
    if !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "'{}' is not a valid email address",
            email
        ))));
    }
    Ok(())
}

/// Rejects empty or whitespace-only required text fields.
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            field.to_string(),
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_plain_address() {
        assert!(validate_email("head@school.example").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_empty() {
        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@leading").is_err());
        assert!(validate_email("trailing@").is_err());
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("name", "Aisha").is_ok());
        assert!(require_text("name", " ").is_err());
    }
}
