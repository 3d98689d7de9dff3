//! Input validation helpers
//!
//! Text length limits for user-editable fields and the checks CRUD handlers
//! run before touching the database. SQLite TEXT has no built-in length
//! enforcement.

use validator::ValidateEmail;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Category names
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Restaurant names, first/last names
pub const MAX_NAME_LEN: usize = 100;

/// Restaurant addresses
pub const MAX_ADDRESS_LEN: usize = 200;

/// Regular holiday description ("Mondays", "Every 2nd Tuesday", ...)
pub const MAX_HOLIDAY_LEN: usize = 100;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 15;

/// Postal codes (e.g. 123-4567)
pub const MAX_POSTAL_CODE_LEN: usize = 8;

/// Free-form descriptions
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .for_field(field));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_text_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Validate a possibly-empty string against the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({len} chars, max {max_len})"),
        )
        .for_field(field));
    }
    Ok(())
}

/// Normalize and validate an email address (trimmed, lowercased).
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.len() > MAX_EMAIL_LEN || !email.validate_email() {
        return Err(
            AppError::with_message(ErrorCode::InvalidFormat, "Invalid email address")
                .for_field("email"),
        );
    }
    Ok(email)
}

/// Validate a new password's length.
pub fn validate_password(password: &str, field: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).for_field(field));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Password is too long (max {MAX_PASSWORD_LEN})"),
        )
        .for_field(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text() {
        assert!(validate_required_text("Sushi", "name", 50).is_ok());
        assert_eq!(
            validate_required_text("   ", "name", 50).unwrap_err().code,
            ErrorCode::RequiredField
        );
        assert_eq!(
            validate_required_text(&"x".repeat(51), "name", 50)
                .unwrap_err()
                .code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 8 characters, 24 bytes
        assert!(validate_required_text("東京都千代田区丸", "address", 8).is_ok());
    }

    #[test]
    fn optional_text() {
        assert!(validate_optional_text(&None, "phone_number", 15).is_ok());
        assert!(validate_optional_text(&Some("090-1234-5678".into()), "phone_number", 15).is_ok());
        assert!(
            validate_optional_text(&Some("0".repeat(16)), "phone_number", 15).is_err()
        );
    }

    #[test]
    fn emails() {
        assert_eq!(
            normalize_email("  Guest@Example.COM ").unwrap(),
            "guest@example.com"
        );
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn passwords() {
        assert!(validate_password("correct horse", "password").is_ok());
        assert_eq!(
            validate_password("short", "password").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert!(validate_password(&"p".repeat(129), "password").is_err());
    }
}
