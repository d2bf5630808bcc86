//! Reserved words and validation for user-chosen aliases.

use crate::error::AppError;
use crate::utils::numeral::is_alphabet_str;
use serde_json::json;

/// Maximum alias length accepted from users.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Codes that collide with routing prefixes and are never issued.
pub const RESERVED_CODES: &[&str] = &["api", "static", "health"];

/// Returns true if `code` is reserved for a system route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a user-provided alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Characters: symbols of the code alphabet only, so an alias is always a
///   valid path segment
/// - Cannot be a reserved system code
///
/// Existence is checked by the caller against the store.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            format!("Alias must be 1-{} characters", MAX_ALIAS_LENGTH),
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !is_alphabet_str(alias) {
        return Err(AppError::bad_request(
            "Alias can only contain letters, digits, '-', '_' and '='",
            json!({ "alias": alias }),
        ));
    }

    if is_reserved(alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
