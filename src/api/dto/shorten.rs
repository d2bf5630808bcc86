//! DTOs for the JSON shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The long URL. Parsing and the abuse checks happen in the service.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom code.
    #[validate(length(min = 1, max = 64))]
    pub alias: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_error(url: String) -> Option<String> {
        let request = ShortenRequest { url, alias: None };
        let errors = request.validate().err()?;
        errors.field_errors()["url"][0]
            .message
            .as_ref()
            .map(|m| m.to_string())
    }

    #[test]
    fn test_url_length_bounds() {
        assert_eq!(url_error("https://example.com/".to_string()), None);
        assert_eq!(url_error("a".repeat(2048)), None);
    }

    #[test]
    fn test_url_length_message_covers_both_bounds() {
        let expected = Some("URL must be 1-2048 characters".to_string());
        assert_eq!(url_error(String::new()), expected);
        assert_eq!(url_error("a".repeat(2049)), expected);
    }
}
