//! Long URL validation and canonicalization.

use std::sync::Arc;

use url::Url;

use crate::application::services::blacklist_gate::BlacklistGate;
use crate::domain::entities::HostLists;

/// Schemes accepted for long URLs.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Reasons a long URL is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlRejection {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Absolute URL required")]
    NoHost,

    #[error("URL scheme {0} not allowed")]
    SchemeNotAllowed(String),

    #[error("{0} is a URL shortener, shorten the original URL instead")]
    IsKnownShortener(String),

    #[error("URL {0} is listed as spam in SURBL or URIBL")]
    Spam(String),

    #[error("{0} is blacklisted")]
    Blacklisted(String),
}

impl UrlRejection {
    /// Stable snake_case identifier of the rejection.
    pub fn kind(&self) -> &'static str {
        match self {
            UrlRejection::InvalidUrl(_) => "invalid_url",
            UrlRejection::NoHost => "no_host",
            UrlRejection::SchemeNotAllowed(_) => "scheme_not_allowed",
            UrlRejection::IsKnownShortener(_) => "is_known_shortener",
            UrlRejection::Spam(_) => "spam",
            UrlRejection::Blacklisted(_) => "blacklisted",
        }
    }
}

/// Validates candidate long URLs.
///
/// # Validation Order
///
/// 1. Parse as absolute URL
/// 2. Require a host
/// 3. Lower-case the host
/// 4. Scheme must be `http`, `https` or `ftp`
/// 5. Host must not be a known shortener
/// 6. Host and its parent domains must not be listed by the DNS blacklists
/// 7. Host must not be on the local blacklist
/// 8. An empty path becomes `/`
///
/// Validation stops at the first failing rule.
pub struct UrlValidator {
    gate: Arc<BlacklistGate>,
    lists: Arc<HostLists>,
}

impl UrlValidator {
    pub fn new(gate: Arc<BlacklistGate>, lists: Arc<HostLists>) -> Self {
        Self { gate, lists }
    }

    /// Validates `input` and returns its canonical form.
    ///
    /// # Errors
    ///
    /// Returns the first [`UrlRejection`] whose rule fails.
    pub async fn validate(&self, input: &str) -> Result<Url, UrlRejection> {
        let mut url = parse_url(input)?;
        let host = url.host_str().unwrap_or_default().to_string();

        if self.lists.is_known_shortener(&host) {
            return Err(UrlRejection::IsKnownShortener(host));
        }

        if self.gate.is_spam(&host).await {
            return Err(UrlRejection::Spam(url.to_string()));
        }

        if self.lists.is_blacklisted(&host) {
            return Err(UrlRejection::Blacklisted(host));
        }

        if url.path().is_empty() {
            url.set_path("/");
        }

        Ok(url)
    }
}

/// Parses `input` and applies the network-free rules (parse, host, scheme).
///
/// # Errors
///
/// Returns [`UrlRejection::InvalidUrl`], [`UrlRejection::NoHost`] or
/// [`UrlRejection::SchemeNotAllowed`].
pub fn parse_url(input: &str) -> Result<Url, UrlRejection> {
    let mut url = Url::parse(input.trim()).map_err(|e| UrlRejection::InvalidUrl(e.to_string()))?;

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_ascii_lowercase(),
        _ => return Err(UrlRejection::NoHost),
    };
    if url.host_str() != Some(host.as_str()) {
        url.set_host(Some(&host))
            .map_err(|e| UrlRejection::InvalidUrl(e.to_string()))?;
    }

    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(UrlRejection::SchemeNotAllowed(url.scheme().to_string()));
    }

    Ok(url)
}
