//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortUrlService;
use crate::infrastructure::cache::CacheService;

/// State shared by all HTTP handlers.
///
/// Cheap to clone: every field is reference-counted or small.
#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService>,
    pub cache: Arc<dyn CacheService>,
    /// Public base URL short links are built from, without a trailing slash.
    pub base_url: Arc<str>,
    /// Re-run the spam check on every redirect and answer 410 for listed targets.
    pub recheck_on_redirect: bool,
}

impl AppState {
    pub fn new(
        short_url_service: Arc<ShortUrlService>,
        cache: Arc<dyn CacheService>,
        base_url: &str,
    ) -> Self {
        Self {
            short_url_service,
            cache,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            recheck_on_redirect: false,
        }
    }

    pub fn with_recheck_on_redirect(mut self, enabled: bool) -> Self {
        self.recheck_on_redirect = enabled;
        self
    }

    /// Full short URL for `code`.
    pub fn short_url(&self, code: &str) -> String {
        self.short_url_service.short_url(&self.base_url, code)
    }
}
