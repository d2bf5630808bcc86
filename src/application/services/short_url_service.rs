//! Short URL creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::application::services::blacklist_gate::BlacklistGate;
use crate::application::services::sequence_allocator::SequenceAllocator;
use crate::application::services::url_validator::UrlValidator;
use crate::domain::entities::{NewShortUrl, ShortUrl, url_hash};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::alias::validate_alias;

/// Service for creating and resolving short URLs.
///
/// Creation runs the creator IP check, URL validation, deduplication by URL
/// hash, and code allocation, in that order.
pub struct ShortUrlService {
    short_url_repository: Arc<dyn ShortUrlRepository>,
    allocator: Arc<SequenceAllocator>,
    validator: Arc<UrlValidator>,
    gate: Arc<BlacklistGate>,
    check_creator_ip: bool,
}

impl ShortUrlService {
    /// Creates a new short URL service.
    pub fn new(
        short_url_repository: Arc<dyn ShortUrlRepository>,
        allocator: Arc<SequenceAllocator>,
        validator: Arc<UrlValidator>,
        gate: Arc<BlacklistGate>,
    ) -> Self {
        Self {
            short_url_repository,
            allocator,
            validator,
            gate,
            check_creator_ip: true,
        }
    }

    /// Enables or disables the creator IP blacklist check.
    pub fn with_creator_ip_check(mut self, enabled: bool) -> Self {
        self.check_creator_ip = enabled;
        self
    }

    /// Creates a short URL, or returns the existing one for the same URL.
    ///
    /// # Deduplication
    ///
    /// The canonical URL is hashed; if a record with that hash exists it is
    /// returned unchanged, even when a different alias was requested. A
    /// duplicate discovered at insert time (a concurrent identical request)
    /// resolves to the record that won.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the creator IP is listed or the URL
    /// is rejected by the validator.
    /// Returns [`AppError::Validation`] if the alias is malformed.
    /// Returns [`AppError::Conflict`] if the requested alias is already taken.
    /// Returns [`AppError::Internal`] on storage or allocation failure.
    pub async fn create(
        &self,
        long_url: &str,
        alias: Option<&str>,
        creator_ip: &str,
    ) -> Result<ShortUrl, AppError> {
        if self.check_creator_ip
            && let Some(provider) = self.gate.classify_ip(creator_ip).await
        {
            metrics::counter!("short_url_rejections_total", "reason" => "creator_ip").increment(1);
            return Err(AppError::forbidden(
                format!("Your IP {} is listed on {}", creator_ip, provider),
                json!({ "reason": "creator_ip_listed", "provider": provider }),
            ));
        }

        let canonical = self.validator.validate(long_url).await.inspect_err(|rejection| {
            metrics::counter!("short_url_rejections_total", "reason" => rejection.kind())
                .increment(1);
        })?;
        let canonical = canonical.to_string();
        let hash = url_hash(&canonical);

        if let Some(existing) = self.short_url_repository.find_by_hash(&hash).await? {
            return Ok(existing);
        }

        if let Some(alias) = alias.map(str::trim).filter(|a| !a.is_empty()) {
            validate_alias(alias)?;
            if self.short_url_repository.exists_code(alias).await? {
                return Err(alias_taken(alias));
            }

            let new_short_url =
                NewShortUrl::new(alias.to_string(), canonical, creator_ip.to_string());
            let record = self
                .short_url_repository
                .insert(new_short_url)
                .await
                .map_err(|e| match e {
                    AppError::Conflict { .. } => alias_taken(alias),
                    other => other,
                })?;
            return Ok(created(record, alias));
        }

        // A code handed out by the allocator can still be claimed by a
        // concurrent alias before the insert lands; draw another one.
        let attempts = self.allocator.max_attempts();
        for _ in 0..attempts {
            let code = self.allocator.next_code().await?;
            let new_short_url =
                NewShortUrl::new(code.clone(), canonical.clone(), creator_ip.to_string());

            match self.short_url_repository.insert(new_short_url).await {
                Ok(record) => return Ok(created(record, &code)),
                Err(AppError::Conflict { .. }) => {
                    debug!(code = %code, "allocated code claimed before insert, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique code",
            json!({ "reason": "counter_exhausted", "attempts": attempts }),
        ))
    }

    /// Retrieves a record by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<ShortUrl, AppError> {
        self.short_url_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Code not found", json!({ "code": code })))
    }

    /// Returns true if the host of a stored long URL is now reported as spam.
    pub async fn target_is_spam(&self, long_url: &str) -> bool {
        let Ok(url) = url::Url::parse(long_url) else {
            return false;
        };
        match url.host_str() {
            Some(host) => self.gate.is_spam(host).await,
            None => false,
        }
    }

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.short_url_repository.count().await
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

/// Logs and counts a record only when this call inserted it.
fn created(record: ShortUrl, code: &str) -> ShortUrl {
    if record.code == code {
        info!(code = %record.code, url = %record.long_url, "short URL created");
        metrics::counter!("short_urls_created_total").increment(1);
    }
    record
}

fn alias_taken(alias: &str) -> AppError {
    AppError::conflict(
        "Alias is already taken",
        json!({ "reason": "alias_taken", "alias": alias }),
    )
}
