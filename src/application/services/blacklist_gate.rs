//! DNS blacklist gate for domains, free text, and client IPs.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use url::Url;
use tracing::{debug, warn};

use crate::domain::entities::{BlacklistVerdict, Provider};
use crate::domain::resolver::DnsResolver;
use crate::utils::domain_extractor::extract_domains;

/// Queries DNS blacklist providers and aggregates their answers.
///
/// Each provider query is bounded by its own timeout; a timeout or resolution
/// failure counts as "not listed" for that provider only. A single positive
/// answer from any provider is enough to report a listing.
///
/// # Domain path
///
/// Providers are evaluated in order with short-circuit OR. [`Self::is_spam`]
/// additionally walks the host's label suffixes.
///
/// # IP path
///
/// All providers are queried concurrently, one task per provider. The result is
/// the first match in provider order, independent of completion order.
pub struct BlacklistGate {
    resolver: Arc<dyn DnsResolver>,
    domain_providers: Vec<Provider>,
    ip_providers: Vec<Provider>,
}

impl BlacklistGate {
    /// Creates a gate with explicit provider sets.
    ///
    /// `ip_providers` order is the priority order for [`Self::classify_ip`].
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        domain_providers: Vec<Provider>,
        ip_providers: Vec<Provider>,
    ) -> Self {
        Self {
            resolver,
            domain_providers,
            ip_providers,
        }
    }

    /// Creates a gate with the reference providers, all using `timeout`.
    pub fn with_default_providers(resolver: Arc<dyn DnsResolver>, timeout: Duration) -> Self {
        let apply = |providers: Vec<Provider>| {
            providers
                .into_iter()
                .map(|p| p.with_timeout(timeout))
                .collect::<Vec<_>>()
        };

        Self::new(
            resolver,
            apply(Provider::default_domain_providers()),
            apply(Provider::default_ip_providers()),
        )
    }

    /// Checks a single domain against the domain providers.
    pub async fn is_domain_blacklisted(&self, domain: &str) -> bool {
        for provider in &self.domain_providers {
            let verdict = query(self.resolver.as_ref(), provider, domain).await;
            if verdict.matched {
                return true;
            }
        }
        false
    }

    /// Checks a domain or absolute URI and each of its label suffixes.
    ///
    /// A URI is reduced to its host first. For `a.b.example.com` this probes
    /// `example.com`, `b.example.com` and `a.b.example.com` in that order,
    /// returning on the first listing. A single-label host is probed as-is.
    pub async fn is_spam(&self, domain_or_uri: &str) -> bool {
        let parsed = Url::parse(domain_or_uri.trim()).ok();
        let host = parsed
            .as_ref()
            .and_then(|url| url.host_str())
            .unwrap_or(domain_or_uri)
            .trim()
            .trim_end_matches('.');
        let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
        if labels.is_empty() {
            return false;
        }

        for len in 2.min(labels.len())..=labels.len() {
            let suffix = labels[labels.len() - len..].join(".");
            if self.is_domain_blacklisted(&suffix).await {
                debug!(host, suffix = %suffix, "host is listed through suffix");
                return true;
            }
        }
        false
    }

    /// Returns the first domain mentioned in `text` that is listed.
    pub async fn first_blacklisted_in_text(&self, text: &str) -> Option<String> {
        for domain in extract_domains(text) {
            if self.is_domain_blacklisted(&domain).await {
                return Some(domain);
            }
        }
        None
    }

    /// Classifies a client IP against the IP providers.
    ///
    /// Returns the label of the highest-priority provider that lists the
    /// address. Unparseable input is treated as unlisted without any query.
    pub async fn classify_ip(&self, ip: &str) -> Option<&'static str> {
        if ip.trim().parse::<std::net::IpAddr>().is_err() {
            debug!(ip, "not an IP address, skipping IP blacklists");
            return None;
        }

        let mut tasks = JoinSet::new();
        for (slot, provider) in self.ip_providers.iter().enumerate() {
            let Some(name) = provider.probe_name(ip) else {
                continue;
            };
            let resolver = Arc::clone(&self.resolver);
            let provider = provider.clone();

            tasks.spawn(async move {
                let answer = resolve_bounded(resolver.as_ref(), &provider, &name).await;
                (slot, BlacklistVerdict::evaluate(&provider, answer))
            });
        }

        let mut slots: Vec<Option<BlacklistVerdict>> = vec![None; self.ip_providers.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, verdict)) => slots[slot] = Some(verdict),
                Err(e) => warn!("blacklist lookup task failed: {}", e),
            }
        }

        let label = slots
            .into_iter()
            .flatten()
            .find(|verdict| verdict.matched)
            .and_then(|verdict| verdict.provider);

        if let Some(label) = label {
            record_hit(label);
        }
        label
    }

    pub fn domain_providers(&self) -> &[Provider] {
        &self.domain_providers
    }

    pub fn ip_providers(&self) -> &[Provider] {
        &self.ip_providers
    }
}

async fn query(resolver: &dyn DnsResolver, provider: &Provider, subject: &str) -> BlacklistVerdict {
    let Some(name) = provider.probe_name(subject) else {
        return BlacklistVerdict::clean();
    };

    let answer = resolve_bounded(resolver, provider, &name).await;
    let verdict = BlacklistVerdict::evaluate(provider, answer);
    if verdict.matched {
        record_hit(provider.label);
    }
    verdict
}

async fn resolve_bounded(
    resolver: &dyn DnsResolver,
    provider: &Provider,
    name: &str,
) -> Option<std::net::Ipv4Addr> {
    match tokio::time::timeout(provider.timeout, resolver.resolve(name)).await {
        Ok(answer) => {
            debug!(provider = provider.name, name, ?answer, "blacklist answer");
            answer
        }
        Err(_) => {
            debug!(
                provider = provider.name,
                name,
                timeout_ms = provider.timeout.as_millis() as u64,
                "blacklist query timed out"
            );
            None
        }
    }
}

fn record_hit(label: &'static str) {
    metrics::counter!("blacklist_hits_total", "provider" => label).increment(1);
}
