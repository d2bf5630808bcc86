//! System DNS resolver backed by hickory.

use std::net::Ipv4Addr;

use anyhow::Context;
use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use tracing::debug;

use crate::domain::resolver::DnsResolver;

/// [`DnsResolver`] using the host's resolver configuration.
pub struct HickoryResolver {
    inner: TokioResolver,
}

impl HickoryResolver {
    /// Builds a resolver from `/etc/resolv.conf` (or the platform equivalent).
    ///
    /// # Errors
    ///
    /// Fails if the system configuration cannot be read.
    pub fn from_system_conf() -> anyhow::Result<Self> {
        let inner = TokioResolver::builder_tokio()
            .context("failed to read system DNS configuration")?
            .build();
        Ok(Self { inner })
    }
}

#[async_trait]
impl DnsResolver for HickoryResolver {
    async fn resolve(&self, name: &str) -> Option<Ipv4Addr> {
        // Fully qualified, so search domains are never appended.
        let fqdn = format!("{}.", name.trim_end_matches('.'));

        match self.inner.ipv4_lookup(fqdn.as_str()).await {
            Ok(lookup) => lookup.iter().next().map(|a| a.0),
            Err(e) => {
                debug!(name, error = %e, "no A record");
                None
            }
        }
    }
}
