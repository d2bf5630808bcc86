//! DNS resolution seam used by the blacklist gate.

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Resolves a name to its first IPv4 address.
///
/// Implementations report every failure (NXDOMAIN, SERVFAIL, network error) as
/// `None`. Timeouts are imposed by the caller, so an implementation may take
/// arbitrarily long.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, name: &str) -> Option<Ipv4Addr>;
}
