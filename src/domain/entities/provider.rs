//! DNS blacklist provider descriptors.
//!
//! Every provider speaks the same transport (an A lookup of a crafted probe
//! name) but signals a listing differently. A [`Provider`] bundles the probe
//! construction rule and the interpretation of the returned address so the gate
//! can treat all of them uniformly.
//!
//! # Reference providers
//!
//! | Provider | Zone | Probe | Listed when |
//! |----------|------|-------|-------------|
//! | URIBL | `multi.uribl.com` | domain | exactly `127.0.0.2` |
//! | SURBL | `multi.surbl.org` | domain | any `127.0.0.x` |
//! | Spamhaus SBL | `sbl.spamhaus.org` | reversed IP | any answer |
//! | Spambag | `blacklist.spambag.org` | reversed IP | any answer |
//! | SORBS SPEWS | `spews.dnsbl.sorbs.net` | reversed IP | any answer |
//! | SECTOOR Tor | `tor.dnsbl.sectoor.de` | reversed IP | exactly `127.0.0.1` |

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

/// Default per-query timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// How the probe subject is turned into the leftmost labels of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeRule {
    /// `<subject>.<zone>`, used for domain lists.
    Subject,
    /// `<reversed ip>.<zone>`, the standard DNSBL convention.
    ReversedIp,
}

/// Predicate over the address a probe resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Any successful resolution means "listed".
    AnyAddress,
    /// Only this sentinel address means "listed".
    Exact(Ipv4Addr),
    /// Any address starting with these octets means "listed".
    Prefix([u8; 3]),
}

impl MatchRule {
    pub fn matches(&self, addr: Ipv4Addr) -> bool {
        match self {
            MatchRule::AnyAddress => true,
            MatchRule::Exact(expected) => addr == *expected,
            MatchRule::Prefix(prefix) => addr.octets()[..3] == prefix[..],
        }
    }
}

/// A single blacklist backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Short identifier used in logs and metrics.
    pub name: &'static str,
    /// Label reported to callers when this provider matches.
    pub label: &'static str,
    pub zone: &'static str,
    pub probe: ProbeRule,
    pub rule: MatchRule,
    pub timeout: Duration,
}

impl Provider {
    /// Builds the query name for `subject`.
    ///
    /// Returns `None` when a [`ProbeRule::ReversedIp`] provider receives
    /// something that is not an IP address.
    pub fn probe_name(&self, subject: &str) -> Option<String> {
        let head = match self.probe {
            ProbeRule::Subject => subject.trim_end_matches('.').to_string(),
            ProbeRule::ReversedIp => reverse_ip(&subject.trim().parse::<IpAddr>().ok()?),
        };
        Some(format!("{}.{}", head, self.zone))
    }

    /// Returns a copy with a different timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn uribl() -> Self {
        Self {
            name: "uribl",
            label: "uribl.com",
            zone: "multi.uribl.com",
            probe: ProbeRule::Subject,
            rule: MatchRule::Exact(Ipv4Addr::new(127, 0, 0, 2)),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn surbl() -> Self {
        Self {
            name: "surbl",
            label: "surbl.org",
            zone: "multi.surbl.org",
            probe: ProbeRule::Subject,
            rule: MatchRule::Prefix([127, 0, 0]),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn spamhaus() -> Self {
        Self {
            name: "spamhaus",
            label: "spamhaus.org",
            zone: "sbl.spamhaus.org",
            probe: ProbeRule::ReversedIp,
            rule: MatchRule::AnyAddress,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn spambag() -> Self {
        Self {
            name: "spambag",
            label: "spambag.org",
            zone: "blacklist.spambag.org",
            probe: ProbeRule::ReversedIp,
            rule: MatchRule::AnyAddress,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn sorbs_spews() -> Self {
        Self {
            name: "sorbs-spews",
            label: "spews.org",
            zone: "spews.dnsbl.sorbs.net",
            probe: ProbeRule::ReversedIp,
            rule: MatchRule::AnyAddress,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn sectoor_tor() -> Self {
        Self {
            name: "sectoor-tor",
            label: "Tor",
            zone: "tor.dnsbl.sectoor.de",
            probe: ProbeRule::ReversedIp,
            rule: MatchRule::Exact(Ipv4Addr::new(127, 0, 0, 1)),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Domain providers in evaluation order.
    pub fn default_domain_providers() -> Vec<Provider> {
        vec![Self::uribl(), Self::surbl()]
    }

    /// IP providers in priority order.
    pub fn default_ip_providers() -> Vec<Provider> {
        vec![
            Self::spamhaus(),
            Self::spambag(),
            Self::sorbs_spews(),
            Self::sectoor_tor(),
        ]
    }
}

/// Outcome of a single provider query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistVerdict {
    pub matched: bool,
    pub provider: Option<&'static str>,
    pub address: Option<Ipv4Addr>,
}

impl BlacklistVerdict {
    pub fn clean() -> Self {
        Self {
            matched: false,
            provider: None,
            address: None,
        }
    }

    /// Evaluates a provider answer. A missing answer is never a match.
    pub fn evaluate(provider: &Provider, address: Option<Ipv4Addr>) -> Self {
        let matched = address.is_some_and(|addr| provider.rule.matches(addr));
        Self {
            matched,
            provider: matched.then_some(provider.label),
            address,
        }
    }
}

/// Reverses an address for DNSBL lookup.
///
/// IPv4 `1.2.3.4` becomes `4.3.2.1`; IPv6 becomes its 32 reversed nibbles.
/// An IPv4-mapped IPv6 address (`::ffff:1.2.3.4`) is reversed as its IPv4 form.
pub fn reverse_ip(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => reverse_ipv4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => reverse_ipv4(&v4),
            None => reverse_ipv6(v6),
        },
    }
}

fn reverse_ipv4(v4: &Ipv4Addr) -> String {
    let o = v4.octets();
    format!("{}.{}.{}.{}", o[3], o[2], o[1], o[0])
}

fn reverse_ipv6(v6: &Ipv6Addr) -> String {
    v6
        .octets()
        .iter()
        .rev()
        .flat_map(|b| [b & 0x0f, b >> 4])
        .map(|nibble| format!("{:x}", nibble))
        .collect::<Vec<_>>()
        .join(".")
}
