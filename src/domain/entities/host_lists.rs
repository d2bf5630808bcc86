//! Local host lists consulted by the URL validator.

use std::collections::HashSet;
use std::io;
use std::path::Path;

/// Shortening services whose links are refused out of the box.
pub const DEFAULT_SHORTENERS: &[&str] = &[
    "bit.ly",
    "buff.ly",
    "cutt.ly",
    "goo.gl",
    "is.gd",
    "lnkd.in",
    "ow.ly",
    "rebrand.ly",
    "shorturl.at",
    "t.co",
    "tiny.cc",
    "tinyurl.com",
    "v.gd",
];

/// Immutable blacklist and known-shortener sets.
///
/// Loaded once at startup and shared behind an `Arc`. A host matches an entry
/// when it equals the entry or is a subdomain of it.
#[derive(Debug, Clone, Default)]
pub struct HostLists {
    blacklist: HashSet<String>,
    shorteners: HashSet<String>,
}

impl HostLists {
    /// Builds lists from in-memory entries. Entries are lower-cased.
    pub fn new<B, S>(blacklist: B, shorteners: S) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            blacklist: normalize_entries(blacklist),
            shorteners: normalize_entries(shorteners),
        }
    }

    /// Builds lists from the built-in shortener set plus optional files.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a configured file cannot be read.
    pub fn load(blacklist_file: Option<&Path>, shorteners_file: Option<&Path>) -> io::Result<Self> {
        let blacklist = match blacklist_file {
            Some(path) => parse_list(&std::fs::read_to_string(path)?),
            None => Vec::new(),
        };

        let mut shorteners: Vec<String> =
            DEFAULT_SHORTENERS.iter().map(|s| s.to_string()).collect();
        if let Some(path) = shorteners_file {
            shorteners.extend(parse_list(&std::fs::read_to_string(path)?));
        }

        Ok(Self::new(blacklist, shorteners))
    }

    /// Adds a host to the shortener list, typically the service's own host.
    pub fn with_shortener(mut self, host: &str) -> Self {
        self.shorteners.extend(normalize_entries([host]));
        self
    }

    pub fn is_blacklisted(&self, host: &str) -> bool {
        matches_any(&self.blacklist, host)
    }

    pub fn is_known_shortener(&self, host: &str) -> bool {
        matches_any(&self.shorteners, host)
    }

    pub fn blacklist_len(&self) -> usize {
        self.blacklist.len()
    }

    pub fn shorteners_len(&self) -> usize {
        self.shorteners.len()
    }
}

/// Parses a list file: one host per line, `#` starts a comment.
pub fn parse_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_entries<I>(entries: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|e| e.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn matches_any(set: &HashSet<String>, host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let mut candidate = host.as_str();

    loop {
        if set.contains(candidate) {
            return true;
        }
        match candidate.split_once('.') {
            Some((_, parent)) => candidate = parent,
            None => return false,
        }
    }
}
