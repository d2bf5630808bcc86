//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortUrl`] - A stored code to long URL mapping
//! - [`Provider`] - A DNS blacklist backend descriptor
//! - [`HostLists`] - Local blacklist and known-shortener sets
//!
//! Entities are plain data with small helpers; orchestration lives in
//! [`crate::application::services`].

pub mod host_lists;
pub mod provider;
pub mod short_url;

pub use host_lists::HostLists;
pub use provider::{BlacklistVerdict, MatchRule, ProbeRule, Provider};
pub use short_url::{NewShortUrl, ShortUrl, url_hash};
