//! Application layer services implementing business logic.
//!
//! Services consume the repository and resolver traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::blacklist_gate::BlacklistGate`] - DNS blacklist lookups for hosts and IPs
//! - [`services::url_validator::UrlValidator`] - Long URL validation and canonicalization
//! - [`services::sequence_allocator::SequenceAllocator`] - Short code allocation
//! - [`services::short_url_service::ShortUrlService`] - Short URL creation and retrieval

pub mod services;
