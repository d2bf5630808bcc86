//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching, and DNS.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`dns`] - System DNS resolver
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod dns;
pub mod persistence;
