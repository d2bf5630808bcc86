//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - PostgreSQL short URL storage
//! - [`PgSequenceRepository`] - PostgreSQL `SEQUENCE` counter
//! - [`InMemoryShortUrlRepository`] / [`InMemorySequenceRepository`] - process-local versions

pub mod memory;
pub mod pg_sequence_repository;
pub mod pg_short_url_repository;

pub use memory::{InMemorySequenceRepository, InMemoryShortUrlRepository};
pub use pg_sequence_repository::PgSequenceRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
