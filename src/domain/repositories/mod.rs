//! Repository trait definitions for the domain layer.
//!
//! These traits are the only persistence surface the core relies on. Concrete
//! implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Lookup and insert-if-absent for short URLs
//! - [`SequenceRepository`] - Monotonic id allocation

pub mod sequence_repository;
pub mod short_url_repository;

pub use sequence_repository::SequenceRepository;
pub use short_url_repository::ShortUrlRepository;

#[cfg(test)]
pub use sequence_repository::MockSequenceRepository;
#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
