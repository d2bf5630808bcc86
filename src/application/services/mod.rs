//! Business logic services for the application layer.

pub mod blacklist_gate;
pub mod sequence_allocator;
pub mod short_url_service;
pub mod url_validator;

pub use blacklist_gate::BlacklistGate;
pub use sequence_allocator::SequenceAllocator;
pub use short_url_service::ShortUrlService;
pub use url_validator::{UrlRejection, UrlValidator};
