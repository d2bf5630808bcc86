//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod health;
pub mod redirect;
pub mod reverse_lookup;
pub mod shorten;

pub use create::create_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use reverse_lookup::reverse_lookup_handler;
pub use shorten::shorten_handler;
