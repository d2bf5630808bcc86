//! Domain layer containing entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures and provider descriptors
//! - [`repositories`] - Persistence trait definitions
//! - [`resolver`] - DNS resolution trait
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business flows live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod resolver;
