//! Utility functions for code generation, text scanning, and request handling.
//!
//! - [`numeral`] - Integer to short code numeral system
//! - [`alias`] - Custom code and reserved word rules
//! - [`domain_extractor`] - Candidate domain extraction from free text
//! - [`target`] - Redirect target construction

pub mod alias;
pub mod domain_extractor;
pub mod numeral;
pub mod target;
