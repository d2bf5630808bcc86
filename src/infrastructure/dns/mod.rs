//! DNS resolution for blacklist probes.

mod hickory_resolver;

pub use hickory_resolver::HickoryResolver;
