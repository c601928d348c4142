//! Collaborator interfaces
//!
//! - [`NameLookup`]: Turn a hostname into IP addresses
//! - [`EndpointSink`]: Receive published endpoint sets

pub mod endpoint_sink;
pub mod name_lookup;

pub use endpoint_sink::EndpointSink;
pub use name_lookup::NameLookup;
