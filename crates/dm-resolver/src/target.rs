//! Target classification
//!
//! The configured address is inspected once. A string that parses as an IP
//! literal is used as-is and never looked up or watched; anything else is
//! treated as a hostname, without further syntax checks. Invalid hostnames
//! simply fail at lookup time.

use crate::endpoint::format_endpoint;
use std::net::IpAddr;

/// Immutable resolution target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    address: String,
    port: String,
    literal: Option<IpAddr>,
}

impl Target {
    /// Classify `address` and pair it with `port`
    pub fn new(address: impl Into<String>, port: impl Into<String>) -> Self {
        let address = address.into();
        let literal = address.parse::<IpAddr>().ok();

        Self {
            address,
            port: port.into(),
            literal,
        }
    }

    /// The configured address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The configured port
    pub fn port(&self) -> &str {
        &self.port
    }

    /// Whether the address is a hostname that must be looked up
    pub fn needs_lookup(&self) -> bool {
        self.literal.is_none()
    }

    /// The single endpoint of a literal target, `None` for hostnames
    pub fn literal_endpoint(&self) -> Option<String> {
        self.literal.map(|ip| format_endpoint(ip, &self.port))
    }
}
