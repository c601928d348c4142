//! Endpoint formatting and the sorted endpoint set
//!
//! An endpoint is a directly connectable `host:port` string. IPv6 hosts are
//! bracketed (`[fe80::1]:53`) since the address itself contains colons.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Format an IP address and port as an endpoint string
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are written in their
/// IPv4 form.
pub fn format_endpoint(ip: IpAddr, port: &str) -> String {
    match ip {
        IpAddr::V4(v4) => format!("{v4}:{port}"),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => format!("{v4}:{port}"),
            None => format!("[{v6}]:{port}"),
        },
    }
}

/// Sorted, duplicate-free sequence of endpoint strings
///
/// Every constructor sorts, so two sets with the same members compare equal
/// regardless of the order they were resolved in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EndpointSet(Vec<String>);

impl EndpointSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a set from endpoints in any order
    pub fn from_unsorted(mut endpoints: Vec<String>) -> Self {
        endpoints.sort();
        endpoints.dedup();
        Self(endpoints)
    }

    /// Build a set of endpoints for the given addresses
    pub fn from_ips(ips: impl IntoIterator<Item = IpAddr>, port: &str) -> Self {
        Self::from_unsorted(
            ips.into_iter()
                .map(|ip| format_endpoint(ip, port))
                .collect(),
        )
    }

    /// Number of endpoints
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no endpoints
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `endpoint` is a member
    pub fn contains(&self, endpoint: &str) -> bool {
        self.0.binary_search_by(|e| e.as_str().cmp(endpoint)).is_ok()
    }

    /// Endpoints in ascending order
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterate endpoints in ascending order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Consume the set, returning the sorted endpoints
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for EndpointSet {
    fn from(endpoints: Vec<String>) -> Self {
        Self::from_unsorted(endpoints)
    }
}

impl From<EndpointSet> for Vec<String> {
    fn from(set: EndpointSet) -> Self {
        set.0
    }
}

impl FromIterator<String> for EndpointSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EndpointSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[&str]> for EndpointSet {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for EndpointSet {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

impl fmt::Display for EndpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
