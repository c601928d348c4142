//! Endpoint resolution
//!
//! Turns a hostname target into an [`EndpointSet`] through a
//! [`NameLookup`]. Lookup failures are logged and reported as an empty set;
//! callers cannot tell them apart from a host with no records, and the
//! store's accept policy discards both.

use tracing::{debug, warn};

use crate::endpoint::EndpointSet;
use crate::target::Target;
use crate::traits::NameLookup;

/// Resolve `target` into its current endpoints
///
/// Literal targets are answered without a lookup.
pub async fn resolve(lookup: &dyn NameLookup, target: &Target) -> EndpointSet {
    if let Some(endpoint) = target.literal_endpoint() {
        return EndpointSet::from_unsorted(vec![endpoint]);
    }

    match lookup.lookup_ip(target.address()).await {
        Ok(ips) => {
            let endpoints = EndpointSet::from_ips(ips, target.port());
            debug!(
                "Resolved {} via {}: {}",
                target.address(),
                lookup.lookup_name(),
                endpoints
            );
            endpoints
        }
        Err(e) => {
            warn!("Failed to look up {}: {}", target.address(), e);
            EndpointSet::new()
        }
    }
}
