// # Name Lookup Trait
//
// Defines the interface for the name-resolution primitive.
//
// ## Implementations
//
// - System resolver: `lookup::SystemLookup`
// - Tests: scripted lookups in `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use dm_resolver::NameLookup;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let lookup = /* NameLookup implementation */;
//     let ips = lookup.lookup_ip("svc.internal").await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for name-resolution implementations
///
/// # Responsibilities
///
/// A lookup answers one question per call: which addresses does this host
/// have right now. It must not:
/// - Retry or back off (the watch interval is the only retry cadence)
/// - Cache results between calls
/// - Format endpoints or know about ports
///
/// Returning `Ok(vec![])` and returning `Err` are treated the same by the
/// engine: the result is discarded and the known endpoint set is kept.
///
/// # Thread Safety
///
/// Implementations are shared with the watch task and must be `Send + Sync`.
#[async_trait]
pub trait NameLookup: Send + Sync {
    /// Resolve `host` into its IPv4 and IPv6 addresses
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<IpAddr>)`: The addresses, in any order (may be empty)
    /// - `Err(Error)`: If the lookup failed
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, crate::Error>;

    /// Get the lookup name (for logging)
    fn lookup_name(&self) -> &'static str;
}
