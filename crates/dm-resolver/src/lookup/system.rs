// # System Lookup
//
// NameLookup backed by the operating system resolver (getaddrinfo through
// `tokio::net::lookup_host`). Returns both IPv4 and IPv6 addresses, in the
// order the system resolver reports them.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::Error;
use crate::traits::NameLookup;

/// Operating system name lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

impl SystemLookup {
    /// Create a new system lookup
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NameLookup for SystemLookup {
    async fn lookup_ip(&self, host: &str) -> Result<Vec<IpAddr>, Error> {
        // The port is required by lookup_host and discarded below
        let addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| Error::lookup(self.lookup_name(), format!("{host}: {e}")))?;

        Ok(addrs.map(|addr| addr.ip()).collect())
    }

    fn lookup_name(&self) -> &'static str {
        "system"
    }
}
