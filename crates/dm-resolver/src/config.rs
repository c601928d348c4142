//! Configuration types for the resolver
//!
//! A [`ResolverConfig`] is created once and is immutable after it has been
//! handed to a [`DomainResolver`](crate::DomainResolver).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Literal IP address or hostname to resolve
    pub address: String,

    /// Port appended to every resolved address
    pub port: String,

    /// Periodic refresh settings (ignored for literal addresses)
    #[serde(default)]
    pub watch: WatchConfig,
}

impl ResolverConfig {
    /// Create a configuration with watching disabled
    pub fn new(address: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: port.into(),
            watch: WatchConfig::default(),
        }
    }

    /// Enable watching with the given refresh interval
    ///
    /// Sub-second precision is dropped; the interval is kept in whole seconds.
    pub fn with_watch(mut self, interval: Duration) -> Self {
        self.watch = WatchConfig {
            enabled: true,
            interval_secs: interval.as_secs(),
        };
        self
    }

    /// Disable watching
    pub fn without_watch(mut self) -> Self {
        self.watch.enabled = false;
        self
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.address.trim().is_empty() {
            return Err(crate::Error::config("Address cannot be empty"));
        }

        if self.port.trim().is_empty() {
            return Err(crate::Error::config("Port cannot be empty"));
        }

        self.watch.validate()
    }
}

/// Longest accepted refresh interval (one day)
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// Periodic refresh configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Whether the endpoint set is refreshed periodically
    #[serde(default)]
    pub enabled: bool,

    /// Refresh interval (in seconds)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl WatchConfig {
    /// Refresh interval as a [`Duration`]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Validate the watch configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.enabled {
            return Ok(());
        }

        if self.interval_secs == 0 {
            return Err(crate::Error::config(
                "Refresh interval must be > 0 when watching is enabled",
            ));
        }

        if self.interval_secs > MAX_INTERVAL_SECS {
            return Err(crate::Error::config(format!(
                "Refresh interval must be at most {MAX_INTERVAL_SECS} seconds. Got: {}",
                self.interval_secs
            )));
        }

        Ok(())
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    30
}
