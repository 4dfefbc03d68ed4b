//! Runtime configuration, read once at startup from the environment.

use std::env;

use crate::access::DEFAULT_LICENSE_KEY;

/// Configuration for the dashboard service.
#[derive(Debug, Clone)]
pub struct AetherConfig {
    /// Socket address the HTTP server binds to.
    pub addr: String,
    /// License key that unlocks the report download.
    pub license_key: String,
}

impl Default for AetherConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            license_key: DEFAULT_LICENSE_KEY.to_string(),
        }
    }
}

impl AetherConfig {
    /// Environment overrides: `AETHER_ADDR`, `AETHER_LICENSE_KEY`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            addr: env::var("AETHER_ADDR").unwrap_or(defaults.addr),
            license_key: env::var("AETHER_LICENSE_KEY").unwrap_or(defaults.license_key),
        }
    }
}
