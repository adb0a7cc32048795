//! Server configuration.
//!
//! Settings come from three layered sources: built-in defaults, an optional
//! `recache.toml` next to the binary, and `RECACHE_*` environment variables
//! (`RECACHE_PORT=9000`, `RECACHE_CACHE__TTL_MS=60000`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Default freshness window for cached responses, in milliseconds.
    pub ttl_ms: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080_i64)?
            .set_default("cache.ttl_ms", 300_000_i64)?
            .add_source(File::with_name("recache").required(false))
            .add_source(Environment::with_prefix("RECACHE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cache: CacheSettings { ttl_ms: 300_000 },
        }
    }
}
