//! Application state.

use std::time::Duration;

use recache_core::ResponseCache;

use crate::catalog::Catalog;
use crate::config::Settings;

/// Application state shared across all handlers.
///
/// The response cache is an explicitly constructed object created here at
/// process start and handed to whichever pipeline stages need it, rather
/// than a module-level singleton; tests build as many independent states
/// (and therefore caches) as they like.
#[derive(Clone)]
pub struct AppState {
    cache: ResponseCache,
    catalog: Catalog,
    cache_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState from the loaded settings.
    pub fn new(settings: &Settings) -> Self {
        Self {
            cache: ResponseCache::new(),
            catalog: Catalog::seeded(),
            cache_ttl: settings.cache.ttl(),
        }
    }

    /// Returns a handle to the response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Returns a handle to the hotel catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Default freshness window for cached responses.
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }
}
