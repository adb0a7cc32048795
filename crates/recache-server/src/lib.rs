//! recache server — HTTP service around the TTL response cache.
//!
//! The crate wires the store from `recache-core` into an axum pipeline: a
//! per-route cache layer over the hotel catalog endpoints, administration
//! endpoints for invalidation and introspection, and the ambient stack
//! (request IDs, structured logging, Prometheus metrics, configuration).

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod state;

// Re-exports
pub use cache::{CacheLayer, CacheOptions, KeySpec};
pub use config::Settings;
pub use error::AppError;
pub use handlers::HealthResponse;
pub use recache_core::{CacheStats, ResponseCache};
pub use server::{create_router, create_router_with_metrics, run_server_with_state};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
