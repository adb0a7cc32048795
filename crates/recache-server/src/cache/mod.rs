//! Cache pipeline stage for the recache server.
//!
//! The store itself lives in `recache-core`; this module adds what the HTTP
//! layer needs on top of it: key derivation from requests and the tower
//! layer that intercepts responses.

pub mod keys;
pub mod layer;

// Re-exports
pub use keys::{KeyFn, KeySpec};
pub use layer::{CacheLayer, CacheOptions, CacheService};
