//! Core domain for the recache response cache.
//!
//! This crate holds the caching semantics and nothing else: a process-wide
//! TTL store mapping string keys to immutable JSON payloads, with lazy
//! expiry, explicit invalidation, and introspection. The HTTP layer that
//! mounts the store as a pipeline stage lives in `recache-server`.

pub mod entry;
pub mod store;

// Re-exports
pub use entry::CacheEntry;
pub use store::{CacheStats, ResponseCache, DEFAULT_TTL};
