//! Cache entries.

use bytes::Bytes;

/// A single cached response payload together with its expiry instant.
///
/// Entries are owned exclusively by the store and never mutated after
/// creation; a new write for the same key builds a new entry outright.
/// The payload is kept as the serialized JSON bytes the producer emitted,
/// so a replayed hit is bit-for-bit what was originally sent.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    payload: Bytes,
    expires_at_ms: u64,
}

impl CacheEntry {
    /// Creates an entry that stays fresh until `expires_at_ms` (exclusive).
    pub fn new(payload: Bytes, expires_at_ms: u64) -> Self {
        Self {
            payload,
            expires_at_ms,
        }
    }

    /// An entry is fresh while `now < expires_at_ms`. At the boundary
    /// instant itself it is already stale.
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms
    }

    /// The stored JSON payload bytes.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Epoch-millisecond instant at which the entry stops being fresh.
    pub fn expires_at_ms(&self) -> u64 {
        self.expires_at_ms
    }
}
