//! Cache administration endpoint handlers.
//!
//! Invalidation and introspection over the shared response cache. Other
//! subsystems call the same store methods directly after their own
//! mutations; these endpoints expose them operationally.

use axum::{
    Json,
    extract::{Query, State},
};
use glob::Pattern;
use recache_core::CacheStats;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for DELETE /cache.
///
/// `key` and `pattern` are mutually exclusive; with neither, the whole
/// store is cleared.
#[derive(Debug, Default, Deserialize)]
pub struct ClearQuery {
    /// Exact cache key to remove.
    pub key: Option<String>,
    /// Glob pattern matched against cache keys.
    pub pattern: Option<String>,
}

/// Response para operaciones de invalidación.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Número de entries invalidadas.
    pub removed: usize,
    /// Mensaje descriptivo.
    pub message: String,
}

/// DELETE /cache[?key=K | ?pattern=P]
#[instrument(skip_all)]
pub async fn clear_cache(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> Result<Json<ClearResponse>, AppError> {
    let cache = state.cache();

    let (removed, message) = match (query.key, query.pattern) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "specify either 'key' or 'pattern', not both".to_string(),
            ));
        },
        (Some(key), None) => {
            // Removing an absent key is not an error.
            let removed = usize::from(cache.invalidate(&key));
            (removed, format!("Removed cache entry '{}'", key))
        },
        (None, Some(pattern)) => {
            let pattern = Pattern::new(&pattern)
                .map_err(|e| AppError::BadRequest(format!("invalid glob pattern: {}", e)))?;
            let removed = cache.invalidate_where(|key| pattern.matches(key));
            (
                removed,
                format!("Removed {} cache entries matching '{}'", removed, pattern),
            )
        },
        (None, None) => {
            let removed = cache.len();
            cache.invalidate_all();
            (removed, format!("Removed all {} cache entries", removed))
        },
    };

    info!(removed = removed, "Cache entries invalidated");

    Ok(Json(ClearResponse { removed, message }))
}

/// GET /cache/stats
///
/// Reports what is physically in the store; stale entries that have not
/// been pruned yet still count.
#[instrument(skip_all)]
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache().stats())
}
