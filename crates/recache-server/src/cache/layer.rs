//! Response-cache middleware stage.
//!
//! A tower layer mounted per route group. `GET` responses that declare a
//! JSON body are stored under a derived key and replayed verbatim while
//! fresh; everything else passes through untouched. The layer is fail-open:
//! nothing it does raises an error, and any inability to cache degrades to
//! behaving as if caching were absent.

use axum::{
    body::Body,
    http::{Method, Request, Response, header, header::HeaderValue},
};
use bytes::Bytes;
use recache_core::{DEFAULT_TTL, ResponseCache};
use std::{
    task::{Context, Poll},
    time::Duration,
};
use tower::{Layer, Service};
use tracing::{debug, warn};

use super::keys::{KeyFn, KeySpec};
use crate::metrics::CacheMetrics;

/// Per-mount cache configuration: how long entries stay fresh and how the
/// key is derived from the request.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    duration: Duration,
    key: KeySpec,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freshness window for entries stored by this mount.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Use a fixed key for every request on this mount. Every request then
    /// shares one cache slot, whatever its URL.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = KeySpec::Literal(key.into());
        self
    }

    /// Derive the key with a caller-supplied function of the request.
    pub fn with_key_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Request<Body>) -> String + Send + Sync + 'static,
    {
        self.key = KeySpec::Custom(std::sync::Arc::new(f) as KeyFn);
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn key_spec(&self) -> &KeySpec {
        &self.key
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_TTL,
            key: KeySpec::Url,
        }
    }
}

/// Layer that serves `GET` responses from the given cache handle.
#[derive(Clone)]
pub struct CacheLayer {
    cache: ResponseCache,
    options: CacheOptions,
    metrics: CacheMetrics,
}

impl CacheLayer {
    pub fn new(cache: ResponseCache, options: CacheOptions) -> Self {
        Self {
            cache,
            options,
            metrics: CacheMetrics::new(),
        }
    }

    /// Layer with default options (URL key, 5-minute TTL).
    pub fn with_defaults(cache: ResponseCache) -> Self {
        Self::new(cache, CacheOptions::default())
    }

    /// Hit/miss counters for this mount.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl<S> Layer<S> for CacheLayer {
    type Service = CacheService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CacheService {
            inner,
            cache: self.cache.clone(),
            options: self.options.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

/// Middleware that intercepts requests and responses around the inner
/// service.
#[derive(Clone)]
pub struct CacheService<S> {
    inner: S,
    cache: ResponseCache,
    options: CacheOptions,
    metrics: CacheMetrics,
}

impl<S> Service<Request<Body>> for CacheService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let cache = self.cache.clone();
        let options = self.options.clone();
        let metrics = self.metrics.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Only reads are cached; everything else passes through with no
            // lookup and no interception.
            if request.method() != Method::GET {
                return inner.call(request).await;
            }

            let key = options.key_spec().derive(&request);

            if let Some(payload) = cache.get(&key) {
                metrics.record_hit();
                debug!(key = %key, "cache hit");
                return Ok(replay(payload));
            }
            metrics.record_miss();

            let response = inner.call(request).await?;

            // Only responses that declare a JSON body are buffered; anything
            // else is forwarded without being touched.
            if !declares_json(&response) {
                return Ok(response);
            }

            let (parts, body) = response.into_parts();
            let bytes = match axum::body::to_bytes(body, usize::MAX).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    // The body stream failed mid-flight; the original bytes
                    // are gone, so deliver what remains of the response.
                    warn!(key = %key, error = %err, "failed to buffer response body");
                    return Ok(Response::from_parts(parts, Body::empty()));
                },
            };

            if serde_json::from_slice::<serde::de::IgnoredAny>(&bytes).is_ok() {
                cache.insert(key, bytes.clone(), options.duration());
                metrics.update_entry_count(cache.len() as u64);
            } else {
                debug!(key = %key, "response body is not valid JSON, not cached");
            }

            Ok(Response::from_parts(parts, Body::from(bytes)))
        })
    }
}

/// Builds the short-circuit response for a hit. Hits always replay as
/// `200 application/json`, matching how the upstream system re-sent cached
/// payloads regardless of the status they were first produced with.
fn replay(payload: Bytes) -> Response<Body> {
    let mut response = Response::new(Body::from(payload));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

fn declares_json(response: &Response<Body>) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

// Behavioral tests go through a real router; see tests/cache_test.rs.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_url_key_and_five_minutes() {
        let options = CacheOptions::default();

        assert_eq!(options.duration(), Duration::from_millis(300_000));
        assert!(matches!(options.key_spec(), KeySpec::Url));
    }

    #[test]
    fn options_builder_overrides() {
        let options = CacheOptions::new()
            .with_duration(Duration::from_millis(1_000))
            .with_key("hotels");

        assert_eq!(options.duration(), Duration::from_millis(1_000));
        assert!(matches!(options.key_spec(), KeySpec::Literal(k) if k == "hotels"));
    }

    #[test]
    fn replay_is_json_ok() {
        let response = replay(Bytes::from_static(b"{\"hotels\":[]}"));

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert!(declares_json(&response));
    }
}
