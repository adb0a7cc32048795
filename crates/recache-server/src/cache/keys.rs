//! Cache key derivation.

use axum::{body::Body, http::Request};
use std::fmt;
use std::sync::Arc;

/// Function that derives a cache key from an inbound request.
pub type KeyFn = Arc<dyn Fn(&Request<Body>) -> String + Send + Sync>;

/// How the cache key for a mounted route is computed.
///
/// The key alone identifies a cache slot: two logically different requests
/// that derive the same string collide and share the slot. With
/// [`KeySpec::Literal`] that is exactly what happens for every request on
/// the route; it is a documented sharp edge of the configuration surface,
/// kept as-is rather than silently rejected.
#[derive(Clone, Default)]
pub enum KeySpec {
    /// The request's full original URL: path plus query string. Two
    /// requests that differ only in the query string cache independently.
    #[default]
    Url,
    /// A fixed key for every request hitting the route.
    Literal(String),
    /// A caller-supplied function of the request.
    Custom(KeyFn),
}

impl KeySpec {
    /// Derives the cache key for `request`.
    pub fn derive(&self, request: &Request<Body>) -> String {
        match self {
            KeySpec::Url => request
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| request.uri().path().to_string()),
            KeySpec::Literal(key) => key.clone(),
            KeySpec::Custom(f) => f(request),
        }
    }
}

impl fmt::Debug for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpec::Url => f.write_str("Url"),
            KeySpec::Literal(key) => f.debug_tuple("Literal").field(key).finish(),
            KeySpec::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        KeySpec::Literal(key.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(key: String) -> Self {
        KeySpec::Literal(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn url_key_includes_path_and_query() {
        let spec = KeySpec::default();

        assert_eq!(spec.derive(&request("/api/hotels")), "/api/hotels");
        assert_eq!(
            spec.derive(&request("/api/hotels?city=NY")),
            "/api/hotels?city=NY"
        );
    }

    #[test]
    fn url_key_distinguishes_query_strings() {
        let spec = KeySpec::Url;

        assert_ne!(
            spec.derive(&request("/api/hotels?city=NY")),
            spec.derive(&request("/api/hotels?city=LA"))
        );
    }

    #[test]
    fn literal_key_ignores_the_request() {
        let spec = KeySpec::from("hotels");

        assert_eq!(spec.derive(&request("/api/hotels?city=NY")), "hotels");
        assert_eq!(spec.derive(&request("/totally/elsewhere")), "hotels");
    }

    #[test]
    fn custom_key_sees_the_request() {
        let spec = KeySpec::Custom(Arc::new(|req: &Request<Body>| {
            format!("{}:{}", req.method(), req.uri().path())
        }));

        assert_eq!(spec.derive(&request("/api/hotels?x=1")), "GET:/api/hotels");
    }
}
