use std::net::SocketAddr;

use axum::{
    Router, middleware,
    routing::{delete, get},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::cache::{CacheLayer, CacheOptions};
use crate::handlers::{
    admin::{cache_stats, clear_cache},
    health::health_check,
    hotels::{create_hotel, get_hotel, list_hotels},
    metrics::metrics_handler,
};
use crate::middleware::{LoggingLayer, RequestIdLayer};
use crate::state::AppState;

/// Creates the application router with the given state.
///
/// The cache layer is mounted only on the catalog routes; administration
/// and health stay uncached. Tests build routers through this function so
/// every test gets its own cache instance via its own `AppState`.
pub fn create_router(state: AppState) -> Router {
    let middleware_stack = ServiceBuilder::new()
        .layer(RequestIdLayer)
        .layer(LoggingLayer);

    let cache_options = CacheOptions::new().with_duration(state.cache_ttl());
    let cache_layer = CacheLayer::new(state.cache().clone(), cache_options);

    // Cached catalog routes. The layer gates on the method itself, so the
    // POST on the same path passes through it untouched.
    let catalog_router = Router::new()
        .route("/api/hotels", get(list_hotels).post(create_hotel))
        .route("/api/hotels/{id}", get(get_hotel))
        .route_layer(cache_layer)
        .with_state(state.clone());

    // Cache administration routes
    let admin_router = Router::new()
        .route("/health", get(health_check))
        .route("/cache", delete(clear_cache))
        .route("/cache/stats", get(cache_stats))
        .with_state(state);

    Router::new()
        .merge(catalog_router)
        .merge(admin_router)
        .layer(CorsLayer::permissive())
        .layer(middleware_stack)
}

/// Creates the router plus the Prometheus scrape endpoint.
pub fn create_router_with_metrics(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    create_router(state)
        .merge(metrics_router)
        // HTTP metrics middleware
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ))
}

/// Runs the server with the given state and metrics handle.
pub async fn run_server_with_state(
    addr: SocketAddr,
    state: AppState,
    prometheus_handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = create_router_with_metrics(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
