//! recache server binary.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use recache_server::metrics::init_metrics;
use recache_server::{AppState, Settings, run_server_with_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load configuration")?;

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .context("invalid bind address")?;

    tracing::info!(
        "Starting recache server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!(
        ttl_ms = settings.cache.ttl_ms,
        "Response cache default TTL configured"
    );

    let prometheus_handle = init_metrics();
    let state = AppState::new(&settings);

    run_server_with_state(addr, state, prometheus_handle).await?;

    Ok(())
}
