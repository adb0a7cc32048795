//! Test helpers para recache-server.

#![allow(dead_code)]

pub mod client;

pub use client::{TestClient, TestResponse};

use recache_server::{AppState, Settings, create_router};

/// Settings de test con el TTL dado en milisegundos.
pub fn settings_with_ttl(ttl_ms: u64) -> Settings {
    let mut settings = Settings::default();
    settings.cache.ttl_ms = ttl_ms;
    settings
}

/// Crea un TestClient sobre el router completo, junto con el state para
/// inspeccionar el cache desde el test.
pub fn client_with_state() -> (TestClient, AppState) {
    let state = AppState::new(&Settings::default());
    (TestClient::new(create_router(state.clone())), state)
}

/// Igual que `client_with_state` pero con TTL corto para tests de expiry.
pub fn client_with_ttl(ttl_ms: u64) -> (TestClient, AppState) {
    let state = AppState::new(&settings_with_ttl(ttl_ms));
    (TestClient::new(create_router(state.clone())), state)
}
