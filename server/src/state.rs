//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! The relay's session table is the only shared state: there is no
//! drawing state on the server.

use crate::config::ServerConfig;
use crate::relay::Relay;

/// Clone is required by Axum; the relay is internally `Arc`-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    #[must_use]
    pub fn new(config: &ServerConfig) -> Self {
        Self { relay: Relay::new(config.channel_capacity) }
    }
}
