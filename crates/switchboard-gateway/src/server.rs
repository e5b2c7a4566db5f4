// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the relay.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use switchboard_core::SwitchboardError;
use switchboard_openai::OpenAiClient;
use switchboard_router::ModelSelector;
use switchboard_streams::StreamRegistry;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Relay behavior knobs for request handling.
///
/// Mirrors the relevant parts of `SwitchboardConfig` to avoid a dependency
/// on the config crate from the gateway crate.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Route model-less requests through the capability selector.
    pub routing_enabled: bool,
    /// Force all auto-routed requests to this model.
    pub force_model: Option<String>,
    /// Token budget forwarded on every upstream request.
    pub max_output_tokens: u32,
    /// Default for the `store` flag when the client does not set it.
    pub store_responses: bool,
    /// Serve the built-in get_weather function tool.
    pub weather_enabled: bool,
}

/// Health state for the health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
///
/// Constructed once at the composition root; every piece is cheap to clone
/// (Arc or handle semantics), and in particular the stream registry is an
/// injected instance rather than a process global so tests can run
/// isolated registries.
#[derive(Clone)]
pub struct GatewayState {
    /// Upstream Responses API client.
    pub client: Arc<OpenAiClient>,
    /// Capability-based model selector.
    pub selector: ModelSelector,
    /// Registry of in-flight streams, keyed by upstream response id.
    pub registry: StreamRegistry,
    /// Relay behavior configuration.
    pub relay: RelayConfig,
    /// Health endpoint state.
    pub health: HealthState,
}

/// Gateway server configuration (mirrors ServerConfig from switchboard-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router over the given state.
///
/// Routes:
/// - `POST /v1/responses` (streaming SSE or JSON)
/// - `POST /v1/responses/tools` (tool-output continuation)
/// - `POST /v1/responses/interrupt`
/// - `GET /v1/responses/interrupt/status`
/// - `GET /health`
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/v1/responses", post(handlers::post_responses))
        .route("/v1/responses/tools", post(handlers::post_responses_tools))
        .route("/v1/responses/interrupt", post(handlers::post_interrupt))
        .route(
            "/v1/responses/interrupt/status",
            get(handlers::get_interrupt_status),
        )
        .route("/health", get(handlers::get_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until the process exits.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
) -> Result<(), SwitchboardError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SwitchboardError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SwitchboardError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_state() -> GatewayState {
        GatewayState {
            client: Arc::new(
                OpenAiClient::new("sk-test", "http://127.0.0.1:9", "gpt-4o").unwrap(),
            ),
            selector: ModelSelector::default(),
            registry: StreamRegistry::new(),
            relay: RelayConfig {
                routing_enabled: true,
                force_model: None,
                max_output_tokens: 4096,
                store_responses: true,
                weather_enabled: true,
            },
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }

    #[test]
    fn gateway_state_is_clone() {
        let state = test_state();
        let _cloned = state.clone();
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3100,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn router_builds_over_test_state() {
        let _app = router(test_state());
    }
}
