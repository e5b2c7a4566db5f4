// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchboard serve` command implementation.
//!
//! The composition root: constructs the OpenAI client, the model selector,
//! and the stream registry, wires them into the gateway state, and runs
//! the HTTP server until a shutdown signal arrives. The registry is built
//! here and injected so nothing in the workspace depends on ambient
//! process state.

use std::sync::Arc;

use switchboard_config::model::SwitchboardConfig;
use switchboard_core::SwitchboardError;
use switchboard_gateway::server::start_server;
use switchboard_gateway::{GatewayState, HealthState, RelayConfig, ServerConfig};
use switchboard_openai::OpenAiClient;
use switchboard_router::ModelSelector;
use switchboard_streams::StreamRegistry;
use tracing::{error, info};

/// Runs the `switchboard serve` command.
pub async fn run_serve(config: SwitchboardConfig) -> Result<(), SwitchboardError> {
    init_tracing(&config.server.log_level);

    info!("starting switchboard serve");

    let client = Arc::new(OpenAiClient::from_config(&config.openai).map_err(|e| {
        error!(error = %e, "failed to initialize OpenAI client");
        eprintln!(
            "error: OpenAI API key required. Set via openai.api_key in switchboard.toml \
             or the OPENAI_API_KEY environment variable."
        );
        e
    })?);

    let registry = StreamRegistry::new();
    let selector = ModelSelector::default();

    let state = GatewayState {
        client,
        selector,
        registry: registry.clone(),
        relay: RelayConfig {
            routing_enabled: config.routing.enabled,
            force_model: config.routing.force_model.clone(),
            max_output_tokens: config.openai.max_output_tokens,
            store_responses: config.openai.store,
            weather_enabled: config.tools.weather_enabled,
        },
        health: HealthState {
            start_time: std::time::Instant::now(),
        },
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let server = tokio::spawn(async move {
        if let Err(e) = start_server(&server_config, state).await {
            error!(error = %e, "gateway server error");
        }
    });

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| SwitchboardError::Internal(format!("failed to listen for shutdown: {e}")))?;

    info!("shutdown signal received");

    // Best-effort: signal any in-flight upstream streams before exit.
    let interrupted = registry.interrupt_all();
    if interrupted > 0 {
        info!(interrupted, "interrupted in-flight streams at shutdown");
    }

    server.abort();
    info!("switchboard stopped");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("switchboard={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
