// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the relay REST API.
//!
//! Handles POST /v1/responses, POST /v1/responses/tools,
//! POST /v1/responses/interrupt, GET /v1/responses/interrupt/status, and
//! GET /health.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use switchboard_core::Provider;
use switchboard_openai::types::{FunctionCall, ResponseInput, ResponseRequest, ToolSpec};
use switchboard_router::{catalog, classify, RoutingRequest};

use crate::server::GatewayState;
use crate::sse;
use crate::tools;

/// Request body for POST /v1/responses.
#[derive(Debug, Deserialize)]
pub struct CreateResponseBody {
    /// User input: prompt text or role-tagged messages.
    pub input: Option<ResponseInput>,
    /// Explicit model override. Absent = route by task.
    #[serde(default)]
    pub model: Option<String>,
    /// Response id this request continues.
    #[serde(default)]
    pub previous_response_id: Option<String>,
    /// Store the response server-side for continuation. `None` uses the
    /// relay default.
    #[serde(default)]
    pub store: Option<bool>,
    /// Stream the response as SSE (default) or return JSON.
    #[serde(default = "default_stream")]
    pub stream: bool,
    /// Client-declared tools, forwarded verbatim.
    #[serde(default)]
    pub tools: Vec<ToolSpec>,
}

fn default_stream() -> bool {
    true
}

/// Request body for POST /v1/responses/tools.
#[derive(Debug, Deserialize)]
pub struct ToolOutputsBody {
    /// Response whose function calls are being answered.
    pub response_id: Option<String>,
    /// The function calls to execute.
    #[serde(default)]
    pub tool_calls: Vec<FunctionCall>,
    /// Stream the continuation (default) or return JSON.
    #[serde(default = "default_stream")]
    pub stream: bool,
}

/// Request body for POST /v1/responses/interrupt.
#[derive(Debug, Deserialize)]
pub struct InterruptBody {
    /// Id of the stream to interrupt.
    #[serde(default)]
    pub stream_id: Option<String>,
    /// Interrupt every active stream instead.
    #[serde(default)]
    pub interrupt_all: bool,
}

/// Query string for GET /v1/responses/interrupt/status.
#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    /// Specific stream to check; absent = report the total count.
    #[serde(default)]
    pub stream_id: Option<String>,
}

/// Response body for interruption requests.
#[derive(Debug, Serialize)]
pub struct InterruptResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Resolve the model for a request: explicit override first, then the
/// routing pipeline (force_model, or classify + select), then the client
/// default when routing is disabled.
fn resolve_model(state: &GatewayState, explicit: Option<String>, input: &ResponseInput) -> String {
    if let Some(model) = explicit.filter(|m| !m.trim().is_empty()) {
        return model;
    }

    if !state.relay.routing_enabled {
        return state.client.default_model().to_string();
    }

    if let Some(forced) = &state.relay.force_model {
        debug!(model = forced.as_str(), "routing bypassed by force_model");
        return forced.clone();
    }

    let category = classify(input.user_text());
    let model = state.selector.select(&RoutingRequest {
        require_responses_api: true,
        ..RoutingRequest::for_category(category)
    });
    debug!(category = %category, model, "model routed by task");
    model.to_string()
}

/// Reject models the relay cannot serve.
///
/// Non-OpenAI catalog entries are routable but not yet relayable: without
/// a configured key the error names the missing key, with one it names the
/// missing implementation, mirroring how availability and support are two
/// different failures.
fn check_model_relayable(model: &str) -> Result<(), Response> {
    let provider = catalog::provider_for(model);
    if provider == Provider::OpenAi {
        return Ok(());
    }
    if !provider.is_configured() {
        return Err(bad_request(format!(
            "Model {model} requires the {} environment variable to be configured",
            provider.env_key()
        )));
    }
    Err(bad_request(format!(
        "Model {model} is not yet relayable; only OpenAI models are currently supported"
    )))
}

/// POST /v1/responses
///
/// Creates a new response through the upstream Responses API, streaming it
/// back as SSE unless the client asked for JSON. Requests without an
/// explicit model are routed by task classification.
pub async fn post_responses(
    State(state): State<GatewayState>,
    Json(body): Json<CreateResponseBody>,
) -> Response {
    let Some(input) = body.input.filter(|i| !i.is_empty()) else {
        return bad_request("Input is required");
    };

    let model = resolve_model(&state, body.model, &input);
    if let Err(response) = check_model_relayable(&model) {
        return response;
    }

    let request = ResponseRequest {
        model,
        input,
        previous_response_id: body.previous_response_id,
        store: body.store.unwrap_or(state.relay.store_responses),
        max_output_tokens: Some(state.relay.max_output_tokens),
        tools: effective_tools(&state, body.tools),
        stream: body.stream,
    };

    if body.stream {
        return sse::relay_stream(state, request).await;
    }

    match state.client.create_response(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!(error = %e, "upstream response creation failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Tools forwarded upstream: the client's declarations, or the built-in
/// weather tool when the client declared none and it is enabled.
fn effective_tools(state: &GatewayState, declared: Vec<ToolSpec>) -> Option<Vec<ToolSpec>> {
    if !declared.is_empty() {
        return Some(declared);
    }
    if state.relay.weather_enabled {
        return Some(vec![tools::weather_tool()]);
    }
    None
}

/// POST /v1/responses/tools
///
/// Executes the function calls a previous response requested and continues
/// the conversation with their outputs.
pub async fn post_responses_tools(
    State(state): State<GatewayState>,
    Json(body): Json<ToolOutputsBody>,
) -> Response {
    let Some(response_id) = body.response_id.filter(|id| !id.is_empty()) else {
        return bad_request("Missing response_id");
    };
    if body.tool_calls.is_empty() {
        return bad_request("Invalid or missing tool calls");
    }

    let outputs = tools::dispatch_function_calls(&body.tool_calls, state.relay.weather_enabled);

    let request = ResponseRequest {
        model: state.client.default_model().to_string(),
        input: ResponseInput::FunctionOutputs(outputs),
        previous_response_id: Some(response_id),
        store: state.relay.store_responses,
        max_output_tokens: Some(state.relay.max_output_tokens),
        tools: None,
        stream: body.stream,
    };

    if body.stream {
        return sse::relay_stream(state, request).await;
    }

    match state.client.create_response(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!(error = %e, "tool continuation failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /v1/responses/interrupt
///
/// Interrupts one stream by id, or every active stream.
pub async fn post_interrupt(
    State(state): State<GatewayState>,
    Json(body): Json<InterruptBody>,
) -> Response {
    if body.interrupt_all {
        let count = state.registry.interrupt_all();
        return (
            StatusCode::OK,
            Json(InterruptResponse {
                success: true,
                message: Some(format!("Interrupted {count} active streams")),
                interrupted: Some(count),
                error: None,
            }),
        )
            .into_response();
    }

    let Some(stream_id) = body.stream_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(InterruptResponse {
                success: false,
                message: None,
                interrupted: None,
                error: Some("Missing stream_id parameter".to_string()),
            }),
        )
            .into_response();
    };

    if state.registry.interrupt(&stream_id) {
        (
            StatusCode::OK,
            Json(InterruptResponse {
                success: true,
                message: Some(format!("Stream {stream_id} interrupted successfully")),
                interrupted: None,
                error: None,
            }),
        )
            .into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(InterruptResponse {
                success: false,
                message: None,
                interrupted: None,
                error: Some(format!("Stream {stream_id} not found or already completed")),
            }),
        )
            .into_response()
    }
}

/// GET /v1/responses/interrupt/status
///
/// Reports liveness of one stream, or the count of all active streams.
pub async fn get_interrupt_status(
    State(state): State<GatewayState>,
    Query(query): Query<StatusQuery>,
) -> Response {
    if let Some(stream_id) = query.stream_id {
        let active = state.registry.is_active(&stream_id);
        return (
            StatusCode::OK,
            Json(serde_json::json!({ "stream_id": stream_id, "active": active })),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "active_streams": state.registry.count() })),
    )
        .into_response()
}

/// GET /health
///
/// Returns relay health status.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}
