// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events relay for POST /v1/responses.
//!
//! Forwards the upstream Responses stream to the browser as SSE while
//! keeping the stream interruptible:
//!
//! ```text
//! event: response.created      data: {"id": "resp_..."}
//! event: text_delta            data: {"text": "partial content"}
//! event: response.completed    data: {full response object}
//! event: interrupted           data: {"id": "resp_..."}
//! event: error                 data: {"error": "..."}
//! ```
//!
//! The relay registers the stream in the registry as soon as the provider
//! assigns an id (`response.created`) and holds the handle's completion
//! guard for the lifetime of the forwarding task, so finished or abandoned
//! streams always evict their registry entries.

use std::convert::Infallible;
use std::pin::Pin;

use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use switchboard_core::SwitchboardError;
use switchboard_openai::sse::StreamEvent;
use switchboard_openai::types::ResponseRequest;
use switchboard_streams::{StreamHandle, StreamRegistry};

use crate::handlers::ErrorResponse;
use crate::server::GatewayState;

type UpstreamStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, SwitchboardError>> + Send>>;

/// Open the upstream stream and relay it to the client as SSE.
pub async fn relay_stream(state: GatewayState, request: ResponseRequest) -> Response {
    let upstream = match state.client.stream_response(&request).await {
        Ok(stream) => stream,
        Err(e) => {
            error!(error = %e, "failed to open upstream stream");
            return (
                StatusCode::BAD_GATEWAY,
                axum::Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(64);
    tokio::spawn(relay_task(upstream, state.registry.clone(), tx));

    Sse::new(ReceiverStream::new(rx))
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn sse_event(name: &str, data: serde_json::Value) -> Result<Event, Infallible> {
    Ok(Event::default().event(name).data(data.to_string()))
}

/// Forward upstream events to the client until a terminal event, an
/// interruption, or client disconnect.
///
/// Dropping the completion guard at the end of this task is what evicts
/// the registry entry for streams that were never explicitly interrupted.
pub(crate) async fn relay_task(
    mut upstream: UpstreamStream,
    registry: StreamRegistry,
    tx: mpsc::Sender<Result<Event, Infallible>>,
) {
    // Inert until the provider assigns an id and the stream is registered.
    let mut cancel = CancellationToken::new();
    let mut _completion_guard = None;
    let mut stream_id: Option<String> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(stream_id = ?stream_id, "stream interrupted by client request");
                let data = serde_json::json!({ "id": stream_id });
                let _ = tx.send(sse_event("interrupted", data)).await;
                break;
            }
            next = upstream.next() => match next {
                Some(Ok(StreamEvent::Created(envelope))) => {
                    let id = envelope.response.id.clone();
                    let handle = StreamHandle::new();
                    cancel = handle.cancel_token();
                    _completion_guard = Some(handle.completion_guard());
                    registry.register(&id, handle);
                    debug!(stream_id = %id, "upstream stream registered");

                    let data = serde_json::json!({ "id": id });
                    stream_id = Some(id);
                    if tx.send(sse_event("response.created", data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(StreamEvent::OutputTextDelta(delta))) => {
                    let data = serde_json::json!({ "text": delta.delta });
                    if tx.send(sse_event("text_delta", data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(StreamEvent::FunctionArgsDelta(delta))) => {
                    let data = serde_json::json!({
                        "item_id": delta.item_id,
                        "delta": delta.delta,
                    });
                    if tx.send(sse_event("function_call_arguments_delta", data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(StreamEvent::Completed(envelope))) => {
                    let data = serde_json::to_value(&envelope.response)
                        .unwrap_or_else(|_| serde_json::json!({ "id": envelope.response.id }));
                    let _ = tx.send(sse_event("response.completed", data)).await;
                    break;
                }
                Some(Ok(StreamEvent::Failed(envelope))) => {
                    warn!(stream_id = %envelope.response.id, "upstream response failed");
                    let data = serde_json::json!({
                        "error": format!("response {} failed", envelope.response.id),
                    });
                    let _ = tx.send(sse_event("error", data)).await;
                    break;
                }
                Some(Ok(StreamEvent::Error(err))) => {
                    warn!(code = ?err.code, message = %err.message, "upstream stream error");
                    let data = serde_json::json!({ "error": err.message });
                    let _ = tx.send(sse_event("error", data)).await;
                    break;
                }
                Some(Err(e)) => {
                    error!(error = %e, "upstream stream transport error");
                    let data = serde_json::json!({ "error": e.to_string() });
                    let _ = tx.send(sse_event("error", data)).await;
                    break;
                }
                None => break,
            }
        }
    }
    // _completion_guard drops here; the registry evicts the entry.
}
