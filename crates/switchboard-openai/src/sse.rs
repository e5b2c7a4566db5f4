// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for Responses API streaming responses.
//!
//! Converts a reqwest response byte stream into typed [`StreamEvent`]
//! variants using the `eventsource-stream` crate for SSE protocol
//! compliance.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use switchboard_core::SwitchboardError;

use crate::types::{SseErrorEvent, SseFunctionArgsDelta, SseOutputTextDelta, SseResponseEnvelope};

/// Typed SSE events from the Responses streaming protocol.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// The provider accepted the request and assigned a response id.
    Created(SseResponseEnvelope),
    /// Incremental generated text.
    OutputTextDelta(SseOutputTextDelta),
    /// Incremental function-call arguments.
    FunctionArgsDelta(SseFunctionArgsDelta),
    /// The response finished; carries the final snapshot.
    Completed(SseResponseEnvelope),
    /// The response failed; carries the final snapshot.
    Failed(SseResponseEnvelope),
    /// Protocol-level error during streaming.
    Error(SseErrorEvent),
}

fn parse_event<T, F>(data: &str, wrap: F, event_name: &str) -> Result<StreamEvent, SwitchboardError>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(T) -> StreamEvent,
{
    serde_json::from_str::<T>(data)
        .map(wrap)
        .map_err(|e| SwitchboardError::Provider {
            message: format!("failed to parse {event_name}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Parses a reqwest streaming response into a stream of typed [`StreamEvent`]s.
///
/// Each SSE frame is deserialized according to its event name. Event types
/// the relay does not consume (in_progress, output_item and content_part
/// lifecycle, done markers) are silently skipped, as are unknown future
/// event types.
pub fn parse_sse_stream(
    response: reqwest::Response,
) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, SwitchboardError>> + Send>> {
    let event_stream = response.bytes_stream().eventsource();

    let mapped = event_stream.filter_map(|result| async move {
        match result {
            Ok(event) => {
                let parsed = match event.event.as_str() {
                    "response.created" => parse_event(
                        &event.data,
                        StreamEvent::Created,
                        "response.created",
                    ),
                    "response.output_text.delta" => parse_event(
                        &event.data,
                        StreamEvent::OutputTextDelta,
                        "response.output_text.delta",
                    ),
                    "response.function_call_arguments.delta" => parse_event(
                        &event.data,
                        StreamEvent::FunctionArgsDelta,
                        "response.function_call_arguments.delta",
                    ),
                    "response.completed" => parse_event(
                        &event.data,
                        StreamEvent::Completed,
                        "response.completed",
                    ),
                    "response.failed" => {
                        parse_event(&event.data, StreamEvent::Failed, "response.failed")
                    }
                    "error" => parse_event(&event.data, StreamEvent::Error, "error"),
                    // Everything else is a lifecycle event the relay does not need.
                    _ => return None,
                };
                Some(parsed)
            }
            Err(e) => Some(Err(SwitchboardError::Provider {
                message: format!("SSE stream error: {e}"),
                source: None,
            })),
        }
    });

    Box::pin(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    /// Serve raw SSE text through wiremock to get a real reqwest::Response.
    async fn mock_sse_response(sse_text: &str) -> reqwest::Response {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_text.to_string()),
            )
            .mount(&server)
            .await;

        reqwest::get(&server.uri()).await.unwrap()
    }

    #[tokio::test]
    async fn parse_created_carries_response_id() {
        let sse = "event: response.created\ndata: {\"response\":{\"id\":\"resp_1\",\"object\":\"response\",\"status\":\"in_progress\",\"model\":\"gpt-4o\"}}\n\n";
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let event = stream.next().await.unwrap().unwrap();
        match event {
            StreamEvent::Created(envelope) => {
                assert_eq!(envelope.response.id, "resp_1");
                assert_eq!(envelope.response.status, "in_progress");
            }
            other => panic!("expected Created, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn parse_output_text_delta() {
        let sse = "event: response.output_text.delta\ndata: {\"item_id\":\"msg_1\",\"delta\":\"Hel\"}\n\n";
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let event = stream.next().await.unwrap().unwrap();
        match event {
            StreamEvent::OutputTextDelta(delta) => assert_eq!(delta.delta, "Hel"),
            other => panic!("expected OutputTextDelta, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn parse_completed_with_output() {
        let sse = concat!(
            "event: response.completed\n",
            "data: {\"response\":{\"id\":\"resp_1\",\"object\":\"response\",\"status\":\"completed\",\"model\":\"gpt-4o\",",
            "\"output\":[{\"type\":\"message\",\"role\":\"assistant\",\"content\":[{\"type\":\"output_text\",\"text\":\"Hi\"}]}]}}\n\n"
        );
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let event = stream.next().await.unwrap().unwrap();
        match event {
            StreamEvent::Completed(envelope) => {
                assert_eq!(envelope.response.output_text(), "Hi");
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_events_are_skipped() {
        let sse = concat!(
            "event: response.in_progress\ndata: {\"response\":{}}\n\n",
            "event: response.output_item.added\ndata: {}\n\n",
            "event: response.output_text.delta\ndata: {\"delta\":\"x\"}\n\n"
        );
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        // The two lifecycle events are skipped; first item is the delta.
        let event = stream.next().await.unwrap().unwrap();
        assert!(matches!(event, StreamEvent::OutputTextDelta(_)));
    }

    #[tokio::test]
    async fn parse_error_event() {
        let sse = "event: error\ndata: {\"code\":\"server_error\",\"message\":\"boom\"}\n\n";
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let event = stream.next().await.unwrap().unwrap();
        match event {
            StreamEvent::Error(err) => {
                assert_eq!(err.code.as_deref(), Some("server_error"));
                assert_eq!(err.message, "boom");
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_payload_surfaces_provider_error() {
        let sse = "event: response.output_text.delta\ndata: {\"not_delta\":true}\n\n";
        let response = mock_sse_response(sse).await;
        let mut stream = parse_sse_stream(response);

        let result = stream.next().await.unwrap();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("response.output_text.delta"));
    }
}
