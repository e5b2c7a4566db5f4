// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Responses API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, streaming SSE responses, and transient error retry.

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue};
use switchboard_config::model::OpenAiConfig;
use switchboard_core::SwitchboardError;
use tracing::{debug, warn};

use crate::sse::{self, StreamEvent};
use crate::types::{ApiErrorResponse, ResponseObject, ResponseRequest};

/// HTTP client for Responses API communication.
///
/// Manages authentication headers, connection pooling, and retry logic for
/// transient errors (429, 500, 503, 529).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    default_model: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Creates a client from configuration.
    ///
    /// The API key is taken from config, falling back to the
    /// `OPENAI_API_KEY` environment variable.
    pub fn from_config(config: &OpenAiConfig) -> Result<Self, SwitchboardError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                SwitchboardError::Config(
                    "OpenAI API key required: set openai.api_key or the OPENAI_API_KEY \
                     environment variable"
                        .to_string(),
                )
            })?;

        Self::new(&api_key, &config.base_url, &config.default_model)
    }

    /// Creates a client with an explicit key, base URL, and default model.
    pub fn new(
        api_key: &str,
        base_url: &str,
        default_model: &str,
    ) -> Result<Self, SwitchboardError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            SwitchboardError::Config(format!("invalid API key header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| SwitchboardError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: default_model.to_string(),
            max_retries: 1,
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Sends a streaming request and returns a stream of SSE events.
    ///
    /// On transient errors (429, 500, 503, 529), retries once after a
    /// 1-second delay.
    pub async fn stream_response(
        &self,
        request: &ResponseRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<StreamEvent, SwitchboardError>> + Send>>, SwitchboardError>
    {
        let mut req = request.clone();
        req.stream = true;

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying streaming request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(self.responses_url())
                .json(&req)
                .send()
                .await
                .map_err(|e| SwitchboardError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "streaming response received");

            if status.is_success() {
                return Ok(sse::parse_sse_stream(response));
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(api_error(status, &body));
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Err(last_error.unwrap_or_else(|| SwitchboardError::Provider {
            message: "streaming request failed after retries".into(),
            source: None,
        }))
    }

    /// Sends a non-streaming request and returns the full response object.
    ///
    /// On transient errors (429, 500, 503, 529), retries once after a
    /// 1-second delay.
    pub async fn create_response(
        &self,
        request: &ResponseRequest,
    ) -> Result<ResponseObject, SwitchboardError> {
        let mut req = request.clone();
        req.stream = false;

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(self.responses_url())
                .json(&req)
                .send()
                .await
                .map_err(|e| SwitchboardError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| SwitchboardError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| SwitchboardError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(api_error(status, &body));
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Err(last_error.unwrap_or_else(|| SwitchboardError::Provider {
            message: "request failed after retries".into(),
            source: None,
        }))
    }
}

/// Build a provider error from a non-2xx response body, preferring the
/// structured API error message when it parses.
fn api_error(status: reqwest::StatusCode, body: &str) -> SwitchboardError {
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(body) {
        format!(
            "OpenAI API error ({}): {}",
            api_err.error.type_.as_deref().unwrap_or("unknown"),
            api_err.error.message
        )
    } else {
        format!("API returned {status}: {body}")
    };
    SwitchboardError::Provider {
        message,
        source: None,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResponseInput;
    use futures::StreamExt;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("sk-test-key", base_url, "gpt-4o").unwrap()
    }

    fn test_request() -> ResponseRequest {
        ResponseRequest {
            model: "gpt-4o".into(),
            input: ResponseInput::Text("Hello".into()),
            previous_response_id: None,
            store: true,
            max_output_tokens: Some(1024),
            tools: None,
            stream: false,
        }
    }

    fn response_body(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "object": "response",
            "status": "completed",
            "model": "gpt-4o",
            "output": [
                {"type": "message", "role": "assistant", "content": [
                    {"type": "output_text", "text": "Hi there!"}
                ]}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5, "total_tokens": 15}
        })
    }

    #[tokio::test]
    async fn create_response_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("resp_test")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.create_response(&test_request()).await.unwrap();

        assert_eq!(result.id, "resp_test");
        assert_eq!(result.output_text(), "Hi there!");
        assert_eq!(result.usage.unwrap().input_tokens, 10);
    }

    #[tokio::test]
    async fn create_response_retries_on_429() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "rate_limit_error", "message": "Rate limited"}
        });

        // First request returns 429, second returns 200.
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&error_body))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("resp_retry")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.create_response(&test_request()).await.unwrap();
        assert_eq!(result.id, "resp_retry");
    }

    #[tokio::test]
    async fn create_response_fails_on_400() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Bad model"}
        });

        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.create_response(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid_request_error"), "got: {err}");
    }

    #[tokio::test]
    async fn create_response_exhausts_retries_on_503() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "server_error", "message": "Service overloaded"}
        });

        // Both attempts return 503.
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.create_response(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("server_error"), "got: {err}");
    }

    #[tokio::test]
    async fn client_sends_bearer_auth_and_forces_stream_flag() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/responses"))
            .and(header("authorization", "Bearer sk-test-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({"stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("resp_hdr")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        // Request claims stream=true; create_response must force it off.
        let mut request = test_request();
        request.stream = true;
        let result = client.create_response(&request).await;
        assert!(result.is_ok(), "headers/body should match: {result:?}");
    }

    #[tokio::test]
    async fn stream_response_yields_typed_events() {
        let server = MockServer::start().await;

        let sse = concat!(
            "event: response.created\n",
            "data: {\"response\":{\"id\":\"resp_s\",\"object\":\"response\",\"status\":\"in_progress\",\"model\":\"gpt-4o\"}}\n\n",
            "event: response.output_text.delta\n",
            "data: {\"delta\":\"Hello\"}\n\n",
            "event: response.completed\n",
            "data: {\"response\":{\"id\":\"resp_s\",\"object\":\"response\",\"status\":\"completed\",\"model\":\"gpt-4o\"}}\n\n"
        );

        Mock::given(method("POST"))
            .and(path("/responses"))
            .and(body_partial_json(serde_json::json!({"stream": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let mut stream = client.stream_response(&test_request()).await.unwrap();

        let first = stream.next().await.unwrap().unwrap();
        match first {
            StreamEvent::Created(env) => assert_eq!(env.response.id, "resp_s"),
            other => panic!("expected Created, got {other:?}"),
        }
        let second = stream.next().await.unwrap().unwrap();
        assert!(matches!(second, StreamEvent::OutputTextDelta(_)));
        let third = stream.next().await.unwrap().unwrap();
        assert!(matches!(third, StreamEvent::Completed(_)));
    }

    #[tokio::test]
    async fn missing_api_key_is_a_config_error() {
        let config = OpenAiConfig {
            api_key: None,
            ..OpenAiConfig::default()
        };
        // Only meaningful when the environment has no key; skip otherwise.
        if std::env::var("OPENAI_API_KEY").is_err() {
            let result = OpenAiClient::from_config(&config);
            assert!(matches!(result, Err(SwitchboardError::Config(_))));
        }
    }
}
