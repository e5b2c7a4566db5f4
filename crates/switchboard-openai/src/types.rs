// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Responses API request/response types and SSE event payloads.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the Responses API.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseRequest {
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,

    /// User input -- plain text or a list of role-tagged messages.
    pub input: ResponseInput,

    /// Id of the prior response this one continues. Conversation state is
    /// held server-side by the provider; the relay only forwards the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_response_id: Option<String>,

    /// Whether the provider stores the response for later continuation.
    pub store: bool,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Tool declarations forwarded from the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolSpec>>,

    /// Whether to stream the response.
    pub stream: bool,
}

/// Input payload -- a bare prompt string, structured messages, or tool
/// outputs continuing a previous response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseInput {
    /// Plain prompt text.
    Text(String),
    /// Role-tagged conversation messages.
    Messages(Vec<InputMessage>),
    /// Function-call outputs, paired with `previous_response_id`.
    FunctionOutputs(Vec<FunctionOutput>),
}

impl ResponseInput {
    /// The text to classify for routing: the first user message, or the
    /// bare prompt itself. Empty when no user text is present.
    pub fn user_text(&self) -> &str {
        match self {
            ResponseInput::Text(text) => text,
            ResponseInput::Messages(messages) => messages
                .iter()
                .find(|m| m.role == "user")
                .map(|m| m.content.as_str())
                .unwrap_or(""),
            ResponseInput::FunctionOutputs(_) => "",
        }
    }

    /// Whether the input carries no content at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseInput::Text(text) => text.is_empty(),
            ResponseInput::Messages(messages) => messages.is_empty(),
            ResponseInput::FunctionOutputs(outputs) => outputs.is_empty(),
        }
    }
}

/// The result of one executed function call, fed back to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FunctionOutput {
    /// Output for a `function_call` item, correlated by call id.
    FunctionCallOutput {
        call_id: String,
        output: String,
    },
}

/// A single role-tagged input message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMessage {
    /// Role: "user", "assistant", or "system".
    pub role: String,
    /// Message text.
    pub content: String,
}

/// A tool declaration, forwarded to the provider as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolSpec {
    /// A client-declared callable function.
    Function(FunctionSpec),
    /// Provider-hosted web search.
    WebSearch,
    /// Provider-hosted code interpreter.
    CodeInterpreter,
}

/// Declaration of a callable function tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Unique function name.
    pub name: String,
    /// What the function does, for the model.
    pub description: String,
    /// JSON Schema of the function's arguments.
    pub parameters: serde_json::Value,
}

// --- Response types ---

/// A full response object from the Responses API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseObject {
    /// Provider-assigned response id (doubles as the stream id).
    pub id: String,
    /// Object type (always "response").
    pub object: String,
    /// Lifecycle status: "in_progress", "completed", "failed", "incomplete".
    pub status: String,
    /// Model that produced the response.
    pub model: String,
    /// Output items in generation order.
    #[serde(default)]
    pub output: Vec<OutputItem>,
    /// Token usage, present once the response settles.
    #[serde(default)]
    pub usage: Option<ResponseUsage>,
}

impl ResponseObject {
    /// Concatenated text of all message output items.
    pub fn output_text(&self) -> String {
        let mut text = String::new();
        for item in &self.output {
            if let OutputItem::Message { content, .. } = item {
                for part in content {
                    let ContentPart::OutputText { text: t } = part;
                    text.push_str(t);
                }
            }
        }
        text
    }

    /// Function calls the model requested, in order.
    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.output
            .iter()
            .filter_map(|item| match item {
                OutputItem::FunctionCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }
}

/// One item of response output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    /// An assistant message.
    Message {
        role: String,
        content: Vec<ContentPart>,
    },
    /// A function call the model wants executed.
    FunctionCall(FunctionCall),
}

/// A requested function invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Call id used to correlate the eventual output.
    pub call_id: String,
    /// Declared function name.
    pub name: String,
    /// JSON-encoded arguments string.
    pub arguments: String,
}

/// A part of a message's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Generated text.
    OutputText { text: String },
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseUsage {
    /// Tokens consumed by the input.
    #[serde(default)]
    pub input_tokens: u32,
    /// Tokens generated.
    #[serde(default)]
    pub output_tokens: u32,
    /// Input + output.
    #[serde(default)]
    pub total_tokens: u32,
}

// --- SSE event payloads ---

/// Envelope wrapping a response snapshot in lifecycle SSE events.
#[derive(Debug, Clone, Deserialize)]
pub struct SseResponseEnvelope {
    /// Snapshot of the response at this lifecycle point.
    pub response: ResponseObject,
}

/// Incremental text from `response.output_text.delta`.
#[derive(Debug, Clone, Deserialize)]
pub struct SseOutputTextDelta {
    /// Output item the delta belongs to.
    #[serde(default)]
    pub item_id: Option<String>,
    /// The text fragment.
    pub delta: String,
}

/// Incremental function-call arguments from
/// `response.function_call_arguments.delta`.
#[derive(Debug, Clone, Deserialize)]
pub struct SseFunctionArgsDelta {
    /// Output item the delta belongs to.
    #[serde(default)]
    pub item_id: Option<String>,
    /// JSON fragment of the arguments string.
    pub delta: String,
}

/// An `error` SSE event.
#[derive(Debug, Clone, Deserialize)]
pub struct SseErrorEvent {
    /// Machine-readable error code, when present.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detail of an API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    pub message: String,
}
