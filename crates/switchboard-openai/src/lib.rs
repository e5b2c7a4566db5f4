// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Responses API provider for the Switchboard relay.
//!
//! The relay speaks the Responses API: stateful server-side conversations
//! linked by `previous_response_id`, streamed as SSE. This crate owns the
//! wire types, the HTTP client with transient-error retry, and the SSE
//! parser that turns the byte stream into typed events.

pub mod client;
pub mod sse;
pub mod types;

pub use client::OpenAiClient;
pub use sse::StreamEvent;
pub use types::{
    FunctionCall, FunctionOutput, FunctionSpec, InputMessage, ResponseInput, ResponseObject,
    ResponseRequest, ToolSpec,
};
