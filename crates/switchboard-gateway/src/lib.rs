// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP relay gateway for Switchboard.
//!
//! A thin axum layer between browsers and the upstream Responses API:
//! response creation (streaming SSE or JSON), conversation continuity via
//! provider-held response ids, tool-output continuation, and interruption
//! of in-flight streams through the injected [`StreamRegistry`].
//!
//! [`StreamRegistry`]: switchboard_streams::StreamRegistry

pub mod handlers;
pub mod server;
pub mod sse;
pub mod tools;

pub use server::{GatewayState, HealthState, RelayConfig, ServerConfig};
