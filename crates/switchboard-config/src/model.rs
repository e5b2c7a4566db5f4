// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Switchboard relay.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Switchboard configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchboardConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI Responses API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Model routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Built-in tool dispatch settings.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3100
}

fn default_log_level() -> String {
    "info".to_string()
}

/// OpenAI Responses API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` requires the OPENAI_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for the Responses API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default model when neither the request nor the router picks one.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Whether responses are stored server-side by the provider, enabling
    /// `previous_response_id` conversation continuity.
    #[serde(default = "default_store")]
    pub store: bool,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            store: default_store(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_max_output_tokens() -> u32 {
    4096
}

fn default_store() -> bool {
    true
}

/// Model routing configuration.
///
/// When enabled, requests without an explicit model are classified and
/// routed through the capability selector. When disabled, such requests
/// fall back to `openai.default_model`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Enable capability-based routing for requests without an explicit model.
    #[serde(default = "default_routing_enabled")]
    pub enabled: bool,

    /// Force all auto-routed requests to a specific model, bypassing
    /// classification. Example: "gpt-4o".
    #[serde(default)]
    pub force_model: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            enabled: default_routing_enabled(),
            force_model: None,
        }
    }
}

fn default_routing_enabled() -> bool {
    true
}

/// Built-in tool dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Enable the built-in get_weather function tool.
    #[serde(default = "default_weather_enabled")]
    pub weather_enabled: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            weather_enabled: default_weather_enabled(),
        }
    }
}

fn default_weather_enabled() -> bool {
    true
}
