// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Switchboard workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Identifier of an upstream response, assigned by the provider.
///
/// Also doubles as the stream identifier for interruption: the relay
/// registers each live stream under the id the provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub String);

impl ResponseId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upstream vendors whose models appear in the routing catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
    Meta,
    Perplexity,
}

impl Provider {
    /// Environment variable holding the API key for this provider.
    ///
    /// Meta models are served via Groq, so they share the Groq key.
    pub fn env_key(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Google => "GOOGLE_API_KEY",
            Provider::Meta => "GROQ_API_KEY",
            Provider::Perplexity => "PERPLEXITY_API_KEY",
        }
    }

    /// Whether an API key for this provider is present in the environment.
    pub fn is_configured(&self) -> bool {
        std::env::var(self.env_key()).map(|v| !v.is_empty()).unwrap_or(false)
    }
}
