// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The model capability catalog.
//!
//! One normalized record per supported model: provider, capability scores,
//! context window, feature flags, latency class, and cost tier all live on
//! [`ModelProfile`]. A model cannot be "known" for routing while missing
//! cost or provider data, because there is nothing else to look it up in.

use serde::{Deserialize, Serialize};
use strum::Display;
use switchboard_core::Provider;

/// Always-available fallback when no catalog entry satisfies a request.
pub const FALLBACK_MODEL: &str = "gpt-4o";

/// Relative pricing bucket for a model. Ordering follows variant order:
/// `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

impl CostTier {
    /// Ordinal rank used for cost-ceiling comparisons: low=1, medium=2, high=3.
    pub fn rank(&self) -> u8 {
        match self {
            CostTier::Low => 1,
            CostTier::Medium => 2,
            CostTier::High => 3,
        }
    }
}

/// Qualitative response latency bucket. Ordering follows variant order:
/// `VeryLow < Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LatencyClass {
    VeryLow,
    Low,
    Medium,
    High,
}

impl LatencyClass {
    /// Score used when ranking models for realtime streaming work.
    pub fn score(&self) -> f64 {
        match self {
            LatencyClass::VeryLow => 10.0,
            LatencyClass::Low => 8.0,
            LatencyClass::Medium => 5.0,
            LatencyClass::High => 2.0,
        }
    }
}

/// A single model's routing profile.
///
/// Capability scores are on a 0-10 scale. Feature flags default to absent;
/// a flag a model does not carry excludes it from requests requiring it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelProfile {
    /// Model identifier as sent to the upstream API.
    pub id: &'static str,
    /// Vendor serving the model.
    pub provider: Provider,
    /// General text generation quality.
    pub text_generation: f64,
    /// Multi-step reasoning quality.
    pub reasoning: f64,
    /// Code generation and comprehension quality.
    pub coding: f64,
    /// Context window in tokens.
    pub context_window: u64,
    /// Accepts image input.
    pub multimodal: bool,
    /// Supports tool/function calling.
    pub tool_use: bool,
    /// Supports computer-use agents.
    pub computer_use: bool,
    /// Streams visible thinking tokens.
    pub streaming_thinking: bool,
    /// Has built-in web search grounding.
    pub web_search: bool,
    /// Served through the Responses-style API.
    pub responses_api: bool,
    /// Typical response latency bucket.
    pub latency: LatencyClass,
    /// Relative pricing bucket.
    pub cost: CostTier,
}

impl ModelProfile {
    /// A profile with every flag cleared, for building catalog entries and
    /// test fixtures field-by-field.
    pub const fn base(id: &'static str, provider: Provider) -> Self {
        Self {
            id,
            provider,
            text_generation: 0.0,
            reasoning: 0.0,
            coding: 0.0,
            context_window: 0,
            multimodal: false,
            tool_use: false,
            computer_use: false,
            streaming_thinking: false,
            web_search: false,
            responses_api: false,
            latency: LatencyClass::Medium,
            cost: CostTier::High,
        }
    }
}

/// The built-in catalog of supported models.
///
/// Scores and flags are maintained by hand; they encode routing judgment,
/// not benchmark results.
pub const MODEL_CATALOG: &[ModelProfile] = &[
    // OpenAI
    ModelProfile {
        text_generation: 9.2,
        reasoning: 8.5,
        coding: 8.5,
        context_window: 128_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::Low,
        cost: CostTier::Medium,
        ..ModelProfile::base("gpt-4o", Provider::OpenAi)
    },
    ModelProfile {
        text_generation: 9.5,
        reasoning: 9.3,
        coding: 9.0,
        context_window: 200_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::Low,
        cost: CostTier::High,
        ..ModelProfile::base("gpt-o3", Provider::OpenAi)
    },
    ModelProfile {
        text_generation: 8.8,
        reasoning: 8.0,
        coding: 8.0,
        context_window: 128_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::Medium,
        cost: CostTier::Medium,
        ..ModelProfile::base("gpt-4-turbo", Provider::OpenAi)
    },
    ModelProfile {
        text_generation: 9.4,
        reasoning: 9.0,
        coding: 8.8,
        context_window: 128_000,
        multimodal: true,
        tool_use: true,
        responses_api: true,
        latency: LatencyClass::Low,
        cost: CostTier::Medium,
        ..ModelProfile::base("gpt-4.5-preview", Provider::OpenAi)
    },
    ModelProfile {
        text_generation: 9.7,
        reasoning: 9.6,
        coding: 9.4,
        context_window: 200_000,
        multimodal: true,
        tool_use: true,
        computer_use: true,
        latency: LatencyClass::Low,
        cost: CostTier::High,
        ..ModelProfile::base("o1", Provider::OpenAi)
    },
    // Anthropic
    ModelProfile {
        text_generation: 9.3,
        reasoning: 9.1,
        coding: 8.9,
        context_window: 200_000,
        multimodal: true,
        tool_use: true,
        computer_use: true,
        latency: LatencyClass::Low,
        cost: CostTier::High,
        ..ModelProfile::base("claude-3-7-sonnet-20250219", Provider::Anthropic)
    },
    ModelProfile {
        text_generation: 9.5,
        reasoning: 9.4,
        coding: 8.8,
        context_window: 200_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::Medium,
        cost: CostTier::High,
        ..ModelProfile::base("claude-3-5-opus-20240620", Provider::Anthropic)
    },
    ModelProfile {
        text_generation: 8.6,
        reasoning: 8.3,
        coding: 7.9,
        context_window: 200_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::VeryLow,
        cost: CostTier::Medium,
        ..ModelProfile::base("claude-3-5-haiku-20240307", Provider::Anthropic)
    },
    // Google
    ModelProfile {
        text_generation: 9.1,
        reasoning: 9.2,
        coding: 8.7,
        context_window: 1_000_000,
        multimodal: true,
        tool_use: true,
        streaming_thinking: true,
        latency: LatencyClass::Low,
        cost: CostTier::High,
        ..ModelProfile::base("gemini-2.0-flash-thinking-exp", Provider::Google)
    },
    ModelProfile {
        text_generation: 9.3,
        reasoning: 9.0,
        coding: 9.1,
        context_window: 2_000_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::Medium,
        cost: CostTier::High,
        ..ModelProfile::base("gemini-2.0-pro-experimental", Provider::Google)
    },
    ModelProfile {
        text_generation: 8.5,
        reasoning: 8.0,
        coding: 7.8,
        context_window: 1_000_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::VeryLow,
        cost: CostTier::Medium,
        ..ModelProfile::base("gemini-2.0-flash-lite", Provider::Google)
    },
    // Meta (served via Groq)
    ModelProfile {
        text_generation: 8.7,
        reasoning: 8.4,
        coding: 8.2,
        context_window: 128_000,
        multimodal: true,
        tool_use: true,
        latency: LatencyClass::Medium,
        cost: CostTier::Medium,
        ..ModelProfile::base("llama-3.3-70b-versatile", Provider::Meta)
    },
    // Perplexity
    ModelProfile {
        text_generation: 8.8,
        reasoning: 8.5,
        coding: 8.3,
        context_window: 127_000,
        multimodal: true,
        tool_use: true,
        web_search: true,
        latency: LatencyClass::Medium,
        cost: CostTier::Medium,
        ..ModelProfile::base("llama-3.1-sonar-huge-128k-online", Provider::Perplexity)
    },
];

/// Look up a model's profile by identifier.
pub fn profile(model: &str) -> Option<&'static ModelProfile> {
    MODEL_CATALOG.iter().find(|p| p.id == model)
}

/// Provider serving a model, defaulting to OpenAI for unknown identifiers.
///
/// Unknown ids fall back rather than fail so availability checks on
/// user-supplied model strings degrade to "needs an OpenAI key".
pub fn provider_for(model: &str) -> Provider {
    profile(model).map(|p| p.provider).unwrap_or(Provider::OpenAi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_thirteen_models() {
        assert_eq!(MODEL_CATALOG.len(), 13);
    }

    #[test]
    fn fallback_model_is_in_catalog() {
        assert!(profile(FALLBACK_MODEL).is_some());
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut ids: Vec<&str> = MODEL_CATALOG.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MODEL_CATALOG.len());
    }

    #[test]
    fn cost_tier_ordering_and_ranks() {
        assert!(CostTier::Low < CostTier::Medium);
        assert!(CostTier::Medium < CostTier::High);
        assert_eq!(CostTier::Low.rank(), 1);
        assert_eq!(CostTier::Medium.rank(), 2);
        assert_eq!(CostTier::High.rank(), 3);
    }

    #[test]
    fn latency_scores() {
        assert_eq!(LatencyClass::VeryLow.score(), 10.0);
        assert_eq!(LatencyClass::Low.score(), 8.0);
        assert_eq!(LatencyClass::Medium.score(), 5.0);
        assert_eq!(LatencyClass::High.score(), 2.0);
    }

    #[test]
    fn feature_flags_match_expectations() {
        assert!(profile("gpt-4.5-preview").unwrap().responses_api);
        assert!(profile("o1").unwrap().computer_use);
        assert!(profile("claude-3-7-sonnet-20250219").unwrap().computer_use);
        assert!(profile("gemini-2.0-flash-thinking-exp").unwrap().streaming_thinking);
        assert!(profile("llama-3.1-sonar-huge-128k-online").unwrap().web_search);
        // responses_api is the rare flag; only one model carries it.
        assert_eq!(
            MODEL_CATALOG.iter().filter(|p| p.responses_api).count(),
            1
        );
    }

    #[test]
    fn provider_for_known_and_unknown_models() {
        assert_eq!(provider_for("claude-3-5-haiku-20240307"), Provider::Anthropic);
        assert_eq!(provider_for("gemini-2.0-flash-lite"), Provider::Google);
        assert_eq!(provider_for("some-unknown-model"), Provider::OpenAi);
    }

    #[test]
    fn cost_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CostTier::Low).unwrap(), "\"low\"");
        assert_eq!(
            serde_json::from_str::<CostTier>("\"high\"").unwrap(),
            CostTier::High
        );
    }

    #[test]
    fn latency_class_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&LatencyClass::VeryLow).unwrap(),
            "\"very-low\""
        );
        assert_eq!(LatencyClass::VeryLow.to_string(), "very-low");
    }
}
