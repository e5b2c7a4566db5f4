// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability-based model selection.
//!
//! Filters the catalog by the request's hard constraints, scores the
//! survivors for the task category, and returns the best identifier.
//! Selection never fails: an empty eligible set yields the fixed fallback
//! model. Callers must treat the fallback as "best effort, constraints not
//! actually met" and surface that degradation where it matters.

use tracing::debug;

use switchboard_core::Provider;

use crate::catalog::{CostTier, ModelProfile, FALLBACK_MODEL, MODEL_CATALOG};
use crate::classifier::TaskCategory;

/// Constraints and preferences for one selection call. Ephemeral.
#[derive(Debug, Clone)]
pub struct RoutingRequest {
    /// Classified task category.
    pub category: TaskCategory,
    /// Minimum context window in tokens (0 = no filtering).
    pub min_context: u64,
    /// Restrict to a single provider.
    pub preferred_provider: Option<Provider>,
    /// Cost ceiling; models ranked above it are excluded.
    pub max_cost: CostTier,
    /// Require the Responses-style API flag.
    pub require_responses_api: bool,
    /// Require computer-use support.
    pub require_computer_use: bool,
    /// Require streaming-thinking support.
    pub require_streaming_thinking: bool,
    /// Require built-in web search.
    pub require_web_search: bool,
}

impl Default for RoutingRequest {
    fn default() -> Self {
        Self {
            category: TaskCategory::GeneralConversation,
            min_context: 0,
            preferred_provider: None,
            max_cost: CostTier::High,
            require_responses_api: false,
            require_computer_use: false,
            require_streaming_thinking: false,
            require_web_search: false,
        }
    }
}

impl RoutingRequest {
    /// A request with the given category and no other constraints.
    pub fn for_category(category: TaskCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }
}

/// Selects models from a capability catalog.
///
/// Holds a borrowed profile table so tests can run against reduced
/// catalogs; [`ModelSelector::default`] uses the built-in one.
#[derive(Debug, Clone)]
pub struct ModelSelector {
    profiles: &'static [ModelProfile],
}

impl ModelSelector {
    /// Selector over a caller-supplied profile table.
    pub fn new(profiles: &'static [ModelProfile]) -> Self {
        Self { profiles }
    }

    /// Pick the best model identifier for the request.
    ///
    /// Filter pipeline: context window, provider preference, cost ceiling,
    /// then each required feature flag. An empty survivor set short-circuits
    /// to [`FALLBACK_MODEL`]; otherwise survivors are ranked by task score,
    /// with ties broken toward the cheaper cost tier.
    pub fn select(&self, request: &RoutingRequest) -> &'static str {
        let mut eligible: Vec<&ModelProfile> = self
            .profiles
            .iter()
            .filter(|p| p.context_window >= request.min_context)
            .filter(|p| {
                request
                    .preferred_provider
                    .is_none_or(|provider| p.provider == provider)
            })
            .filter(|p| p.cost.rank() <= request.max_cost.rank())
            .filter(|p| !request.require_responses_api || p.responses_api)
            .filter(|p| !request.require_computer_use || p.computer_use)
            .filter(|p| !request.require_streaming_thinking || p.streaming_thinking)
            .filter(|p| !request.require_web_search || p.web_search)
            .collect();

        if eligible.is_empty() {
            debug!(
                category = %request.category,
                fallback = FALLBACK_MODEL,
                "no model satisfies routing constraints, using fallback"
            );
            return FALLBACK_MODEL;
        }

        eligible.sort_by(|a, b| {
            let score_a = task_score(a, request.category);
            let score_b = task_score(b, request.category);
            score_b
                .partial_cmp(&score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cost.rank().cmp(&b.cost.rank()))
        });

        let best = eligible[0];
        debug!(
            category = %request.category,
            model = best.id,
            score = task_score(best, request.category),
            "model selected"
        );
        best.id
    }
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new(MODEL_CATALOG)
    }
}

/// Score a profile for a task category. Weights are fixed constants.
fn task_score(profile: &ModelProfile, category: TaskCategory) -> f64 {
    match category {
        TaskCategory::CodeGeneration | TaskCategory::CodeExplanation => {
            profile.coding * 1.5 + profile.reasoning * 0.5
        }
        TaskCategory::CreativeWriting => profile.text_generation * 1.5 + profile.reasoning * 0.3,
        TaskCategory::ComplexReasoning => profile.reasoning * 1.5 + profile.text_generation * 0.3,
        TaskCategory::DataAnalysis => profile.reasoning * 1.2 + profile.coding * 0.8,
        TaskCategory::ToolUse => {
            if profile.tool_use {
                10.0
            } else {
                0.0
            }
        }
        TaskCategory::Multimodal => {
            if profile.multimodal {
                10.0
            } else {
                0.0
            }
        }
        TaskCategory::ComputerUse => {
            if profile.computer_use {
                10.0
            } else {
                0.0
            }
        }
        TaskCategory::SearchAugmented => {
            if profile.web_search {
                10.0
            } else {
                0.0
            }
        }
        TaskCategory::RealtimeStreaming => profile.latency.score() * 1.5,
        TaskCategory::GeneralConversation => profile.text_generation + profile.reasoning,
    }
}
