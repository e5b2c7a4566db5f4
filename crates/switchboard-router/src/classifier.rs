// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic task classification.
//!
//! Maps free-text user input to a coarse [`TaskCategory`] using ordered
//! keyword-conjunction rules. Zero cost, no network, no state. First
//! matching rule wins, so rule order encodes priority among categories
//! with overlapping vocabulary; the precedence is approximate, not a
//! mutual-exclusivity guarantee.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Coarse task categories driving model selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskCategory {
    GeneralConversation,
    CreativeWriting,
    CodeGeneration,
    CodeExplanation,
    ComplexReasoning,
    DataAnalysis,
    ToolUse,
    Multimodal,
    SearchAugmented,
    ComputerUse,
    RealtimeStreaming,
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::GeneralConversation
    }
}

/// Classify a user message into a task category.
///
/// Total and deterministic: every input maps to exactly one category, and
/// anything the rules do not recognize (including the empty string) is
/// general conversation.
pub fn classify(text: &str) -> TaskCategory {
    let lower = text.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("code") && (has("write") || has("generate") || has("create")) {
        return TaskCategory::CodeGeneration;
    }

    if has("code") && (has("explain") || has("understand")) {
        return TaskCategory::CodeExplanation;
    }

    if has("search") || has("find information") || has("look up") {
        return TaskCategory::SearchAugmented;
    }

    if has("analyze") && (has("data") || has("results")) {
        return TaskCategory::DataAnalysis;
    }

    if has("write") || has("story") || has("creative") {
        return TaskCategory::CreativeWriting;
    }

    if has("complex") || has("difficult") || has("challenging") {
        return TaskCategory::ComplexReasoning;
    }

    if has("use computer") || has("control desktop") || has("run program") {
        return TaskCategory::ComputerUse;
    }

    if has("streaming") || has("real-time") || has("live") {
        return TaskCategory::RealtimeStreaming;
    }

    if has("image") || has("picture") || has("photo") {
        return TaskCategory::Multimodal;
    }

    TaskCategory::GeneralConversation
}
