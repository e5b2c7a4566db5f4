// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task classification and capability-based model routing for Switchboard.
//!
//! This crate provides:
//! - [`classify`]: heuristic task categorization (zero-cost, zero-latency)
//! - [`ModelSelector`]: constraint filtering plus capability scoring over
//!   the normalized [`catalog::ModelProfile`] table
//!
//! The router sits in front of upstream calls: requests that do not name a
//! model are classified, then routed to the best catalog entry that meets
//! their constraints, falling back to [`catalog::FALLBACK_MODEL`] when
//! nothing does.

pub mod catalog;
pub mod classifier;
pub mod selector;

pub use catalog::{CostTier, LatencyClass, ModelProfile, FALLBACK_MODEL, MODEL_CATALOG};
pub use classifier::{classify, TaskCategory};
pub use selector::{ModelSelector, RoutingRequest};
