// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchboard relay.
//!
//! Provides the shared error type and the common identifiers used across
//! the workspace: the upstream [`Provider`] enum and [`ResponseId`].

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchboardError;
pub use types::{Provider, ResponseId};
