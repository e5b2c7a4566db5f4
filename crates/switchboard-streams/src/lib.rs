// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory bookkeeping for interruptible upstream streams.
//!
//! The gateway registers every live upstream stream here under the
//! provider-assigned response id; interruption endpoints resolve ids
//! through the same registry. See [`StreamRegistry`] for the contract.

pub mod registry;

pub use registry::{CancelError, StreamHandle, StreamRegistry};
