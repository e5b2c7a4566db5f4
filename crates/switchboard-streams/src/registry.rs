// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The active stream registry.
//!
//! Tracks in-flight upstream streams by their provider-assigned ids so
//! request handlers can interrupt them mid-flight. Interruption is a
//! best-effort, same-process control signal: the registry guarantees its
//! own bookkeeping (an interrupted id is immediately no longer tracked),
//! not how quickly the upstream resource is released. Nothing here
//! survives a restart, and nothing here performs blocking I/O.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, warn};

static NEXT_HANDLE_SERIAL: AtomicU64 = AtomicU64::new(0);

/// Cancellation signaling failure.
///
/// The registry logs and ignores this by contract: eviction proceeds
/// regardless, so callers are never left believing an interrupted stream
/// is still trackable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CancelError {
    /// The handle's cancellation was already signalled.
    #[error("cancellation already signalled")]
    AlreadySignalled,
}

/// One in-flight streaming completion.
///
/// Bundles the cancellation control the relay task listens on and the
/// completion signal the registry observes to auto-evict finished entries.
/// Handles are never reused: every new upstream stream gets a fresh one.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    serial: u64,
    cancel: CancellationToken,
    completion: CancellationToken,
}

impl StreamHandle {
    pub fn new() -> Self {
        Self {
            serial: NEXT_HANDLE_SERIAL.fetch_add(1, Ordering::Relaxed),
            cancel: CancellationToken::new(),
            completion: CancellationToken::new(),
        }
    }

    /// Token the owning relay task should `select!` on to observe
    /// interruption.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Guard whose drop marks the stream finished. The relay task holds it
    /// for the stream's lifetime; dropping it (on natural end, error, or
    /// task abort) fires the registry's auto-eviction observer.
    pub fn completion_guard(&self) -> DropGuard {
        self.completion.clone().drop_guard()
    }

    /// Signal cancellation.
    ///
    /// Returns [`CancelError::AlreadySignalled`] if cancellation was
    /// already requested. The registry ignores the outcome by documented
    /// contract; it is surfaced so that tests and other callers can
    /// observe whether the signal was fresh.
    pub fn cancel(&self) -> Result<(), CancelError> {
        if self.cancel.is_cancelled() {
            return Err(CancelError::AlreadySignalled);
        }
        self.cancel.cancel();
        Ok(())
    }

    /// Whether interruption has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the underlying stream has terminated.
    pub fn is_finished(&self) -> bool {
        self.completion.is_cancelled()
    }

    fn completion_token(&self) -> CancellationToken {
        self.completion.clone()
    }
}

impl Default for StreamHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide table of active streams, keyed by upstream response id.
///
/// Constructed once at the composition root and shared by handle; it is
/// deliberately not a global so tests can run isolated instances.
#[derive(Debug, Clone, Default)]
pub struct StreamRegistry {
    streams: Arc<DashMap<String, StreamHandle>>,
}

impl StreamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new stream under `id`.
    ///
    /// A colliding id evicts the previous occupant first, attempting to
    /// cancel it (failure is logged, not propagated): last write wins.
    /// An observer task auto-evicts the entry once the handle's completion
    /// signal fires, so streams that end naturally or error out do not
    /// accumulate.
    pub fn register(&self, id: &str, handle: StreamHandle) {
        if let Some((_, existing)) = self.streams.remove(id) {
            warn!(stream_id = id, "replacing existing stream registration");
            if let Err(e) = existing.cancel() {
                warn!(stream_id = id, error = %e, "could not cancel evicted stream");
            }
        }

        let completion = handle.completion_token();
        let serial = handle.serial;
        self.streams.insert(id.to_string(), handle);

        let streams = Arc::clone(&self.streams);
        let owned_id = id.to_string();
        tokio::spawn(async move {
            completion.cancelled().await;
            // Only evict the entry this observer was installed for; the id
            // may have been re-registered with a newer handle since.
            if streams
                .remove_if(&owned_id, |_, h| h.serial == serial)
                .is_some()
            {
                debug!(stream_id = %owned_id, "finished stream evicted");
            }
        });
    }

    /// Interrupt the stream registered under `id`.
    ///
    /// Returns `false` when the id is absent (finished, interrupted, or
    /// never registered). Otherwise the entry is evicted and `true` is
    /// returned even if cancellation signaling failed; the failure is
    /// logged and ignored because the registry's contract — "this id is no
    /// longer tracked" — holds either way.
    pub fn interrupt(&self, id: &str) -> bool {
        match self.streams.remove(id) {
            None => false,
            Some((_, handle)) => {
                if let Err(e) = handle.cancel() {
                    warn!(stream_id = id, error = %e, "cancellation signal failed, entry evicted anyway");
                }
                debug!(stream_id = id, "stream interrupted");
                true
            }
        }
    }

    /// Interrupt every active stream.
    ///
    /// Snapshots the table, attempts cancellation on each entry (one
    /// failure does not stop the rest), clears the table, and returns the
    /// number of entries present at snapshot time.
    pub fn interrupt_all(&self) -> usize {
        let snapshot: Vec<(String, StreamHandle)> = self
            .streams
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        for (id, handle) in &snapshot {
            if let Err(e) = handle.cancel() {
                warn!(stream_id = %id, error = %e, "cancellation signal failed during interrupt_all");
            }
        }

        self.streams.clear();
        debug!(interrupted = snapshot.len(), "all streams interrupted");
        snapshot.len()
    }

    /// Whether a stream is currently tracked under `id`.
    pub fn is_active(&self, id: &str) -> bool {
        self.streams.contains_key(id)
    }

    /// Number of currently tracked streams.
    pub fn count(&self) -> usize {
        self.streams.len()
    }
}
