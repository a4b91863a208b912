//! # Timer Scopes
//!
//! Every delay in a session (simulation stages, countdown ticks) waits
//! inside a [`TimerScope`]. Scopes form a tree: cancelling a scope cancels
//! all of its children, so one handle tears down the whole pending chain.
//! Cancelling twice is a no-op.

use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// A wait was interrupted because its scope was cancelled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("timer scope cancelled")]
pub struct Cancelled;

/// Cancellable scope for scheduled waits.
#[derive(Debug, Clone, Default)]
pub struct TimerScope {
    token: CancellationToken,
}

impl TimerScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope cancelled together with this one (but not the other way round).
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Cancel this scope and every child. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// Wait for `duration` unless the scope is cancelled first.
    pub async fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}
