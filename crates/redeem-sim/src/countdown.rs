//! # Session Countdowns
//!
//! Two decorative countdowns run while a session is open: the payment
//! window (15:00, restarts when it reaches zero) and the urgency clock
//! (10:00, stops at zero). Both tick once per second inside a
//! [`TimerScope`] and publish their display text through a `watch`
//! channel. They never affect navigation or validation.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SimulationConfig;
use crate::scope::TimerScope;

/// What a countdown does when it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnZero {
    /// Start over from the full duration.
    Restart,
    /// Stay at zero.
    Halt,
}

/// A whole-second countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    total_secs: u64,
    remaining_secs: u64,
    on_zero: OnZero,
}

impl Countdown {
    pub fn new(total: Duration, on_zero: OnZero) -> Self {
        let total_secs = total.as_secs();
        Self {
            total_secs,
            remaining_secs: total_secs,
            on_zero,
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 && self.on_zero == OnZero::Restart {
            self.remaining_secs = self.total_secs;
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// `MM:SS`, zero-padded.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

/// Current countdown texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub payment_window: String,
    pub urgency: String,
    pub urgency_expired: bool,
}

impl TimerSnapshot {
    fn of(payment: &Countdown, urgency: &Countdown) -> Self {
        Self {
            payment_window: payment.display(),
            urgency: urgency.display(),
            urgency_expired: urgency.is_expired(),
        }
    }
}

/// Background task ticking both countdowns.
#[derive(Debug)]
pub struct SessionTimers {
    scope: TimerScope,
    snapshots: watch::Receiver<TimerSnapshot>,
    task: JoinHandle<()>,
}

impl SessionTimers {
    /// Start ticking inside `scope`. Must be called from within a Tokio runtime.
    pub fn spawn(config: &SimulationConfig, scope: TimerScope) -> Self {
        let mut payment = Countdown::new(config.payment_window, OnZero::Restart);
        let mut urgency = Countdown::new(config.urgency_window, OnZero::Halt);
        let (tx, rx) = watch::channel(TimerSnapshot::of(&payment, &urgency));
        let period = config.tick;
        let ticker = scope.clone();

        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    biased;
                    _ = ticker.cancelled() => break,
                    _ = interval.tick() => {
                        payment.tick();
                        urgency.tick();
                        if tx.send(TimerSnapshot::of(&payment, &urgency)).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("session timers stopped");
        });

        Self {
            scope,
            snapshots: rx,
            task,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&self) {
        self.scope.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
