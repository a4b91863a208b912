//! # Payment Simulator
//!
//! Drives the confirmation of a redemption through three timed stages and
//! produces the [`CompletionRecord`]:
//!
//! ```text
//! Idle ─▶ Stage1 (3 s) ─▶ Stage2 (2 s) ─▶ Stage3 (2 s) ─▶ Done
//! ```
//!
//! Each stage publishes a [`SimulationEvent::Status`] before its delay.
//! Every delay waits inside the simulator's [`TimerScope`]; cancelling the
//! scope aborts the run with [`DriverOutcome::Cancelled`] and no completion
//! is recorded. On completion the session timers scope (if any) is
//! cancelled so the countdowns stop.

use serde::Serialize;
use tokio::sync::mpsc;

use redeem_state::{CompletionRecord, ConfirmationDriver, DriverOutcome, FormSession};

use crate::config::SimulationConfig;
use crate::protocol::generate_protocol_code;
use crate::scope::TimerScope;

/// Progress of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SimulationStage {
    #[serde(rename = "IDLE")]
    Idle,
    #[serde(rename = "STAGE_1")]
    Stage1,
    #[serde(rename = "STAGE_2")]
    Stage2,
    #[serde(rename = "STAGE_3")]
    Stage3,
    #[serde(rename = "DONE")]
    Done,
}

impl SimulationStage {
    /// The timed stages, in order.
    pub const TIMED: [SimulationStage; 3] = [Self::Stage1, Self::Stage2, Self::Stage3];

    /// Status title and detail shown while the stage runs.
    pub fn status(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Stage1 => Some((
                "Processando pagamento...",
                "Aguarde enquanto confirmamos seu pagamento",
            )),
            Self::Stage2 => Some(("Validando dados...", "Verificando informações bancárias")),
            Self::Stage3 => Some(("Liberando prêmio...", "Preparando transferência do prêmio")),
            Self::Idle | Self::Done => None,
        }
    }

    fn index(&self) -> Option<usize> {
        Self::TIMED.iter().position(|s| s == self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Stage1 => "STAGE_1",
            Self::Stage2 => "STAGE_2",
            Self::Stage3 => "STAGE_3",
            Self::Done => "DONE",
        }
    }
}

impl std::fmt::Display for SimulationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Published to subscribers while a run progresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    Status {
        stage: SimulationStage,
        title: &'static str,
        detail: &'static str,
    },
    Completed(CompletionRecord),
    Cancelled {
        stage: SimulationStage,
    },
}

/// [`ConfirmationDriver`] that simulates payment processing with timed stages.
#[derive(Debug)]
pub struct PaymentSimulator {
    config: SimulationConfig,
    scope: TimerScope,
    session_timers: Option<TimerScope>,
    events: Option<mpsc::UnboundedSender<SimulationEvent>>,
    stage: SimulationStage,
}

impl PaymentSimulator {
    /// A simulator whose delays wait inside `scope`.
    pub fn new(config: SimulationConfig, scope: TimerScope) -> Self {
        Self {
            config,
            scope,
            session_timers: None,
            events: None,
            stage: SimulationStage::Idle,
        }
    }

    /// Cancel `timers` once a run completes.
    pub fn stopping_timers(mut self, timers: TimerScope) -> Self {
        self.session_timers = Some(timers);
        self
    }

    /// Receive progress events. Replaces any previous subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SimulationEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    pub fn stage(&self) -> SimulationStage {
        self.stage
    }

    fn emit(&self, event: SimulationEvent) {
        if let Some(tx) = &self.events {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    }

    async fn run_stages(&mut self, session: &FormSession) -> DriverOutcome {
        for stage in SimulationStage::TIMED {
            self.stage = stage;
            if let Some((title, detail)) = stage.status() {
                tracing::info!(session = %session.id(), stage = %stage, "{title}");
                self.emit(SimulationEvent::Status {
                    stage,
                    title,
                    detail,
                });
            }
            let delay = stage
                .index()
                .map(|i| self.config.stage_durations[i])
                .unwrap_or_default();
            if self.scope.sleep(delay).await.is_err() {
                tracing::info!(session = %session.id(), stage = %stage, "simulation cancelled");
                metrics::counter!("redeem_simulation_cancelled_total", "stage" => stage.as_str())
                    .increment(1);
                self.emit(SimulationEvent::Cancelled { stage });
                return DriverOutcome::Cancelled;
            }
        }

        let record = CompletionRecord {
            prize_amount: session.prize().prize_amount.clone(),
            masked_key: session.payment_key().masked(),
            protocol_code: generate_protocol_code(&self.config.protocol_prefix),
        };
        self.stage = SimulationStage::Done;
        tracing::info!(
            session = %session.id(),
            protocol = %record.protocol_code,
            "Prêmio liberado!"
        );
        self.emit(SimulationEvent::Completed(record.clone()));
        if let Some(timers) = &self.session_timers {
            timers.cancel();
        }
        DriverOutcome::Completed(record)
    }
}

impl ConfirmationDriver for PaymentSimulator {
    async fn run(&mut self, session: &FormSession) -> DriverOutcome {
        self.run_stages(session).await
    }
}
