//! Wiring of one redemption session: the state machine, the payment
//! simulator, and the session countdowns, all under one root
//! [`TimerScope`].
//!
//! ```text
//! root
//!  ├── simulation   (stage delays)
//!  └── timers       (countdown ticks, also cancelled on completion)
//! ```
//!
//! Tearing down the runtime cancels the root, which stops every pending
//! delay. Dropping it does the same.

use tokio::sync::mpsc;

use redeem_state::{
    FormEvent, FormStateMachine, Prefill, SessionView, SubmitOutcome, Transition, TransitionError,
};

use crate::config::SimulationConfig;
use crate::countdown::SessionTimers;
use crate::scope::TimerScope;
use crate::simulator::{PaymentSimulator, SimulationEvent};

#[derive(Debug)]
pub struct RedemptionRuntime {
    machine: FormStateMachine,
    simulator: PaymentSimulator,
    timers: SessionTimers,
    root: TimerScope,
}

impl RedemptionRuntime {
    /// Open a session and start its countdowns. Must be called from within
    /// a Tokio runtime.
    pub fn start(config: SimulationConfig, prefill: Prefill) -> Self {
        let root = TimerScope::new();
        let timers_scope = root.child();
        let timers = SessionTimers::spawn(&config, timers_scope.clone());
        let simulator =
            PaymentSimulator::new(config, root.child()).stopping_timers(timers_scope);
        let machine = FormStateMachine::with_prefill(prefill);
        tracing::info!(session = %machine.session().id(), "redemption session opened");
        Self {
            machine,
            simulator,
            timers,
            root,
        }
    }

    pub fn machine(&self) -> &FormStateMachine {
        &self.machine
    }

    pub fn view(&self) -> SessionView {
        self.machine.view()
    }

    pub fn timers(&self) -> &SessionTimers {
        &self.timers
    }

    pub fn simulator(&self) -> &PaymentSimulator {
        &self.simulator
    }

    /// Receive simulation progress events.
    pub fn subscribe_simulation(&mut self) -> mpsc::UnboundedReceiver<SimulationEvent> {
        self.simulator.subscribe()
    }

    /// Apply a UI event.
    pub fn handle(&mut self, event: FormEvent) -> Result<Transition, TransitionError> {
        self.machine.handle(event)
    }

    /// Run the confirmation through the payment simulator.
    pub async fn confirm(&mut self) -> Result<SubmitOutcome, TransitionError> {
        self.machine.confirm_and_submit(&mut self.simulator).await
    }

    /// A handle that tears the session down from elsewhere, e.g. while
    /// [`confirm`](Self::confirm) holds the runtime.
    pub fn teardown_handle(&self) -> TimerScope {
        self.root.clone()
    }

    /// Cancel every pending delay. Idempotent.
    pub fn teardown(&self) {
        if !self.root.is_cancelled() {
            tracing::info!(session = %self.machine.session().id(), "redemption session closed");
        }
        self.root.cancel();
    }
}

impl Drop for RedemptionRuntime {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
