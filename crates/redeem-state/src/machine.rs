//! # Form State Machine
//!
//! Owns the [`FormSession`] and is the only writer to it.
//!
//! ## States
//!
//! ```text
//! Step1 ──go_to──▶ Step2 ──go_to──▶ Step3 ──confirm_and_submit──▶ Success
//!   ▲                │  ▲             │                            (frozen)
//!   └────go_to───────┘  └───go_to─────┘
//! ```
//!
//! Backward moves always succeed. A forward move succeeds only when every
//! step being left behind has all of its requirements met:
//!
//! | Step  | Requirements                               |
//! |-------|--------------------------------------------|
//! | Step1 | display name, document, phone, email valid |
//! | Step2 | payment key valid                          |
//! | Step3 | terms accepted                             |
//!
//! `Success` is reached only through [`FormStateMachine::confirm_and_submit`],
//! which hands the session to a [`ConfirmationDriver`] and records its
//! completion. From then on every mutating entry point returns
//! [`TransitionError::Frozen`].

use std::future::Future;

use redeem_core::KeyType;

use crate::error::{Requirement, TransitionError};
use crate::session::{CompletionRecord, Field, FormSession, Prefill, PrizeContext, StepId};

// ─── Confirmation seam ───────────────────────────────────────────────

/// How a confirmation run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverOutcome {
    /// The run reached its final stage.
    Completed(CompletionRecord),
    /// The run was cancelled before completing.
    Cancelled,
}

/// Runs the confirmation sequence for a session that passed every gate.
///
/// The returned future is polled on a single-threaded executor and does not
/// need to be `Send`.
pub trait ConfirmationDriver {
    fn run(&mut self, session: &FormSession) -> impl Future<Output = DriverOutcome>;
}

/// Result of [`FormStateMachine::confirm_and_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// This call ran the confirmation and the session is now complete.
    Completed(CompletionRecord),
    /// The session was already complete; nothing ran.
    AlreadyCompleted(CompletionRecord),
    /// The run was cancelled; the session stays on the consent step.
    Cancelled,
}

// ─── Machine ─────────────────────────────────────────────────────────

/// Gatekeeper of one wizard session.
#[derive(Debug, Clone)]
pub struct FormStateMachine {
    session: FormSession,
}

impl Default for FormStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl FormStateMachine {
    /// A fresh session on step 1 with default prize data.
    pub fn new() -> Self {
        Self {
            session: FormSession::new(PrizeContext::default()),
        }
    }

    /// A fresh session seeded from page-load context.
    ///
    /// A prefilled name goes through the same validation as typed input.
    pub fn with_prefill(prefill: Prefill) -> Self {
        let mut prize = PrizeContext::default();
        if let Some(amount) = prefill.prize_amount {
            prize.prize_amount = amount;
        }
        if let Some(protocol) = prefill.protocol {
            prize.reference_protocol = protocol;
        }
        let mut machine = Self {
            session: FormSession::new(prize),
        };
        if let Some(name) = prefill.display_name.filter(|n| !n.is_empty()) {
            machine.store_raw(Field::DisplayName, name);
        }
        machine
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn step(&self) -> StepId {
        self.session.step
    }

    // ── Field input ──────────────────────────────────────────────────

    /// Store `value` verbatim and return whether it is valid.
    ///
    /// Invalid input is kept so the user never loses what they typed; it is
    /// simply not committed as the field's accepted value.
    pub fn enter_raw_value(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<bool, TransitionError> {
        self.ensure_mutable()?;
        Ok(self.store_raw(field, value.into()))
    }

    fn store_raw(&mut self, field: Field, value: String) -> bool {
        let valid = match field.candidate_kind() {
            Some(kind) => match self.session.candidate.entry_mut(field) {
                Some(entry) => entry.set(kind, value),
                None => false,
            },
            None => self.session.payment_key.set_raw(value),
        };
        tracing::trace!(session = %self.session.id, ?field, valid, "field updated");
        valid
    }

    /// Select the payment key type. Always clears the key value, even when
    /// the old value would satisfy the new type.
    pub fn set_key_type(&mut self, key_type: KeyType) -> Result<(), TransitionError> {
        self.ensure_mutable()?;
        self.session.payment_key.set_type(key_type);
        tracing::debug!(session = %self.session.id, key_type = %key_type, "payment key type selected");
        Ok(())
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) -> Result<(), TransitionError> {
        self.ensure_mutable()?;
        self.session.terms_accepted = accepted;
        Ok(())
    }

    // ── Gates ────────────────────────────────────────────────────────

    /// Requirements of `step` that are not currently met, in field order.
    pub fn unmet_requirements(&self, step: StepId) -> Vec<Requirement> {
        let s = &self.session;
        match step {
            StepId::Step1 => {
                let c = &s.candidate;
                [
                    (Requirement::DisplayName, c.display_name.is_valid()),
                    (Requirement::DocumentId, c.document_id.is_valid()),
                    (Requirement::Phone, c.phone.is_valid()),
                    (Requirement::Email, c.email.is_valid()),
                ]
                .into_iter()
                .filter(|(_, ok)| !ok)
                .map(|(req, _)| req)
                .collect()
            }
            StepId::Step2 if !s.payment_key.is_valid() => vec![Requirement::PaymentKey],
            StepId::Step3 if !s.terms_accepted => vec![Requirement::TermsAccepted],
            StepId::Step2 | StepId::Step3 | StepId::Success => Vec::new(),
        }
    }

    /// Whether the current step's forward action is enabled.
    pub fn can_advance(&self) -> bool {
        !self.session.is_frozen() && self.unmet_requirements(self.session.step).is_empty()
    }

    /// First step in `from..to` with unmet requirements.
    fn check_gates(&self, from: StepId, to: StepId) -> Result<(), TransitionError> {
        for step in StepId::FORM_STEPS {
            if step < from || step >= to {
                continue;
            }
            let unmet = self.unmet_requirements(step);
            if !unmet.is_empty() {
                tracing::debug!(
                    session = %self.session.id,
                    step = %step,
                    unmet = ?unmet,
                    "step gate refused"
                );
                metrics::counter!("redeem_guard_rejections_total", "step" => step.as_str())
                    .increment(1);
                return Err(TransitionError::GuardRejected { step, unmet });
            }
        }
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Move to `target` and return the new step.
    ///
    /// Moving back or staying put always succeeds. Moving forward checks
    /// the gate of every step being left behind and refuses at the first
    /// one with unmet requirements, leaving the step unchanged.
    pub fn go_to(&mut self, target: StepId) -> Result<StepId, TransitionError> {
        self.ensure_mutable()?;
        if target.is_terminal() {
            return Err(TransitionError::InvalidTarget { target });
        }
        let from = self.session.step;
        if target > from {
            self.check_gates(from, target)?;
        }
        if target != from {
            self.move_to(target);
        }
        Ok(target)
    }

    fn move_to(&mut self, to: StepId) {
        let from = self.session.step;
        self.session.step = to;
        tracing::debug!(session = %self.session.id, from = %from, to = %to, "step transition");
        metrics::counter!("redeem_step_transitions_total", "to" => to.as_str()).increment(1);
    }

    // ── Confirmation ─────────────────────────────────────────────────

    /// Confirm the redemption on the consent step.
    ///
    /// Requires step 3 with terms accepted (and every earlier gate still
    /// met). The driver runs while this machine is mutably borrowed, so a
    /// second run cannot start while one is in flight. Once complete, later
    /// calls return the stored record without invoking the driver.
    pub async fn confirm_and_submit<D: ConfirmationDriver>(
        &mut self,
        driver: &mut D,
    ) -> Result<SubmitOutcome, TransitionError> {
        if let Some(record) = &self.session.completion {
            tracing::debug!(session = %self.session.id, "confirmation repeated after completion");
            return Ok(SubmitOutcome::AlreadyCompleted(record.clone()));
        }
        if self.session.step != StepId::Step3 {
            return Err(TransitionError::NotAtConfirmation {
                step: self.session.step,
            });
        }
        self.check_gates(StepId::Step1, StepId::Success)?;

        tracing::info!(session = %self.session.id, "confirmation started");
        let outcome = driver.run(&self.session).await;
        match outcome {
            DriverOutcome::Completed(record) => {
                self.complete(record.clone());
                Ok(SubmitOutcome::Completed(record))
            }
            DriverOutcome::Cancelled => {
                tracing::info!(session = %self.session.id, "confirmation cancelled");
                Ok(SubmitOutcome::Cancelled)
            }
        }
    }

    /// Completion handler: enter `Success` and freeze the session.
    fn complete(&mut self, record: CompletionRecord) {
        self.move_to(StepId::Success);
        tracing::info!(
            session = %self.session.id,
            protocol = %record.protocol_code,
            "redemption completed"
        );
        metrics::counter!("redeem_completed_total").increment(1);
        self.session.completion = Some(record);
    }

    fn ensure_mutable(&self) -> Result<(), TransitionError> {
        if self.session.is_frozen() {
            return Err(TransitionError::Frozen);
        }
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
