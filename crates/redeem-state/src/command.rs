//! # Command Interface
//!
//! Adapters translate UI events into [`FormEvent`]s and feed them to
//! [`FormStateMachine::handle`]. The returned [`Transition`] says what
//! changed; rendering is then a projection of the session (see
//! [`crate::view`]).
//!
//! Confirmation is asynchronous and is not an event here: `Advance` on the
//! consent step answers [`Transition::ConfirmRequested`] and the caller
//! awaits [`FormStateMachine::confirm_and_submit`].

use serde::{Deserialize, Serialize};

use redeem_core::KeyType;

use crate::error::{Requirement, TransitionError};
use crate::machine::FormStateMachine;
use crate::session::{Field, StepId};

/// Synchronous user events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// Text typed into a field.
    Input { field: Field, value: String },
    /// Payment key type picked in the selector.
    SelectKeyType { key_type: KeyType },
    /// Terms checkbox toggled.
    SetTerms { accepted: bool },
    /// Navigate directly to a step.
    GoTo { step: StepId },
    /// "Next" button or Enter key.
    Advance,
    /// "Previous" button.
    Back,
}

/// What an event changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "transition", rename_all = "snake_case")]
pub enum Transition {
    FieldUpdated { field: Field, valid: bool },
    KeyTypeChanged { key_type: KeyType },
    TermsUpdated { accepted: bool },
    StepChanged { from: StepId, to: StepId },
    /// The consent step is complete; the caller should start confirmation.
    ConfirmRequested,
    Unchanged,
}

impl FormStateMachine {
    /// Apply one event.
    pub fn handle(&mut self, event: FormEvent) -> Result<Transition, TransitionError> {
        let from = self.step();
        match event {
            FormEvent::Input { field, value } => {
                let valid = self.enter_raw_value(field, value)?;
                Ok(Transition::FieldUpdated { field, valid })
            }
            FormEvent::SelectKeyType { key_type } => {
                self.set_key_type(key_type)?;
                Ok(Transition::KeyTypeChanged { key_type })
            }
            FormEvent::SetTerms { accepted } => {
                self.set_terms_accepted(accepted)?;
                Ok(Transition::TermsUpdated { accepted })
            }
            FormEvent::GoTo { step } => self.navigate(from, step),
            FormEvent::Advance => match from {
                StepId::Step3 => self.request_confirmation(),
                _ => match from.next() {
                    Some(next) => self.navigate(from, next),
                    None => Err(TransitionError::Frozen),
                },
            },
            FormEvent::Back => match from.previous() {
                Some(prev) if !from.is_terminal() => self.navigate(from, prev),
                Some(_) => Err(TransitionError::Frozen),
                None => Ok(Transition::Unchanged),
            },
        }
    }

    fn navigate(&mut self, from: StepId, to: StepId) -> Result<Transition, TransitionError> {
        let to = self.go_to(to)?;
        if to == from {
            Ok(Transition::Unchanged)
        } else {
            Ok(Transition::StepChanged { from, to })
        }
    }

    fn request_confirmation(&self) -> Result<Transition, TransitionError> {
        if self.session().terms_accepted() {
            Ok(Transition::ConfirmRequested)
        } else {
            Err(TransitionError::GuardRejected {
                step: StepId::Step3,
                unmet: vec![Requirement::TermsAccepted],
            })
        }
    }
}
