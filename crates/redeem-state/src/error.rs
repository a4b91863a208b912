//! # Transition Errors
//!
//! A refused transition is an expected user-facing outcome, not a fault:
//! the caller shows a notice and the session stays where it was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use redeem_core::messages::Notice;

use crate::session::StepId;

/// A single requirement a step gate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    DisplayName,
    DocumentId,
    Phone,
    Email,
    PaymentKey,
    TermsAccepted,
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::DisplayName => "display_name",
            Self::DocumentId => "document_id",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::PaymentKey => "payment_key",
            Self::TermsAccepted => "terms_accepted",
        };
        f.write_str(s)
    }
}

/// Reasons a state machine entry point refuses to act.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Forward navigation or confirmation denied because `step` has unmet
    /// requirements.
    #[error("requirements of {step} not met: {}", join(.unmet))]
    GuardRejected {
        /// The step whose gate refused.
        step: StepId,
        /// What is still missing, in field order.
        unmet: Vec<Requirement>,
    },

    /// Confirmation was requested away from the consent step.
    #[error("confirmation is only available on {}, session is on {step}", StepId::Step3)]
    NotAtConfirmation {
        /// The step the session is on.
        step: StepId,
    },

    /// Navigation target is not a form step.
    #[error("cannot navigate to {target}")]
    InvalidTarget {
        target: StepId,
    },

    /// The session completed and no longer accepts changes.
    #[error("session is completed and frozen")]
    Frozen,
}

impl TransitionError {
    /// The step named by a guard rejection.
    pub fn rejected_step(&self) -> Option<StepId> {
        match self {
            Self::GuardRejected { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Notice to show the user, if the refusal is one they can fix.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::GuardRejected { step: StepId::Step3, .. } => Some(Notice::TermsRequired),
            Self::GuardRejected { .. } => Some(Notice::IncompleteStep),
            _ => None,
        }
    }
}

fn join(unmet: &[Requirement]) -> String {
    unmet
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_rejection_display_names_step_and_fields() {
        let err = TransitionError::GuardRejected {
            step: StepId::Step1,
            unmet: vec![Requirement::DocumentId, Requirement::Email],
        };
        assert_eq!(
            err.to_string(),
            "requirements of STEP_1 not met: document_id, email"
        );
        assert_eq!(err.rejected_step(), Some(StepId::Step1));
    }

    #[test]
    fn test_not_at_confirmation_display() {
        let err = TransitionError::NotAtConfirmation { step: StepId::Step2 };
        assert_eq!(
            err.to_string(),
            "confirmation is only available on STEP_3, session is on STEP_2"
        );
        assert_eq!(err.rejected_step(), None);
        assert_eq!(err.notice(), None);
    }

    #[test]
    fn test_notice_for_terms_rejection() {
        let err = TransitionError::GuardRejected {
            step: StepId::Step3,
            unmet: vec![Requirement::TermsAccepted],
        };
        assert_eq!(err.notice(), Some(Notice::TermsRequired));
        let err = TransitionError::GuardRejected {
            step: StepId::Step2,
            unmet: vec![Requirement::PaymentKey],
        };
        assert_eq!(err.notice(), Some(Notice::IncompleteStep));
    }
}
