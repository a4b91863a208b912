//! # View Projection
//!
//! Rendering is a pure function of the session. [`SessionView`] carries
//! everything a front end needs: step indicator, per-field validity and
//! status text, button enablement, and the masked summary. Nothing in a view
//! is written back.

use serde::Serialize;

use redeem_core::messages::{field_message, key_input_hint, InputHint};
use redeem_core::KeyType;

use crate::machine::FormStateMachine;
use crate::session::{CompletionRecord, Field, FormSession, SessionId, StepId};

/// Privacy-safe summary shown on the consent step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedSummary {
    pub prize_amount: String,
    pub reference_protocol: String,
    pub display_name: String,
    pub masked_key: String,
}

impl MaskedSummary {
    /// Derive the summary from the current session.
    pub fn derive(session: &FormSession) -> Self {
        let name = &session.candidate().display_name;
        Self {
            prize_amount: session.prize().prize_amount.clone(),
            reference_protocol: session.prize().reference_protocol.clone(),
            display_name: name.accepted().unwrap_or(name.raw().trim()).to_string(),
            masked_key: session.payment_key().masked(),
        }
    }
}

/// Progress indicator state of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorState {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub step: StepId,
    pub state: IndicatorState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub raw: String,
    pub valid: bool,
    /// Status text; absent while the field is blank.
    pub message: Option<&'static str>,
}

/// Everything needed to render the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub step: StepId,
    pub indicator: Vec<StepIndicator>,
    pub fields: Vec<FieldView>,
    pub key_type: KeyType,
    pub key_hint: InputHint,
    pub terms_accepted: bool,
    /// Whether the current step's forward (or confirm) button is enabled.
    pub can_advance: bool,
    pub prize_expiry: String,
    pub summary: Option<MaskedSummary>,
    pub completion: Option<CompletionRecord>,
}

impl FormStateMachine {
    /// Project the session for rendering.
    pub fn view(&self) -> SessionView {
        let session = self.session();
        let step = session.step();

        let indicator = StepId::FORM_STEPS
            .into_iter()
            .map(|s| StepIndicator {
                step: s,
                state: indicator_state(s, step),
            })
            .collect();

        let mut fields: Vec<FieldView> = Field::CANDIDATE
            .into_iter()
            .filter_map(|field| {
                let kind = field.candidate_kind()?;
                let entry = session.candidate().entry(field)?;
                Some(FieldView {
                    field,
                    raw: entry.raw().to_string(),
                    valid: entry.is_valid(),
                    message: field_message(kind, entry.raw(), entry.is_valid()),
                })
            })
            .collect();
        let key = session.payment_key();
        fields.push(FieldView {
            field: Field::PaymentKey,
            raw: key.raw_value().to_string(),
            valid: key.is_valid(),
            message: field_message(key.field_kind(), key.raw_value(), key.is_valid()),
        });

        let summary = (step >= StepId::Step3).then(|| MaskedSummary::derive(session));

        SessionView {
            session_id: session.id(),
            step,
            indicator,
            fields,
            key_type: key.key_type(),
            key_hint: key_input_hint(key.key_type()),
            terms_accepted: session.terms_accepted(),
            can_advance: self.can_advance(),
            prize_expiry: session.prize().expiry_display(),
            summary,
            completion: session.completion().cloned(),
        }
    }
}

fn indicator_state(step: StepId, current: StepId) -> IndicatorState {
    if current.is_terminal() || step < current {
        IndicatorState::Completed
    } else if step == current {
        IndicatorState::Active
    } else {
        IndicatorState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(view: &SessionView) -> Vec<IndicatorState> {
        view.indicator.iter().map(|i| i.state).collect()
    }

    #[test]
    fn test_fresh_view() {
        let m = FormStateMachine::new();
        let view = m.view();
        assert_eq!(view.step, StepId::Step1);
        assert_eq!(
            states(&view),
            vec![IndicatorState::Active, IndicatorState::Pending, IndicatorState::Pending]
        );
        assert_eq!(view.fields.len(), 5);
        assert!(view.fields.iter().all(|f| f.message.is_none()));
        assert!(!view.can_advance);
        assert!(view.summary.is_none());
    }

    #[test]
    fn test_field_messages_follow_validity() {
        let mut m = FormStateMachine::new();
        m.enter_raw_value(Field::DocumentId, "123").unwrap();
        m.enter_raw_value(Field::Email, "ana@mail.com").unwrap();
        let view = m.view();
        let doc = view.fields.iter().find(|f| f.field == Field::DocumentId).unwrap();
        assert_eq!(doc.message, Some("✗ CPF inválido"));
        let email = view.fields.iter().find(|f| f.field == Field::Email).unwrap();
        assert_eq!(email.message, Some("✓ E-mail válido"));
    }

    #[test]
    fn test_summary_on_step3_is_masked() {
        let mut m = FormStateMachine::new();
        m.enter_raw_value(Field::DisplayName, " Ana Lima ").unwrap();
        m.enter_raw_value(Field::DocumentId, "52998224725").unwrap();
        m.enter_raw_value(Field::Phone, "11999999999").unwrap();
        m.enter_raw_value(Field::Email, "ana@mail.com").unwrap();
        m.go_to(StepId::Step2).unwrap();
        m.enter_raw_value(Field::PaymentKey, "529.982.247-25").unwrap();
        m.go_to(StepId::Step3).unwrap();

        let view = m.view();
        assert_eq!(
            states(&view),
            vec![IndicatorState::Completed, IndicatorState::Completed, IndicatorState::Active]
        );
        let summary = view.summary.unwrap();
        assert_eq!(summary.display_name, "Ana Lima");
        assert_eq!(summary.masked_key, "529.***.***-25");
        assert!(!view.can_advance);
    }
}
