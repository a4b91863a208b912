//! # Localized Messages (pt-BR)
//!
//! Human-readable status text shown next to fields and in notifications.
//! Kept apart from the validators so the rules can be reused with another
//! locale or no text at all.

use serde::{Deserialize, Serialize};

use crate::key::KeyType;
use crate::validate::FieldKind;

/// Status line for a field, or `None` when the input is blank (nothing has
/// been typed yet, so nothing is reported).
pub fn field_message(kind: FieldKind, value: &str, valid: bool) -> Option<&'static str> {
    if value.trim().is_empty() {
        return None;
    }
    let text = match (kind, valid) {
        (FieldKind::Name, true) => "✓ Nome válido",
        (FieldKind::Name, false) => "✗ Nome deve ter pelo menos 3 caracteres e conter apenas letras",
        (FieldKind::Document, true) => "✓ CPF válido",
        (FieldKind::Document, false) => "✗ CPF inválido",
        (FieldKind::Email, true) => "✓ E-mail válido",
        (FieldKind::Email, false) => "✗ E-mail inválido",
        (FieldKind::Phone, true) => "✓ Telefone válido",
        (FieldKind::Phone, false) => "✗ Telefone inválido",
        (FieldKind::RandomKey, true) => "✓ Chave válida",
        (FieldKind::RandomKey, false) => "✗ Chave deve ter pelo menos 32 caracteres",
    };
    Some(text)
}

/// The validator kind used for a payment key of the given type.
pub fn key_field_kind(key_type: KeyType) -> FieldKind {
    match key_type {
        KeyType::Document => FieldKind::Document,
        KeyType::Email => FieldKind::Email,
        KeyType::Phone => FieldKind::Phone,
        KeyType::Random => FieldKind::RandomKey,
    }
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Notifications raised by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Forward navigation was refused because the step is incomplete.
    IncompleteStep,
    /// Confirmation was refused because the terms were not accepted.
    TermsRequired,
    /// The simulated redemption finished.
    PrizeReleased,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Self::IncompleteStep => "Por favor, complete todos os campos obrigatórios",
            Self::TermsRequired => "Por favor, aceite os termos para continuar",
            Self::PrizeReleased => "Prêmio liberado com sucesso!",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::IncompleteStep | Self::TermsRequired => Severity::Error,
            Self::PrizeReleased => Severity::Success,
        }
    }
}

/// Placeholder and length limit for the payment-key input of a key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputHint {
    pub placeholder: &'static str,
    pub max_length: usize,
}

pub fn key_input_hint(key_type: KeyType) -> InputHint {
    match key_type {
        KeyType::Document => InputHint {
            placeholder: "Digite seu CPF (000.000.000-00)",
            max_length: 14,
        },
        KeyType::Email => InputHint {
            placeholder: "Digite seu e-mail (exemplo@email.com)",
            max_length: 100,
        },
        KeyType::Phone => InputHint {
            placeholder: "Digite seu celular (11) 99999-9999",
            max_length: 15,
        },
        KeyType::Random => InputHint {
            placeholder: "Digite sua chave aleatória",
            max_length: 100,
        },
    }
}
