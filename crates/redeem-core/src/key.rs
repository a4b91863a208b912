//! # Payment Key Types
//!
//! A payment key is the destination identifier of an instant transfer. Its
//! kind decides which validator, mask, and input formatter apply. Inbound
//! selections arrive as the literal codes `cpf`, `email`, `phone`, and
//! `random`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::{format, mask, validate};

/// The kind of a payment key. Exactly one is active per session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// National document number (11-digit, checksummed).
    #[default]
    #[serde(rename = "cpf")]
    Document,
    /// Email address.
    #[serde(rename = "email")]
    Email,
    /// Mobile phone number with area code.
    #[serde(rename = "phone")]
    Phone,
    /// Opaque random token issued by the payment network.
    #[serde(rename = "random")]
    Random,
}

impl KeyType {
    /// All key types, in selector order.
    pub const ALL: [KeyType; 4] = [Self::Document, Self::Email, Self::Phone, Self::Random];

    /// The inbound literal code for this key type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Document => "cpf",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Random => "random",
        }
    }

    /// Whether `value` satisfies this key type's rule.
    ///
    /// An empty (or whitespace-only) value is never valid.
    pub fn validate(&self, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }
        match self {
            Self::Document => validate::validate_document_id(value),
            Self::Email => validate::validate_email(value),
            Self::Phone => validate::validate_phone(value),
            Self::Random => validate::validate_random_key(value),
        }
    }

    /// Privacy-safe display form of `value` under this key type.
    pub fn mask(&self, value: &str) -> String {
        mask::mask_key(*self, value)
    }

    /// Apply as-you-type formatting. Only document and phone inputs are
    /// reformatted; other kinds pass through unchanged.
    pub fn format_input(&self, value: &str) -> String {
        match self {
            Self::Document => format::format_document_input(value),
            Self::Phone => format::format_phone_input(value),
            Self::Email | Self::Random => value.to_string(),
        }
    }
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for KeyType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpf" => Ok(Self::Document),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "random" => Ok(Self::Random),
            _ => Err(CoreError::UnknownKeyType(s.to_string())),
        }
    }
}
