//! # Session Record
//!
//! The single owned record of one wizard run. It is created with empty
//! values on step 1, mutated only through [`crate::FormStateMachine`], and
//! dropped when the page goes away. Nothing here is persisted.
//!
//! Field validity is never stored independently of the raw text: every
//! setter recomputes it, so `valid` always reflects `raw` under the current
//! rule.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use redeem_core::messages::key_field_kind;
use redeem_core::{validate, FieldKind, KeyType};

/// Default prize amount shown when no prefill is supplied.
pub const DEFAULT_PRIZE_AMOUNT: &str = "R$ 2.500,00";

/// Default reference protocol shown before redemption.
pub const DEFAULT_REFERENCE_PROTOCOL: &str = "TSN-2025-001234";

/// Days from session start until the prize expires.
pub const PRIZE_VALIDITY_DAYS: u64 = 30;

/// Identifier of one session, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

// ─── Steps ───────────────────────────────────────────────────────────

/// Wizard step. Ordering follows the wizard: `Step1 < Step2 < Step3 < Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StepId {
    /// Personal data.
    Step1,
    /// Payment key.
    Step2,
    /// Consent and confirmation.
    Step3,
    /// Redemption completed (terminal, frozen).
    Success,
}

impl StepId {
    /// The three navigable steps, in order.
    pub const FORM_STEPS: [StepId; 3] = [Self::Step1, Self::Step2, Self::Step3];

    /// 1-based step number; `Success` is 4.
    pub fn number(&self) -> u8 {
        match self {
            Self::Step1 => 1,
            Self::Step2 => 2,
            Self::Step3 => 3,
            Self::Success => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Step1),
            2 => Some(Self::Step2),
            3 => Some(Self::Step3),
            4 => Some(Self::Success),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Step1 => "STEP_1",
            Self::Step2 => "STEP_2",
            Self::Step3 => "STEP_3",
            Self::Success => "SUCCESS",
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Fields ──────────────────────────────────────────────────────────

/// Inputs that accept raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DisplayName,
    DocumentId,
    Phone,
    Email,
    PaymentKey,
}

impl Field {
    /// The candidate fields collected on step 1.
    pub const CANDIDATE: [Field; 4] = [
        Self::DisplayName,
        Self::DocumentId,
        Self::Phone,
        Self::Email,
    ];

    /// Validator kind for a candidate field. The payment key's kind depends
    /// on the selected key type and is resolved by [`PaymentKey`].
    pub fn candidate_kind(&self) -> Option<FieldKind> {
        match self {
            Self::DisplayName => Some(FieldKind::Name),
            Self::DocumentId => Some(FieldKind::Document),
            Self::Phone => Some(FieldKind::Phone),
            Self::Email => Some(FieldKind::Email),
            Self::PaymentKey => None,
        }
    }
}

/// Raw input of one candidate field with its validity.
///
/// `accepted` holds the committed value and is set only while the raw text
/// passes the field's validator. Names are committed trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    raw: String,
    valid: bool,
    accepted: Option<String>,
}

impl FieldEntry {
    pub(crate) fn set(&mut self, kind: FieldKind, raw: String) -> bool {
        self.valid = validate(kind, &raw);
        self.accepted = self.valid.then(|| match kind {
            FieldKind::Name => raw.trim().to_string(),
            _ => raw.clone(),
        });
        self.raw = raw;
        self.valid
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn accepted(&self) -> Option<&str> {
        self.accepted.as_deref()
    }
}

/// Identity and contact data of the prize winner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub display_name: FieldEntry,
    pub document_id: FieldEntry,
    pub phone: FieldEntry,
    pub email: FieldEntry,
}

impl Candidate {
    /// The entry backing a candidate field; `None` for the payment key.
    pub fn entry(&self, field: Field) -> Option<&FieldEntry> {
        match field {
            Field::DisplayName => Some(&self.display_name),
            Field::DocumentId => Some(&self.document_id),
            Field::Phone => Some(&self.phone),
            Field::Email => Some(&self.email),
            Field::PaymentKey => None,
        }
    }

    pub(crate) fn entry_mut(&mut self, field: Field) -> Option<&mut FieldEntry> {
        match field {
            Field::DisplayName => Some(&mut self.display_name),
            Field::DocumentId => Some(&mut self.document_id),
            Field::Phone => Some(&mut self.phone),
            Field::Email => Some(&mut self.email),
            Field::PaymentKey => None,
        }
    }
}

// ─── Payment key ─────────────────────────────────────────────────────

/// Payment destination key.
///
/// `valid` is recomputed from `raw_value` under `key_type` on every write.
/// Changing the type clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentKey {
    key_type: KeyType,
    raw_value: String,
    valid: bool,
}

impl PaymentKey {
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Validator kind of the current key type.
    pub fn field_kind(&self) -> FieldKind {
        key_field_kind(self.key_type)
    }

    /// Display-only masked form of the key.
    pub fn masked(&self) -> String {
        self.key_type.mask(&self.raw_value)
    }

    pub(crate) fn set_type(&mut self, key_type: KeyType) {
        self.key_type = key_type;
        self.raw_value.clear();
        self.valid = false;
    }

    pub(crate) fn set_raw(&mut self, raw: String) -> bool {
        self.valid = self.key_type.validate(&raw);
        self.raw_value = raw;
        self.valid
    }
}

// ─── Prize context ───────────────────────────────────────────────────

/// Display data about the prize, taken from page-load context and never
/// re-validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeContext {
    /// Prize amount as displayed, e.g. `R$ 2.500,00`.
    pub prize_amount: String,
    /// Reference protocol shown before redemption.
    pub reference_protocol: String,
    /// Last day the prize can be redeemed.
    pub expires_on: NaiveDate,
}

impl PrizeContext {
    /// Expiry date as `dd/mm/yyyy`.
    pub fn expiry_display(&self) -> String {
        self.expires_on.format("%d/%m/%Y").to_string()
    }

    /// Amount without the currency symbol, as shown in the prize banner.
    pub fn amount_without_currency(&self) -> &str {
        self.prize_amount
            .strip_prefix("R$ ")
            .unwrap_or(&self.prize_amount)
    }
}

impl Default for PrizeContext {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            prize_amount: DEFAULT_PRIZE_AMOUNT.to_string(),
            reference_protocol: DEFAULT_REFERENCE_PROTOCOL.to_string(),
            expires_on: today
                .checked_add_days(Days::new(PRIZE_VALIDITY_DAYS))
                .unwrap_or(today),
        }
    }
}

/// Optional initial values sourced from page-load context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub display_name: Option<String>,
    pub prize_amount: Option<String>,
    pub protocol: Option<String>,
}

// ─── Completion ──────────────────────────────────────────────────────

/// Result of a finished redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub prize_amount: String,
    pub masked_key: String,
    pub protocol_code: String,
}

// ─── Session ─────────────────────────────────────────────────────────

/// The whole state of one wizard run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSession {
    pub(crate) id: SessionId,
    pub(crate) step: StepId,
    pub(crate) candidate: Candidate,
    pub(crate) payment_key: PaymentKey,
    pub(crate) terms_accepted: bool,
    pub(crate) prize: PrizeContext,
    pub(crate) completion: Option<CompletionRecord>,
}

impl FormSession {
    pub(crate) fn new(prize: PrizeContext) -> Self {
        Self {
            id: SessionId::new(),
            step: StepId::Step1,
            candidate: Candidate::default(),
            payment_key: PaymentKey::default(),
            terms_accepted: false,
            prize,
            completion: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn step(&self) -> StepId {
        self.step
    }

    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    pub fn payment_key(&self) -> &PaymentKey {
        &self.payment_key
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn prize(&self) -> &PrizeContext {
        &self.prize
    }

    /// Protocol code generated on completion.
    pub fn protocol_code(&self) -> Option<&str> {
        self.completion.as_ref().map(|c| c.protocol_code.as_str())
    }

    pub fn completion(&self) -> Option<&CompletionRecord> {
        self.completion.as_ref()
    }

    /// Whether the session has reached its terminal state.
    pub fn is_frozen(&self) -> bool {
        self.completion.is_some()
    }

    /// Raw text of any field.
    pub fn raw_value(&self, field: Field) -> &str {
        match self.candidate.entry(field) {
            Some(entry) => entry.raw(),
            None => self.payment_key.raw_value(),
        }
    }

    /// Validity of any field.
    pub fn is_field_valid(&self, field: Field) -> bool {
        match self.candidate.entry(field) {
            Some(entry) => entry.is_valid(),
            None => self.payment_key.is_valid(),
        }
    }
}
