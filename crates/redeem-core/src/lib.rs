//! # redeem-core: Foundational Types for the Redemption Wizard
//!
//! Every other crate in the workspace depends on `redeem-core`; it depends on
//! nothing internal. Everything here is pure: no I/O, no clocks, no state.
//!
//! ## Modules
//!
//! - **Validators** (`validate.rs`): one boolean predicate per data kind,
//!   including the two-digit modulo-11 document checksum.
//! - **Key types** (`key.rs`): the four payment-key kinds and their inbound
//!   literal codes.
//! - **Masking** (`mask.rs`): privacy-safe display strings for a payment key.
//! - **Formatting** (`format.rs`): as-you-type punctuation for document and
//!   phone inputs.
//! - **Messages** (`messages.rs`): pt-BR status text for field validity and
//!   user notifications. Validators never produce text themselves.
//!
//! ## Crate Policy
//!
//! - Validators, maskers, and formatters are total: they return a value for
//!   every input and never panic.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod format;
pub mod key;
pub mod mask;
pub mod messages;
pub mod validate;

pub use error::CoreError;
pub use format::{format_document_input, format_phone_input};
pub use key::KeyType;
pub use mask::mask_key;
pub use validate::{
    validate, validate_document_id, validate_email, validate_name, validate_phone,
    validate_random_key, FieldKind,
};
