//! # Inspection Subcommands
//!
//! `validate`, `mask`, and `format`: one-shot access to the pure functions
//! of `redeem-core`, useful for checking inputs without running a session.

use clap::Args;
use serde::Serialize;

use redeem_core::messages::field_message;
use redeem_core::{validate, FieldKind, KeyType};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Data kind: name, cpf, email, phone, or random.
    pub kind: FieldKind,

    /// Value to check.
    pub value: String,
}

/// Arguments for the mask and format subcommands.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Payment key type: cpf, email, phone, or random.
    pub key_type: KeyType,

    /// Raw key value.
    pub value: String,
}

/// Outcome of `redeem validate`, printed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub kind: FieldKind,
    pub valid: bool,
    pub message: Option<&'static str>,
}

pub fn run_validate(args: &ValidateArgs) -> ValidationReport {
    let valid = validate(args.kind, &args.value);
    ValidationReport {
        kind: args.kind,
        valid,
        message: field_message(args.kind, &args.value, valid),
    }
}

pub fn run_mask(args: &KeyArgs) -> String {
    args.key_type.mask(&args.value)
}

pub fn run_format(args: &KeyArgs) -> String {
    args.key_type.format_input(&args.value)
}
