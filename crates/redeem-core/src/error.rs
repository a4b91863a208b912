//! # Error Types
//!
//! Validators and maskers are total and have no error type. The only
//! fallible operations in this crate parse inbound literal codes.

use thiserror::Error;

/// Errors raised while parsing inbound codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The key-type code is not one of `cpf`, `email`, `phone`, `random`.
    #[error("unknown payment key type code: {0:?}")]
    UnknownKeyType(String),

    /// The field kind is not one of the validated kinds.
    #[error("unknown field kind: {0:?}")]
    UnknownFieldKind(String),
}
