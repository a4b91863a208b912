//! Protocol codes issued when a redemption completes.
//!
//! A code is a fixed prefix followed by the six least-significant decimal
//! digits of the completion instant in epoch milliseconds. There is no
//! collision check; two completions exactly 1000 seconds apart to the
//! millisecond get the same suffix.

use chrono::Utc;

/// Prefix of generated protocol codes.
pub const DEFAULT_PROTOCOL_PREFIX: &str = "TSN-LIB-2025-";

/// Protocol code for a completion at `epoch_millis`.
pub fn protocol_code_at(prefix: &str, epoch_millis: i64) -> String {
    format!("{prefix}{:06}", epoch_millis.rem_euclid(1_000_000))
}

/// Protocol code for a completion happening now.
pub fn generate_protocol_code(prefix: &str) -> String {
    protocol_code_at(prefix, Utc::now().timestamp_millis())
}
