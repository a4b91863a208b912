//! # Payment Key Masking
//!
//! Derives a partially redacted display string from a payment key. Masked
//! values are for presentation only and are never submitted anywhere.
//!
//! ## Reveal Policy
//!
//! | Key type | Normalization | Revealed                    | Example                         |
//! |----------|---------------|-----------------------------|---------------------------------|
//! | Document | digits only   | first 3, last 2             | `52998224725` → `529.***.***-25` |
//! | Email    | none          | first 2 of local, domain    | `ab@cd.com` → `ab***@cd.com`     |
//! | Phone    | digits only   | area code, last 4           | `11999999999` → `11*****9999`    |
//! | Random   | none          | first 8, last 4             | `abcdefgh…wxyz` → `abcdefgh***wxyz` |
//!
//! Inputs too short for both ends of the policy reveal only the leading
//! part followed by [`REDACTED`]. Slicing is by character, so non-ASCII
//! input cannot split a code point.

use crate::key::KeyType;

/// Marker used wherever a run of characters is hidden.
pub const REDACTED: &str = "***";

/// Marker between the revealed ends of a full 11-digit document.
const DOCUMENT_MARKER: &str = ".***.***-";

/// Mask `raw` according to `key_type`'s reveal policy.
pub fn mask_key(key_type: KeyType, raw: &str) -> String {
    match key_type {
        KeyType::Document => mask_document(raw),
        KeyType::Email => mask_email(raw),
        KeyType::Phone => mask_phone(raw),
        KeyType::Random => reveal_edges(raw.trim(), 8, 4, REDACTED),
    }
}

fn mask_document(raw: &str) -> String {
    let digits = digits_only(raw);
    reveal_edges(&digits, 3, 2, DOCUMENT_MARKER)
}

fn mask_email(raw: &str) -> String {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => format!("{}{REDACTED}@{domain}", head(local, 2)),
        None => format!("{}{REDACTED}", head(raw, 2)),
    }
}

fn mask_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    let len = digits.chars().count();
    if len <= 6 {
        return format!("{}{REDACTED}", head(&digits, 2));
    }
    let hidden = "*".repeat(len - 6);
    reveal_edges(&digits, 2, 4, &hidden)
}

/// Keep the first `keep_head` and last `keep_tail` characters of `value`,
/// joined by `marker`. When `value` is not longer than both ends together,
/// only the head survives and the marker is [`REDACTED`].
fn reveal_edges(value: &str, keep_head: usize, keep_tail: usize, marker: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= keep_head + keep_tail {
        return format!("{}{REDACTED}", head(value, keep_head.min(chars.len())));
    }
    let first: String = chars[..keep_head].iter().collect();
    let last: String = chars[chars.len() - keep_tail..].iter().collect();
    format!("{first}{marker}{last}")
}

fn head(value: &str, n: usize) -> String {
    value.chars().take(n).collect()
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
