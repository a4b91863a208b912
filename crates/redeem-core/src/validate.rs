//! # Field Validators
//!
//! One predicate per data kind. Every function here is pure and total: it
//! answers `true` or `false` for any input and never panics. Status text is
//! produced by [`crate::messages`], not here, so the engine stays
//! presentation-agnostic.
//!
//! ## Document Checksum
//!
//! The document number is an 11-digit national identifier with two
//! modulo-11 check digits:
//!
//! ```text
//! d0 d1 d2 d3 d4 d5 d6 d7 d8 | c1 | c2
//! c1 = (Σ d[i]·(10-i), i∈0..9  · 10) mod 11   (10 → 0)
//! c2 = (Σ d[i]·(11-i), i∈0..10 · 10) mod 11   (10 → 0)
//! ```
//!
//! Formatting punctuation (`529.982.247-25`) is ignored. Numbers made of a
//! single repeated digit satisfy the arithmetic but are rejected.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum trimmed length of a display name, in characters.
pub const NAME_MIN_CHARS: usize = 3;

/// Exact digit count of a document number.
pub const DOCUMENT_DIGITS: usize = 11;

/// Minimum total length of an email address.
pub const EMAIL_MIN_CHARS: usize = 5;

/// Minimum length of a random key.
pub const RANDOM_KEY_MIN_CHARS: usize = 32;

/// The kinds of value the wizard validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Person's display name.
    Name,
    /// National document number.
    Document,
    /// Email address.
    Email,
    /// Mobile phone number.
    Phone,
    /// Random payment key.
    RandomKey,
}

impl std::str::FromStr for FieldKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "cpf" | "document" => Ok(Self::Document),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "random" | "random_key" => Ok(Self::RandomKey),
            _ => Err(CoreError::UnknownFieldKind(s.to_string())),
        }
    }
}

/// Validate `value` as the given kind.
pub fn validate(kind: FieldKind, value: &str) -> bool {
    match kind {
        FieldKind::Name => validate_name(value),
        FieldKind::Document => validate_document_id(value),
        FieldKind::Email => validate_email(value),
        FieldKind::Phone => validate_phone(value),
        FieldKind::RandomKey => validate_random_key(value),
    }
}

/// A display name: at least three characters after trimming, made only of
/// letters (ASCII or accented Latin-1) and whitespace.
pub fn validate_name(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.chars().count() >= NAME_MIN_CHARS
        && trimmed
            .chars()
            .all(|c| is_name_letter(c) || c.is_whitespace())
}

/// ASCII letters plus the Latin-1 Supplement letters À..ÿ, excluding the
/// multiplication and division signs that sit inside that block.
fn is_name_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (('\u{C0}'..='\u{FF}').contains(&c) && c != '×' && c != '÷')
}

/// A checksummed 11-digit document number. Non-digit characters are
/// stripped before checking.
pub fn validate_document_id(value: &str) -> bool {
    let digits = digit_values(value);
    if digits.len() != DOCUMENT_DIGITS {
        return false;
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }
    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Modulo-11 check digit over `prefix`, weights descending from
/// `prefix.len() + 1` to 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder >= 10 {
        0
    } else {
        remainder
    }
}

/// Decimal digit values of `value`, all other characters dropped.
fn digit_values(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// An address shaped like `local@domain.tld`: no whitespace, exactly one
/// `@`, a non-empty local part, and a domain containing a `.` with
/// characters on both sides. Total length at least five characters.
pub fn validate_email(value: &str) -> bool {
    if value.chars().count() < EMAIL_MIN_CHARS {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// A mobile number: a two-digit area code (digits 1–9, optionally in
/// parentheses), an optional single space, then an 8- or 9-digit subscriber
/// number with an optional hyphen before its last four digits. The
/// digit-only length must be 10 or 11.
///
/// Accepted shapes include `(11) 99999-9999`, `11999999999`, `1133334444`.
pub fn validate_phone(value: &str) -> bool {
    let digit_count = value.chars().filter(char::is_ascii_digit).count();
    if digit_count != 10 && digit_count != 11 {
        return false;
    }
    phone_shape(value)
}

fn phone_shape(value: &str) -> bool {
    let rest = value.strip_prefix('(').unwrap_or(value);

    let mut chars = rest.chars();
    let area_ok = matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if is_area_digit(a) && is_area_digit(b)
    );
    if !area_ok {
        return false;
    }
    let rest = chars.as_str();
    let rest = rest.strip_prefix(')').unwrap_or(rest);
    let rest = match rest.chars().next() {
        Some(c) if c.is_whitespace() => &rest[c.len_utf8()..],
        _ => rest,
    };

    subscriber_shape(rest) || rest.strip_prefix('9').is_some_and(subscriber_shape)
}

fn is_area_digit(c: char) -> bool {
    matches!(c, '1'..='9')
}

/// `DDDD-DDDD` or `DDDDDDDD`, nothing else.
fn subscriber_shape(s: &str) -> bool {
    match s.split_once('-') {
        Some((head, tail)) => is_ascii_digits(head, 4) && is_ascii_digits(tail, 4),
        None => is_ascii_digits(s, 8),
    }
}

fn is_ascii_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// A random key: at least 32 characters drawn from ASCII letters, digits,
/// and `-`.
pub fn validate_random_key(value: &str) -> bool {
    value.len() >= RANDOM_KEY_MIN_CHARS
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── Name ─────────────────────────────────────────────────────────

    #[test]
    fn test_name_accepts_letters_and_spaces() {
        assert!(validate_name("Ana"));
        assert!(validate_name("  Maria da Silva  "));
    }

    #[test]
    fn test_name_accepts_accented_letters() {
        assert!(validate_name("José Antônio"));
        assert!(validate_name("Çäñ"));
    }

    #[test]
    fn test_name_rejects_short_after_trim() {
        assert!(!validate_name("Al"));
        assert!(!validate_name("  Al   "));
        assert!(!validate_name(""));
    }

    #[test]
    fn test_name_rejects_digits_and_symbols() {
        assert!(!validate_name("Ana 2"));
        assert!(!validate_name("Ana-Maria"));
        assert!(!validate_name("Ana×Bia"));
    }

    // ── Document ─────────────────────────────────────────────────────

    #[test]
    fn test_document_valid_checksum() {
        assert!(validate_document_id("52998224725"));
    }

    #[test]
    fn test_document_formatted_input_accepted() {
        assert!(validate_document_id("529.982.247-25"));
    }

    #[test]
    fn test_document_repeated_digits_rejected() {
        assert!(!validate_document_id("11111111111"));
        assert!(!validate_document_id("000.000.000-00"));
    }

    #[test]
    fn test_document_wrong_length_rejected() {
        assert!(!validate_document_id("123"));
        assert!(!validate_document_id("529982247250"));
        assert!(!validate_document_id(""));
    }

    #[test]
    fn test_document_bad_first_check_digit() {
        assert!(!validate_document_id("52998224735"));
    }

    #[test]
    fn test_document_bad_second_check_digit() {
        assert!(!validate_document_id("52998224726"));
    }

    #[test]
    fn test_document_remainder_ten_maps_to_zero() {
        // First check digit of 100000001 has remainder 10.
        assert!(validate_document_id("10000000108"));
        assert!(validate_document_id("111.444.777-35"));
    }

    // ── Email ────────────────────────────────────────────────────────

    #[test]
    fn test_email_accepts_simple_address() {
        assert!(validate_email("ab@cd.co"));
        assert!(validate_email("first.last@mail.example.com"));
    }

    #[test]
    fn test_email_rejects_missing_tld() {
        assert!(!validate_email("ab@cd"));
        assert!(!validate_email("ab@.cd"));
        assert!(!validate_email("ab@cd."));
    }

    #[test]
    fn test_email_rejects_empty_and_short() {
        assert!(!validate_email(""));
        assert!(!validate_email("a@b."));
    }

    #[test]
    fn test_email_rejects_whitespace_and_double_at() {
        assert!(!validate_email("a b@cd.co"));
        assert!(!validate_email("ab@c@d.co"));
        assert!(!validate_email("@cd.com"));
    }

    // ── Phone ────────────────────────────────────────────────────────

    #[test]
    fn test_phone_accepts_formatted_mobile() {
        assert!(validate_phone("(11) 99999-9999"));
    }

    #[test]
    fn test_phone_accepts_bare_digits() {
        assert!(validate_phone("11999999999"));
        assert!(validate_phone("1133334444"));
    }

    #[test]
    fn test_phone_accepts_eight_digit_subscriber_with_space() {
        assert!(validate_phone("11 3333-4444"));
        assert!(validate_phone("(21)33334444"));
    }

    #[test]
    fn test_phone_rejects_short_input() {
        assert!(!validate_phone("123"));
        assert!(!validate_phone(""));
    }

    #[test]
    fn test_phone_rejects_zero_in_area_code() {
        assert!(!validate_phone("(01) 99999-9999"));
    }

    #[test]
    fn test_phone_rejects_ten_digit_subscriber() {
        assert!(!validate_phone("(11) 88888-88888"));
    }

    #[test]
    fn test_phone_rejects_misplaced_hyphen() {
        assert!(!validate_phone("(11) 999-999999"));
    }

    // ── Random key ───────────────────────────────────────────────────

    #[test]
    fn test_random_key_length_boundary() {
        let ok = "a".repeat(32);
        let short = "a".repeat(31);
        assert!(validate_random_key(&ok));
        assert!(!validate_random_key(&short));
    }

    #[test]
    fn test_random_key_rejects_other_symbols() {
        let mut key = "a".repeat(32);
        key.push('_');
        assert!(!validate_random_key(&key));
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    #[test]
    fn test_field_kind_parse_and_dispatch() {
        let kind: FieldKind = "cpf".parse().unwrap();
        assert!(validate(kind, "52998224725"));
        assert!("bogus".parse::<FieldKind>().is_err());
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        /// Eleven identical digits never pass, whatever the digit.
        #[test]
        fn repeated_digit_documents_rejected(d in 0u8..10) {
            let doc: String = std::iter::repeat(char::from(b'0' + d)).take(11).collect();
            prop_assert!(!validate_document_id(&doc));
        }

        /// Validators never panic on arbitrary input.
        #[test]
        fn validators_are_total(s in any::<String>()) {
            let _ = validate_name(&s);
            let _ = validate_document_id(&s);
            let _ = validate_email(&s);
            let _ = validate_phone(&s);
            let _ = validate_random_key(&s);
        }

        /// Any 32+ character string over the key alphabet is accepted.
        #[test]
        fn random_key_alphabet_accepted(s in "[A-Za-z0-9-]{32,64}") {
            prop_assert!(validate_random_key(&s));
        }

        /// Strings shorter than 32 are rejected even over the key alphabet.
        #[test]
        fn random_key_short_rejected(s in "[A-Za-z0-9-]{0,31}") {
            prop_assert!(!validate_random_key(&s));
        }
    }
}
