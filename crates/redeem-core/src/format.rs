//! # Input Formatting
//!
//! As-you-type punctuation for document and phone inputs. Both formatters
//! keep digits only, cap the digit count at the longest valid number, and
//! insert separators only once a following digit exists, so a partially
//! typed value formats the same way it will look when complete.

/// Longest digit run kept by [`format_document_input`].
const DOCUMENT_MAX_DIGITS: usize = 11;

/// Longest digit run kept by [`format_phone_input`].
const PHONE_MAX_DIGITS: usize = 11;

/// Format a document number as `000.000.000-00`.
///
/// ```
/// use redeem_core::format_document_input;
/// assert_eq!(format_document_input("52998224725"), "529.982.247-25");
/// assert_eq!(format_document_input("5299"), "529.9");
/// ```
pub fn format_document_input(raw: &str) -> String {
    let digits = capped_digits(raw, DOCUMENT_MAX_DIGITS);
    let mut out = String::with_capacity(14);
    for (i, d) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(*d);
    }
    out
}

/// Format a phone number as `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`.
///
/// The hyphen appears only once the subscriber part has eight or nine
/// digits.
///
/// ```
/// use redeem_core::format_phone_input;
/// assert_eq!(format_phone_input("11999999999"), "(11) 99999-9999");
/// assert_eq!(format_phone_input("119"), "(11) 9");
/// ```
pub fn format_phone_input(raw: &str) -> String {
    let digits = capped_digits(raw, PHONE_MAX_DIGITS);
    if digits.len() <= 2 {
        return digits.iter().collect();
    }
    let area: String = digits[..2].iter().collect();
    let subscriber = &digits[2..];
    let body: String = if subscriber.len() >= 8 {
        let split = subscriber.len() - 4;
        let head: String = subscriber[..split].iter().collect();
        let tail: String = subscriber[split..].iter().collect();
        format!("{head}-{tail}")
    } else {
        subscriber.iter().collect()
    };
    format!("({area}) {body}")
}

fn capped_digits(raw: &str, max: usize) -> Vec<char> {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate_document_id, validate_phone};

    #[test]
    fn test_document_progressive_formatting() {
        assert_eq!(format_document_input(""), "");
        assert_eq!(format_document_input("529"), "529");
        assert_eq!(format_document_input("529982"), "529.982");
        assert_eq!(format_document_input("529982247"), "529.982.247");
        assert_eq!(format_document_input("5299822472"), "529.982.247-2");
    }

    #[test]
    fn test_document_strips_and_caps() {
        assert_eq!(format_document_input("529.982.247-25999"), "529.982.247-25");
        assert_eq!(format_document_input("abc529xyz"), "529");
    }

    #[test]
    fn test_formatted_document_still_validates() {
        assert!(validate_document_id(&format_document_input("52998224725")));
    }

    #[test]
    fn test_phone_progressive_formatting() {
        assert_eq!(format_phone_input("1"), "1");
        assert_eq!(format_phone_input("11"), "11");
        assert_eq!(format_phone_input("1199999"), "(11) 99999");
        assert_eq!(format_phone_input("1133334444"), "(11) 3333-4444");
        assert_eq!(format_phone_input("11999999999"), "(11) 99999-9999");
    }

    #[test]
    fn test_phone_reformats_existing_punctuation() {
        assert_eq!(format_phone_input("(11) 9999-99999"), "(11) 99999-9999");
    }

    #[test]
    fn test_formatted_phone_still_validates() {
        assert!(validate_phone(&format_phone_input("11999999999")));
        assert!(validate_phone(&format_phone_input("1133334444")));
    }
}
