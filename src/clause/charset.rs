//! Character-class checks and scalar coercion for raw query values.

use super::ast::Scalar;

/// True if `value` is non-empty and made only of `[0-9A-Za-z]`.
///
/// Used to reject parameter names carrying whitespace, punctuation or
/// control characters before they reach a query builder.
pub fn is_ascii_alnum(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// True if `value` is non-empty and made only of ASCII digits and `.`.
///
/// This is a character-class check only: `1.0.0` passes.
pub fn is_ascii_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

/// Coerce a raw string to an integer, a float, or leave it as text.
///
/// Never fails. Digits-only strings become `Int` (or `Float` when they
/// overflow `i64`), digits with a single `.` become `Float`, and everything
/// else (including multi-dot versions like `1.0.0`) is kept verbatim.
pub fn coerce_scalar(value: &str) -> Scalar {
    if !is_ascii_numeric(value) {
        return Scalar::Text(value.to_string());
    }

    match value.bytes().filter(|b| *b == b'.').count() {
        0 => value
            .parse::<i64>()
            .map(Scalar::Int)
            .or_else(|_| value.parse::<f64>().map(Scalar::Float))
            .unwrap_or_else(|_| Scalar::Text(value.to_string())),
        // A lone "." has the right characters but is not a number
        1 => value
            .parse::<f64>()
            .map(Scalar::Float)
            .unwrap_or_else(|_| Scalar::Text(value.to_string())),
        _ => Scalar::Text(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_integers() {
        assert_eq!(coerce_scalar("123456"), Scalar::Int(123456));
        assert_eq!(coerce_scalar("0"), Scalar::Int(0));
        assert_eq!(coerce_scalar("007"), Scalar::Int(7));
    }

    #[test]
    fn coerces_floats() {
        assert_eq!(coerce_scalar("123456.789"), Scalar::Float(123456.789));
        assert_eq!(coerce_scalar(".5"), Scalar::Float(0.5));
        assert_eq!(coerce_scalar("5."), Scalar::Float(5.0));
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        assert_eq!(
            coerce_scalar("99999999999999999999"),
            Scalar::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn keeps_text_with_letters() {
        assert_eq!(coerce_scalar("A123456.789"), Scalar::from("A123456.789"));
        assert_eq!(coerce_scalar("recent"), Scalar::from("recent"));
        assert_eq!(coerce_scalar("-5"), Scalar::from("-5"));
        assert_eq!(coerce_scalar("1e5"), Scalar::from("1e5"));
    }

    #[test]
    fn keeps_version_strings() {
        assert_eq!(coerce_scalar("1.0.0"), Scalar::from("1.0.0"));
        assert_eq!(coerce_scalar("10.20.30.40"), Scalar::from("10.20.30.40"));
        assert_eq!(coerce_scalar(".."), Scalar::from(".."));
    }

    #[test]
    fn empty_and_missing_pass_through() {
        assert_eq!(coerce_scalar(""), Scalar::from(""));
        assert_eq!(None::<&str>.map(coerce_scalar), None);
        assert_eq!(coerce_scalar("."), Scalar::from("."));
    }

    #[test]
    fn alnum_accepts_letters_and_digits() {
        assert!(is_ascii_alnum("abcABC"));
        assert!(is_ascii_alnum("abcABC123"));
        assert!(is_ascii_alnum("xyzXYZ789"));
        assert!(is_ascii_alnum("0"));
    }

    #[test]
    fn alnum_rejects_neighbouring_ascii() {
        // Characters just outside the digit and letter ranges
        for bad in ["@toto", "[toto", "`toto", "{toto", "/toto", ":toto"] {
            assert!(!is_ascii_alnum(bad), "{bad} should be rejected");
        }
        assert!(!is_ascii_alnum("order By"));
        assert!(!is_ascii_alnum("pri;ce"));
        assert!(!is_ascii_alnum("é"));
        assert!(!is_ascii_alnum(""));
        assert!(!None::<&str>.is_some_and(is_ascii_alnum));
    }

    #[test]
    fn numeric_class_allows_dots() {
        assert!(is_ascii_numeric("123"));
        assert!(is_ascii_numeric("1.5"));
        assert!(is_ascii_numeric("1.0.0"));
        assert!(!is_ascii_numeric(""));
        assert!(!is_ascii_numeric("1,5"));
        assert!(!is_ascii_numeric("-1"));
    }
}
