//! Conversions between buffer text and numeric values.
//!
//! Text coming from the buffer or from the clipboard never fails to convert:
//! anything that is not a numeric literal becomes `NaN`. Values going back into
//! the buffer are rendered so that they coerce to the same value again.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A plain decimal literal: optional sign, digits with at most one dot,
    /// optional exponent. Accepts dangling (`1.`) and bare-fraction (`.5`) forms.
    static ref DECIMAL_LITERAL: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

/// Coerce text to a number.
///
/// Surrounding whitespace is ignored and empty text is zero. Unparseable
/// text yields `NaN` rather than an error.
pub fn coerce(text: &str) -> f64 {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if !DECIMAL_LITERAL.is_match(trimmed) {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// Render a number as buffer text.
///
/// Uses the shortest representation that round-trips. Very large and very
/// small magnitudes switch to exponent form with an explicit sign (`1e+21`).
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        // Covers negative zero too.
        return "0".to_string();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        return format!("{}", value);
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => scientific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_plain_literals() {
        assert_eq!(coerce("42"), 42.0);
        assert_eq!(coerce("-3.5"), -3.5);
        assert_eq!(coerce("+7"), 7.0);
        assert_eq!(coerce(".5"), 0.5);
        assert_eq!(coerce("1.5e3"), 1500.0);
        assert_eq!(coerce("2E-2"), 0.02);
    }

    #[test]
    fn test_coerce_dangling_point() {
        assert_eq!(coerce("1."), 1.0);
        assert_eq!(coerce("0."), 0.0);
    }

    #[test]
    fn test_coerce_whitespace_and_empty() {
        assert_eq!(coerce("  12 \r"), 12.0);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("   "), 0.0);
    }

    #[test]
    fn test_coerce_garbage_is_nan() {
        assert!(coerce("abc").is_nan());
        assert!(coerce("1.2.3").is_nan());
        assert!(coerce("-").is_nan());
        assert!(coerce(".").is_nan());
        assert!(coerce("NaN").is_nan());
        assert!(coerce("inf").is_nan());
        assert!(coerce("1,000").is_nan());
    }

    #[test]
    fn test_coerce_infinity() {
        assert_eq!(coerce("Infinity"), f64::INFINITY);
        assert_eq!(coerce("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_render_integers_and_fractions() {
        assert_eq!(number_to_string(4.0), "4");
        assert_eq!(number_to_string(-12.0), "-12");
        assert_eq!(number_to_string(0.5), "0.5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
    }

    #[test]
    fn test_render_exponent_forms() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(-2.5e30), "-2.5e+30");
        assert_eq!(number_to_string(0.000001), "0.000001");
    }

    #[test]
    fn test_render_special_values() {
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(-0.0), "0");
    }

    #[test]
    fn test_rendered_text_coerces_back() {
        for value in [3.25, -1e-9, 6.02e23, 1.0 / 3.0, f64::INFINITY] {
            assert_eq!(coerce(&number_to_string(value)), value);
        }
    }
}
