//! Display formatting for buffer and stack values.
//!
//! Groups the integer part by thousands and rounds the fraction so the whole
//! number fits a fixed width. Formatting works on the text, not on the value,
//! so whatever the user typed (trailing zeros, a dangling point) is kept.

/// Characters available for the integer part (separators included) plus the
/// fraction digits.
pub const DIGIT_BUDGET: usize = 14;

/// A formatted number and whether rounding dropped any digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedNumber {
    pub text: String,
    pub truncated: bool,
}

/// Format numeric text for display.
pub fn format_number(text: &str) -> String {
    format_number_detailed(text).text
}

/// Format numeric text for display, reporting truncation.
pub fn format_number_detailed(text: &str) -> FormattedNumber {
    let text = text.replacen('+', "", 1);

    let Some((integer, fraction)) = text.split_once('.') else {
        return FormattedNumber {
            text: group_thousands(&text),
            truncated: false,
        };
    };

    let integer = group_thousands(integer);
    let (digits, exponent) = match fraction.split_once('e') {
        Some((digits, exponent)) => (digits, Some(exponent)),
        None => (fraction, None),
    };

    // The exponent is never rounded away, so it comes out of the budget.
    let budget = DIGIT_BUDGET.saturating_sub(exponent.map_or(0, str::len));
    let integer_len = integer.chars().count();

    if digits.is_empty() || integer_len + digits.len() <= budget {
        return FormattedNumber {
            text: format!("{}.{}", integer, fraction),
            truncated: false,
        };
    }

    let suffix = exponent.map(|e| format!("e{}", e)).unwrap_or_default();
    let keep = budget.saturating_sub(integer_len).min(digits.len());
    let (kept, dropped) = digits.split_at(keep);
    let round_up = dropped.starts_with(['5', '6', '7', '8', '9']);

    let text = if !round_up {
        join_parts(&integer, kept, &suffix)
    } else {
        match increment_digits(kept) {
            Some(rounded) => join_parts(&integer, &rounded, &suffix),
            // The carry left the fraction: bump the integer and drop the fraction.
            None => format!("{}{}", increment_integer(&integer), suffix),
        }
    };

    FormattedNumber {
        text,
        truncated: true,
    }
}

fn join_parts(integer: &str, fraction: &str, suffix: &str) -> String {
    if fraction.is_empty() {
        format!("{}{}", integer, suffix)
    } else {
        format!("{}.{}{}", integer, fraction, suffix)
    }
}

/// Insert thousands separators into the leading digit run.
fn group_thousands(integer: &str) -> String {
    let (sign, unsigned) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };

    let run_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (digits, rest) = unsigned.split_at(run_len);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, rest)
}

/// Add one to a digit string in place. `None` when the carry overflows.
fn increment_digits(digits: &str) -> Option<String> {
    let mut chars: Vec<char> = digits.chars().collect();

    for i in (0..chars.len()).rev() {
        match chars[i] {
            '9' => chars[i] = '0',
            c => {
                chars[i] = char::from_digit(c.to_digit(10)? + 1, 10)?;
                return Some(chars.into_iter().collect());
            }
        }
    }

    None
}

/// Add one to the magnitude of a grouped integer and regroup it.
fn increment_integer(integer: &str) -> String {
    let plain: String = integer.chars().filter(|&c| c != ',').collect();
    let (sign, magnitude) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };

    let bumped = increment_digits(magnitude)
        .unwrap_or_else(|| format!("1{}", "0".repeat(magnitude.len())));

    group_thousands(&format!("{}{}", sign, bumped))
}
