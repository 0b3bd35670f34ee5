//! Parsing of pasted clipboard text into numbers.

use super::number::coerce;

/// Extract the finite numbers from pasted text, one per line.
///
/// Grouping commas are stripped before conversion. Blank lines and lines that
/// do not convert to a finite number are skipped.
pub fn parse_pasted_numbers(text: &str) -> Vec<f64> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| coerce(&line.replace(',', "")))
        .filter(|value| value.is_finite())
        .collect()
}
