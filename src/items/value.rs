//! Display items for the buffer and stack entries.

use crate::calculator::{Calculator, format_number_detailed, number_to_string};

/// A number as shown on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueItem {
    /// Grouped and width-limited text.
    pub display: String,
    /// Whether `display` lost digits to rounding.
    pub truncated: bool,
}

impl ValueItem {
    pub fn from_text(text: &str) -> Self {
        let formatted = format_number_detailed(text);
        Self {
            display: formatted.text,
            truncated: formatted.truncated,
        }
    }

    pub fn from_value(value: f64) -> Self {
        Self::from_text(&number_to_string(value))
    }

    /// Display text with a trailing marker when digits were dropped.
    pub fn display_with_marker(&self) -> String {
        if self.truncated {
            format!("{}…", self.display)
        } else {
            self.display.clone()
        }
    }
}

/// Stack entries, oldest first.
pub fn stack_items(calculator: &Calculator) -> Vec<ValueItem> {
    calculator
        .stack()
        .iter()
        .map(|&value| ValueItem::from_value(value))
        .collect()
}

pub fn buffer_item(calculator: &Calculator) -> ValueItem {
    ValueItem::from_text(calculator.buffer())
}
