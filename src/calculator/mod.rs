//! Calculator core.
//!
//! This module provides:
//! - The input/state engine driving the buffer and value stack
//! - The operator catalog with degree/radian handling
//! - Numeric text coercion, paste parsing and display formatting
//! - Clipboard access

mod clipboard;
mod engine;
mod format;
mod number;
mod operators;
mod paste;

#[cfg(test)]
pub use clipboard::MemoryClipboard;
pub use clipboard::{Clipboard, ClipboardError, detect_clipboard};
pub use engine::Calculator;
pub use format::{format_number, format_number_detailed};
pub use number::{coerce, number_to_string};
pub use operators::{AngleMode, Constant, Operator};
