//! The input/state engine.
//!
//! [`Calculator`] owns the edit buffer, the value stack, the two entry latches
//! and the alt/angle flags. Every keypad action is one method call here; the
//! front-end only reads state back for rendering.

use super::number::{coerce, number_to_string};
use super::operators::{AngleMode, Constant, Operation, Operator};
use super::paste::parse_pasted_numbers;
use tracing::debug;

/// The calculator state machine.
#[derive(Clone, Debug)]
pub struct Calculator {
    buffer: String,
    stack: Vec<f64>,
    /// Next digit/point overwrites the buffer.
    replace_on_entry: bool,
    /// Next digit/point commits the buffer to the stack first.
    push_on_entry: bool,
    alt: bool,
    angle_mode: AngleMode,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(AngleMode::default())
    }
}

/// Strip leading zeros in front of another digit and expand a bare point.
fn normalize_buffer(buffer: &str) -> String {
    let significant = buffer.trim_start_matches('0');

    let normalized = if significant.len() == buffer.len() {
        buffer
    } else if significant.starts_with(|c: char| c.is_ascii_digit()) {
        significant
    } else {
        // Keep a single zero ahead of a point or at the end.
        &buffer[buffer.len() - significant.len() - 1..]
    };

    if normalized == "." {
        "0.".to_string()
    } else {
        normalized.to_string()
    }
}

impl Calculator {
    /// A cleared calculator: buffer `"0"`, empty stack, no latches.
    pub fn new(angle_mode: AngleMode) -> Self {
        Self {
            buffer: "0".to_string(),
            stack: Vec::new(),
            replace_on_entry: false,
            push_on_entry: false,
            alt: false,
            angle_mode,
        }
    }

    /// Rebuild a calculator from persisted session state.
    ///
    /// An empty buffer collapses to `"0"`.
    pub fn restore(
        buffer: String,
        stack: Vec<f64>,
        replace_on_entry: bool,
        push_on_entry: bool,
        angle_mode: AngleMode,
    ) -> Self {
        let buffer = if buffer.is_empty() {
            "0".to_string()
        } else {
            buffer
        };

        Self {
            buffer,
            stack,
            replace_on_entry,
            push_on_entry,
            alt: false,
            angle_mode,
        }
    }

    /// The text being edited, exactly as typed or produced.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Numeric value of the buffer (`NaN` for non-numeric text).
    pub fn buffer_value(&self) -> f64 {
        coerce(&self.buffer)
    }

    /// Committed values, oldest first. The last one is the left operand of
    /// the next binary operator.
    pub fn stack(&self) -> &[f64] {
        &self.stack
    }

    /// Whether the next digit or point overwrites the buffer.
    pub fn replace_on_entry(&self) -> bool {
        self.replace_on_entry
    }

    /// Whether the next digit or point pushes the buffer first.
    pub fn push_on_entry(&self) -> bool {
        self.push_on_entry
    }

    /// Whether the "2nd" functions are selected.
    pub fn alt_enabled(&self) -> bool {
        self.alt
    }

    /// Angle unit used by the trig family.
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Switch between degrees and radians, returning the new mode.
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.angle_mode = self.angle_mode.toggled();
        self.angle_mode
    }

    /// Select or deselect the "2nd" functions.
    pub fn toggle_alt(&mut self) {
        self.alt = !self.alt;
    }

    /// Whether the clear key would wipe everything rather than just the buffer.
    pub fn will_clear_all(&self) -> bool {
        !self.replace_on_entry && self.buffer == "0"
    }

    /// Type a digit or decimal point.
    ///
    /// Characters other than `0`-`9` and `.` are ignored.
    pub fn type_key(&mut self, key: char) {
        if !key.is_ascii_digit() && key != '.' {
            debug!(?key, "ignoring non-numeric key");
            return;
        }

        if self.push_on_entry {
            self.push();
            self.buffer = normalize_buffer(key.encode_utf8(&mut [0; 4]));
        } else if self.replace_on_entry {
            self.buffer = normalize_buffer(key.encode_utf8(&mut [0; 4]));
        } else if key != '.' || !self.buffer.contains('.') {
            self.buffer.push(key);
            self.buffer = normalize_buffer(&self.buffer);
        }

        self.replace_on_entry = false;
        self.push_on_entry = false;
        self.alt = false;
    }

    /// Type `digit` (0-9); anything larger is ignored.
    pub fn type_digit(&mut self, digit: u8) {
        if let Some(key) = char::from_digit(u32::from(digit), 10) {
            self.type_key(key);
        }
    }

    pub fn type_point(&mut self) {
        self.type_key('.');
    }

    /// Commit the buffer to the stack (Enter).
    pub fn push(&mut self) {
        self.commit_buffer();
        self.replace_on_entry = true;
        self.push_on_entry = false;
    }

    fn commit_buffer(&mut self) {
        self.stack.push(self.buffer_value());
    }

    /// Remove the last character. A lone digit, signed or not, leaves `"0"`.
    pub fn backspace(&mut self) {
        let single_digit = self.buffer.chars().count() == 1
            || (self.buffer.chars().count() == 2 && self.buffer.starts_with('-'));

        if single_digit {
            self.buffer = "0".to_string();
        } else {
            self.buffer.pop();
        }

        self.replace_on_entry = false;
        self.push_on_entry = false;
    }

    /// Reset the buffer to `"0"` (CE).
    pub fn clear_buffer(&mut self) {
        self.buffer = "0".to_string();
        self.replace_on_entry = false;
        self.push_on_entry = false;
    }

    /// Reset the buffer and empty the stack (C).
    pub fn clear_all(&mut self) {
        self.clear_buffer();
        self.stack.clear();
        self.alt = false;
    }

    /// `CE` when there is something in the buffer to clear, `C` otherwise.
    pub fn clear_or_clear_all(&mut self) {
        if self.will_clear_all() {
            self.clear_all();
        } else {
            self.clear_buffer();
        }
    }

    /// Remove the stack top, if any.
    pub fn drop(&mut self) {
        self.stack.pop();
        self.alt = false;
    }

    /// Exchange the two topmost stack entries, if there are two.
    pub fn swap(&mut self) {
        let len = self.stack.len();
        if len >= 2 {
            self.stack.swap(len - 1, len - 2);
        }
        self.alt = false;
    }

    /// Apply an operation to the buffer (and the stack top, for binary ones).
    ///
    /// A binary operation on an empty stack does nothing at all.
    pub fn apply(&mut self, operation: Operation) {
        let result = match operation {
            Operation::Unary(f) => f(self.buffer_value()),
            Operation::Binary(f) => {
                let Some(a) = self.stack.pop() else {
                    debug!("binary operation with empty stack ignored");
                    return;
                };
                f(a, self.buffer_value())
            }
        };

        self.buffer = number_to_string(result);
        self.push_on_entry = true;
        self.alt = false;
    }

    /// Resolve an operator under the current angle mode and apply it.
    pub fn apply_operator(&mut self, operator: Operator) {
        self.apply(operator.operation(self.angle_mode));
    }

    /// Put a constant into the buffer.
    ///
    /// Unless the buffer is already marked to be pushed, its current value is
    /// committed to the stack first.
    pub fn insert_constant(&mut self, value: f64) {
        if !self.push_on_entry {
            self.commit_buffer();
        }

        self.buffer = number_to_string(value);
        self.replace_on_entry = false;
        self.push_on_entry = true;
    }

    /// Insert π or e, see [`Calculator::insert_constant`].
    pub fn insert(&mut self, constant: Constant) {
        self.insert_constant(constant.value());
    }

    /// Feed pasted clipboard text into the calculator.
    ///
    /// Every number but the last lands on the stack after the current buffer;
    /// the last one becomes the buffer. Returns how many numbers were taken.
    pub fn paste(&mut self, text: &str) -> usize {
        let mut numbers = parse_pasted_numbers(text);
        let Some(last) = numbers.pop() else {
            debug!("paste contained no numbers");
            return 0;
        };

        self.commit_buffer();
        let count = numbers.len() + 1;
        self.stack.extend(numbers);
        self.buffer = number_to_string(last);
        self.replace_on_entry = false;
        self.push_on_entry = true;

        count
    }

    /// Text to export on copy.
    pub fn copy_text(&self) -> &str {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn typed(keys: &str) -> Calculator {
        let mut calc = Calculator::default();
        for key in keys.chars() {
            calc.type_key(key);
        }
        calc
    }

    #[test]
    fn test_normalize_buffer() {
        assert_eq!(normalize_buffer("007"), "7");
        assert_eq!(normalize_buffer("0"), "0");
        assert_eq!(normalize_buffer("00"), "0");
        assert_eq!(normalize_buffer("0.5"), "0.5");
        assert_eq!(normalize_buffer("00.5"), "0.5");
        assert_eq!(normalize_buffer("."), "0.");
        assert_eq!(normalize_buffer("10"), "10");
        assert_eq!(normalize_buffer("1.00"), "1.00");
    }

    #[test]
    fn test_typing_after_clear_all_concatenates() {
        let mut calc = typed("12");
        calc.push();
        calc.clear_all();
        for key in "0450.0300".chars() {
            calc.type_key(key);
        }
        assert_eq!(calc.buffer(), "450.0300");
        assert!(calc.stack().is_empty());
    }

    #[test]
    fn test_point_is_idempotent() {
        let calc = typed("3..");
        assert_eq!(calc.buffer(), "3.");

        let calc = typed("1.2.3");
        assert_eq!(calc.buffer(), "1.23");
    }

    #[test]
    fn test_leading_point() {
        let calc = typed(".5");
        assert_eq!(calc.buffer(), "0.5");
    }

    #[test]
    fn test_non_numeric_key_ignored() {
        let mut calc = typed("4");
        calc.type_key('x');
        assert_eq!(calc.buffer(), "4");
    }

    #[test]
    fn test_push_then_digit_starts_fresh_buffer() {
        let mut calc = typed("42");
        calc.push();
        assert_eq!(calc.stack(), &[42.0]);
        assert!(calc.replace_on_entry());
        assert!(!calc.push_on_entry());

        calc.type_key('7');
        assert_eq!(calc.buffer(), "7");
        assert_eq!(calc.stack(), &[42.0]);
        assert!(!calc.replace_on_entry());
    }

    #[test]
    fn test_push_then_point() {
        let mut calc = typed("42");
        calc.push();
        calc.type_key('.');
        assert_eq!(calc.buffer(), "0.");
    }

    #[test]
    fn test_push_latch_wins_over_replace_latch() {
        let mut calc = Calculator::restore("7".to_string(), vec![], true, true, AngleMode::Radians);
        calc.type_key('3');

        assert_eq!(calc.stack(), &[7.0]);
        assert_eq!(calc.buffer(), "3");
        assert!(!calc.replace_on_entry());
        assert!(!calc.push_on_entry());
    }

    #[test]
    fn test_push_coerces_dangling_point() {
        let mut calc = typed("1.");
        calc.push();
        assert_eq!(calc.stack(), &[1.0]);
    }

    #[test]
    fn test_push_twice_duplicates() {
        let mut calc = typed("5");
        calc.push();
        calc.push();
        assert_eq!(calc.stack(), &[5.0, 5.0]);
    }

    #[test]
    fn test_backspace() {
        let mut calc = typed("123");
        calc.backspace();
        assert_eq!(calc.buffer(), "12");
        calc.backspace();
        calc.backspace();
        assert_eq!(calc.buffer(), "0");
        calc.backspace();
        assert_eq!(calc.buffer(), "0");
    }

    #[test]
    fn test_backspace_single_char_yields_zero() {
        let mut calc = typed("5");
        calc.backspace();
        assert_eq!(calc.buffer(), "0");
    }

    #[test]
    fn test_backspace_negative_single_digit_collapses_in_one_press() {
        let mut calc = typed("5");
        calc.apply_operator(Operator::InvertSign);
        assert_eq!(calc.buffer(), "-5");

        calc.backspace();
        assert_eq!(calc.buffer(), "0");
    }

    #[test]
    fn test_backspace_edits_result_and_clears_latches() {
        let mut calc = typed("25");
        calc.apply_operator(Operator::InvertSign);
        assert!(calc.push_on_entry());

        calc.backspace();
        assert_eq!(calc.buffer(), "-2");
        assert!(!calc.push_on_entry());

        calc.type_key('9');
        assert_eq!(calc.buffer(), "-29");
        assert!(calc.stack().is_empty());
    }

    #[test]
    fn test_clear_or_clear_all() {
        let mut calc = typed("8");
        calc.push();
        calc.type_key('3');

        assert!(!calc.will_clear_all());
        calc.clear_or_clear_all();
        assert_eq!(calc.buffer(), "0");
        assert_eq!(calc.stack(), &[8.0]);

        assert!(calc.will_clear_all());
        calc.clear_or_clear_all();
        assert!(calc.stack().is_empty());
    }

    #[test]
    fn test_clear_after_push_only_clears_buffer() {
        let mut calc = typed("0");
        calc.push();
        // Buffer is "0" but the replace latch is set.
        assert!(!calc.will_clear_all());
        calc.clear_or_clear_all();
        assert_eq!(calc.stack(), &[0.0]);
        assert!(!calc.replace_on_entry());
    }

    #[test]
    fn test_clear_all_resets_alt() {
        let mut calc = typed("1");
        calc.toggle_alt();
        calc.clear_all();
        assert!(!calc.alt_enabled());
    }

    #[test]
    fn test_drop_and_swap() {
        let mut calc = Calculator::default();
        calc.drop();
        calc.swap();
        assert!(calc.stack().is_empty());

        calc.type_key('1');
        calc.push();
        calc.swap();
        assert_eq!(calc.stack(), &[1.0]);

        calc.type_key('2');
        calc.push();
        calc.type_key('3');
        calc.push();
        calc.toggle_alt();
        calc.swap();
        assert_eq!(calc.stack(), &[1.0, 3.0, 2.0]);
        assert!(!calc.alt_enabled());

        calc.toggle_alt();
        calc.drop();
        assert_eq!(calc.stack(), &[1.0, 3.0]);
        assert!(!calc.alt_enabled());
    }

    #[test]
    fn test_unary_sets_push_latch() {
        let mut calc = typed("16");
        calc.toggle_alt();
        calc.apply_operator(Operator::SquareRoot);
        assert_eq!(calc.buffer(), "4");
        assert!(calc.push_on_entry());
        assert!(!calc.alt_enabled());
        assert!(calc.stack().is_empty());

        calc.type_key('2');
        assert_eq!(calc.stack(), &[4.0]);
        assert_eq!(calc.buffer(), "2");
    }

    #[test]
    fn test_binary_consumes_stack_top() {
        let mut calc = typed("10");
        calc.push();
        calc.type_key('4');
        calc.apply_operator(Operator::Subtract);
        assert_eq!(calc.buffer(), "6");
        assert!(calc.stack().is_empty());
        assert!(calc.push_on_entry());
    }

    #[test]
    fn test_binary_on_empty_stack_is_noop() {
        let mut calc = typed("9");
        calc.toggle_alt();
        calc.apply_operator(Operator::Add);
        assert_eq!(calc.buffer(), "9");
        assert!(calc.stack().is_empty());
        assert!(!calc.push_on_entry());
        assert!(calc.alt_enabled());
    }

    #[test]
    fn test_chained_arithmetic() {
        // 2 Enter 3 + 4 *  => (2 + 3) * 4 needs the sum pushed first.
        let mut calc = typed("2");
        calc.push();
        calc.type_key('3');
        calc.apply_operator(Operator::Add);
        calc.push();
        calc.type_key('4');
        calc.apply_operator(Operator::Multiply);
        assert_eq!(calc.buffer(), "20");
    }

    #[test]
    fn test_divide_by_zero_is_infinity() {
        let mut calc = typed("1");
        calc.push();
        calc.type_key('0');
        calc.apply_operator(Operator::Divide);
        assert_eq!(calc.buffer(), "Infinity");
    }

    #[test]
    fn test_nan_propagates() {
        let mut calc = typed("1");
        calc.apply_operator(Operator::InvertSign);
        calc.apply_operator(Operator::SquareRoot);
        assert_eq!(calc.buffer(), "NaN");

        calc.type_key('1');
        assert!(calc.stack()[0].is_nan());
    }

    #[test]
    fn test_sin_degrees_and_radians() {
        let mut calc = Calculator::new(AngleMode::Degrees);
        calc.type_key('9');
        calc.type_key('0');
        calc.apply_operator(Operator::Sin);
        assert!((calc.buffer_value() - 1.0).abs() < EPSILON);

        let mut calc = typed("90");
        calc.apply_operator(Operator::Sin);
        assert!((calc.buffer_value() - 0.894).abs() < 1e-3);
    }

    #[test]
    fn test_insert_constant_commits_edit() {
        let mut calc = typed("5");
        calc.insert(Constant::Pi);
        assert_eq!(calc.stack(), &[5.0]);
        assert_eq!(calc.buffer_value(), std::f64::consts::PI);
        assert!(calc.push_on_entry());
        assert!(!calc.replace_on_entry());

        calc.type_key('2');
        assert_eq!(calc.stack(), &[5.0, std::f64::consts::PI]);
        assert_eq!(calc.buffer(), "2");
    }

    #[test]
    fn test_insert_constant_replaces_pending_result() {
        let mut calc = typed("4");
        calc.apply_operator(Operator::Square);
        calc.insert(Constant::E);
        assert!(calc.stack().is_empty());
        assert_eq!(calc.buffer_value(), std::f64::consts::E);
    }

    #[test]
    fn test_insert_constant_then_binary() {
        let mut calc = typed("2");
        calc.insert(Constant::Pi);
        calc.apply_operator(Operator::Multiply);
        assert!((calc.buffer_value() - 2.0 * std::f64::consts::PI).abs() < EPSILON);
        assert!(calc.stack().is_empty());
    }

    #[test]
    fn test_paste_multiple_lines() {
        let mut calc = typed("5");
        let taken = calc.paste("10\n20\n30");
        assert_eq!(taken, 3);
        assert_eq!(calc.stack(), &[5.0, 10.0, 20.0]);
        assert_eq!(calc.buffer(), "30");
        assert!(calc.push_on_entry());
        assert!(!calc.replace_on_entry());
    }

    #[test]
    fn test_paste_single_value() {
        let mut calc = Calculator::default();
        calc.push();
        calc.paste("1,234.5");
        assert_eq!(calc.stack(), &[0.0, 0.0]);
        assert_eq!(calc.buffer(), "1234.5");
        assert!(!calc.replace_on_entry());
    }

    #[test]
    fn test_paste_without_numbers_is_noop() {
        let mut calc = typed("7");
        calc.push();
        let before = (calc.buffer().to_string(), calc.stack().to_vec());
        assert_eq!(calc.paste("hello\nworld\n"), 0);
        assert_eq!(calc.paste(""), 0);
        assert_eq!((calc.buffer().to_string(), calc.stack().to_vec()), before);
        assert!(calc.replace_on_entry());
    }

    #[test]
    fn test_paste_then_type_pushes_pasted_value() {
        let mut calc = Calculator::default();
        calc.paste("12");
        calc.type_key('3');
        assert_eq!(calc.stack(), &[0.0, 12.0]);
        assert_eq!(calc.buffer(), "3");
    }

    #[test]
    fn test_restore_collapses_empty_buffer() {
        let calc = Calculator::restore(String::new(), vec![1.0], true, false, AngleMode::Degrees);
        assert_eq!(calc.buffer(), "0");
        assert_eq!(calc.stack(), &[1.0]);
        assert!(calc.replace_on_entry());
        assert!(calc.angle_mode().is_degrees());
    }

    #[test]
    fn test_copy_text_is_raw_buffer() {
        let calc = typed("1000.50");
        assert_eq!(calc.copy_text(), "1000.50");
    }
}
