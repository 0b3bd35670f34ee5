//! Keypad buttons.
//!
//! The keypad is rebuilt from calculator state on every render, so labels that
//! depend on alt-mode, angle mode or the clear state are always current. The
//! same layout decides what a key does under alt-mode: a shortcut bound to a
//! primary button runs whatever alt-mode puts in that button's place.

use crate::calculator::{AngleMode, Calculator, Constant, Operator};
use crate::keymap::Action;

/// Visual weight of a button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonVariant {
    Normal,
    /// Digit-entry keys.
    Dark,
    /// Enter and alternate ("2nd") functions.
    Light,
    /// A toggle that is currently on.
    Active,
}

/// A single keypad button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonItem {
    pub label: String,
    pub action: Action,
    pub variant: ButtonVariant,
}

impl ButtonItem {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            variant: ButtonVariant::Normal,
        }
    }

    pub fn with_variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    fn operator(op: Operator) -> Self {
        Self::new(op.label(), Action::Apply(op))
    }

    fn digit(digit: u8) -> Self {
        Self::new(digit.to_string(), Action::Digit(digit)).with_variant(ButtonVariant::Dark)
    }

    fn constant(constant: Constant) -> Self {
        Self::new(constant.label(), Action::Insert(constant))
    }
}

/// The keypad, split into the scientific block and the main block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keypad {
    pub extra: Vec<Vec<ButtonItem>>,
    pub main: Vec<Vec<ButtonItem>>,
}

impl Keypad {
    /// Every button, scientific block first, row by row.
    fn buttons(&self) -> impl Iterator<Item = &ButtonItem> {
        self.extra.iter().chain(self.main.iter()).flatten()
    }
}

/// The primary operator, or its alternate when alt-mode is on.
fn alternating(alt: bool, primary: Operator, alternate: Operator) -> ButtonItem {
    if alt {
        ButtonItem::operator(alternate).with_variant(ButtonVariant::Light)
    } else {
        ButtonItem::operator(primary)
    }
}

/// Build the keypad for the current state.
pub fn keypad(calculator: &Calculator) -> Keypad {
    layout(
        calculator.alt_enabled(),
        calculator.angle_mode(),
        calculator.will_clear_all(),
    )
}

/// The action alt-mode puts in place of `action`, if its button changes.
///
/// Found by laying the alt keypad over the primary one, so key behaviour
/// always matches the legend.
pub fn alternate_action(action: Action) -> Option<Action> {
    let primary = layout(false, AngleMode::default(), true);
    let alternate = layout(true, AngleMode::default(), true);

    primary
        .buttons()
        .zip(alternate.buttons())
        .find(|(p, a)| p.action == action && a.action != action)
        .map(|(_, a)| a.action)
}

fn layout(alt: bool, angle_mode: AngleMode, clears_all: bool) -> Keypad {
    use Operator::*;

    let extra = vec![
        vec![
            ButtonItem::operator(Floor),
            ButtonItem::operator(Ceiling),
            ButtonItem::operator(Ln),
            ButtonItem::operator(Log10),
        ],
        vec![
            ButtonItem::new(angle_mode.label(), Action::ToggleAngleMode),
            ButtonItem::constant(Constant::Pi),
            ButtonItem::constant(Constant::E),
        ],
        vec![
            alternating(alt, Sin, Asin),
            alternating(alt, Cos, Acos),
            alternating(alt, Tan, Atan),
        ],
        vec![
            alternating(alt, Sinh, Asinh),
            alternating(alt, Cosh, Acosh),
            alternating(alt, Tanh, Atanh),
        ],
    ];

    let second = ButtonItem::new("2nd", Action::ToggleAlt).with_variant(if alt {
        ButtonVariant::Active
    } else {
        ButtonVariant::Normal
    });
    let clear_label = if clears_all { "C" } else { "CE" };
    let backspace = if alt {
        ButtonItem::new("drop", Action::Drop).with_variant(ButtonVariant::Light)
    } else {
        ButtonItem::new("⌫", Action::Backspace)
    };
    let sign = if alt {
        ButtonItem::new("swap", Action::Swap).with_variant(ButtonVariant::Light)
    } else {
        ButtonItem::operator(InvertSign).with_variant(ButtonVariant::Dark)
    };

    let main = vec![
        vec![
            second,
            alternating(alt, Percent, Modulus),
            ButtonItem::new(clear_label, Action::ClearOrClearAll),
            backspace,
        ],
        vec![
            ButtonItem::operator(Reciprocal),
            alternating(alt, Square, Power),
            alternating(alt, SquareRoot, NthRoot),
            ButtonItem::operator(Divide),
        ],
        vec![
            ButtonItem::digit(7),
            ButtonItem::digit(8),
            ButtonItem::digit(9),
            ButtonItem::operator(Multiply),
        ],
        vec![
            ButtonItem::digit(4),
            ButtonItem::digit(5),
            ButtonItem::digit(6),
            ButtonItem::operator(Subtract),
        ],
        vec![
            ButtonItem::digit(1),
            ButtonItem::digit(2),
            ButtonItem::digit(3),
            ButtonItem::operator(Add),
        ],
        vec![
            sign,
            ButtonItem::digit(0),
            ButtonItem::new(".", Action::Point).with_variant(ButtonVariant::Dark),
            ButtonItem::new("⏎", Action::Push).with_variant(ButtonVariant::Light),
        ],
    ];

    Keypad { extra, main }
}
