//! Keyboard shortcuts.
//!
//! A [`Keymap`] is a plain lookup table from [`Shortcut`] to [`Action`]. It holds
//! no state of its own; the front-end feeds it keystrokes and dispatches
//! whatever action comes back.

mod action;
mod shortcut;

pub use action::{Action, ParseActionError};
pub use shortcut::{Key, Modifiers, Shortcut, ShortcutError};

use crate::calculator::{Constant, Operator};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeymapError {
    #[error(transparent)]
    UnknownAction(#[from] ParseActionError),
    #[error("Invalid shortcut '{shortcut}' for action '{action}': {source}")]
    InvalidShortcut {
        action: String,
        shortcut: String,
        source: ShortcutError,
    },
}

/// Built-in bindings, as shortcut strings per action.
fn default_bindings() -> &'static [(Action, &'static [&'static str])] {
    use Action::*;
    use Operator as Op;

    const BINDINGS: &[(Action, &[&str])] = &[
        (Digit(0), &["0"]),
        (Digit(1), &["1"]),
        (Digit(2), &["2"]),
        (Digit(3), &["3"]),
        (Digit(4), &["4"]),
        (Digit(5), &["5"]),
        (Digit(6), &["6"]),
        (Digit(7), &["7"]),
        (Digit(8), &["8"]),
        (Digit(9), &["9"]),
        (Point, &["."]),
        (Push, &["enter", "="]),
        (Backspace, &["backspace"]),
        (ClearOrClearAll, &["escape"]),
        (ClearAll, &["ctrl+l"]),
        (Drop, &["delete", "ctrl+delete"]),
        (Swap, &["x"]),
        (ToggleAlt, &["tab"]),
        (ToggleAngleMode, &["ctrl+d"]),
        (Apply(Op::Percent), &["%"]),
        (Apply(Op::Reciprocal), &["$", "i"]),
        (Apply(Op::Square), &["^"]),
        (Apply(Op::SquareRoot), &["r"]),
        (Apply(Op::Floor), &["f"]),
        (Apply(Op::Ceiling), &["F"]),
        (Apply(Op::Log10), &["l"]),
        (Apply(Op::Ln), &["n"]),
        (Apply(Op::InvertSign), &["_", "~"]),
        (Apply(Op::Sin), &["s"]),
        (Apply(Op::Cos), &["c"]),
        (Apply(Op::Tan), &["t"]),
        (Apply(Op::Sinh), &["alt+s"]),
        (Apply(Op::Cosh), &["alt+c"]),
        (Apply(Op::Tanh), &["alt+t"]),
        (Apply(Op::Asin), &["S"]),
        (Apply(Op::Acos), &["C"]),
        (Apply(Op::Atan), &["T"]),
        (Apply(Op::Asinh), &["alt+S"]),
        (Apply(Op::Acosh), &["alt+C"]),
        (Apply(Op::Atanh), &["alt+T"]),
        (Apply(Op::Add), &["+"]),
        (Apply(Op::Subtract), &["-"]),
        (Apply(Op::Multiply), &["*"]),
        (Apply(Op::Divide), &["/"]),
        (Apply(Op::Power), &["y"]),
        (Apply(Op::NthRoot), &["Y"]),
        (Apply(Op::Modulus), &["m"]),
        (Insert(Constant::Pi), &["p"]),
        (Insert(Constant::E), &["e"]),
        (Copy, &["ctrl+c"]),
        (Paste, &["ctrl+v"]),
        (Quit, &["ctrl+q", "q"]),
    ];

    BINDINGS
}

/// Shortcut → action table.
#[derive(Clone, Debug)]
pub struct Keymap {
    /// Listing order for display.
    entries: Vec<(Action, Vec<Shortcut>)>,
    index: HashMap<Shortcut, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Keymap {
    pub fn defaults() -> Self {
        let entries = default_bindings()
            .iter()
            .map(|(action, shortcuts)| {
                let parsed: Vec<Shortcut> =
                    shortcuts.iter().filter_map(|s| s.parse().ok()).collect();
                (*action, parsed)
            })
            .collect();

        Self::from_entries(entries)
    }

    /// Defaults with some actions rebound.
    ///
    /// Each configured action's shortcut list replaces its default list. A
    /// shortcut claimed by a configured action is taken away from whichever
    /// action had it before.
    pub fn with_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Result<Self, KeymapError> {
        let mut entries = Self::defaults().entries;

        for (name, shortcuts) in overrides {
            let action: Action = name.parse()?;

            let parsed = shortcuts
                .iter()
                .map(|text| {
                    text.parse::<Shortcut>()
                        .map_err(|source| KeymapError::InvalidShortcut {
                            action: name.clone(),
                            shortcut: text.clone(),
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            for (other, bound) in entries.iter_mut() {
                if *other != action {
                    bound.retain(|s| !parsed.contains(s));
                }
            }

            match entries.iter_mut().find(|(a, _)| *a == action) {
                Some((_, bound)) => *bound = parsed,
                None => entries.push((action, parsed)),
            }
        }

        Ok(Self::from_entries(entries))
    }

    fn from_entries(entries: Vec<(Action, Vec<Shortcut>)>) -> Self {
        let index = entries
            .iter()
            .flat_map(|(action, shortcuts)| shortcuts.iter().map(move |s| (*s, *action)))
            .collect();

        Self { entries, index }
    }

    pub fn lookup(&self, shortcut: &Shortcut) -> Option<Action> {
        self.index.get(shortcut).copied()
    }

    pub fn shortcuts_for(&self, action: Action) -> &[Shortcut] {
        self.entries
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, shortcuts)| shortcuts.as_slice())
            .unwrap_or(&[])
    }

    /// All bindings in listing order.
    pub fn entries(&self) -> impl Iterator<Item = (Action, &[Shortcut])> {
        self.entries.iter().map(|(a, s)| (*a, s.as_slice()))
    }
}
