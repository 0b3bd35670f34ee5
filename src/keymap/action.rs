//! Everything a key press or keypad button can trigger.

use crate::calculator::{Constant, Operator};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A config file named an action that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown action '{0}' in keybindings")]
pub struct ParseActionError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Digit(u8),
    Point,
    Push,
    Backspace,
    ClearOrClearAll,
    ClearAll,
    Drop,
    Swap,
    ToggleAlt,
    ToggleAngleMode,
    Apply(Operator),
    Insert(Constant),
    Copy,
    Paste,
    Quit,
}

impl Action {
    /// Every action, in keymap listing order.
    pub fn all() -> Vec<Action> {
        let mut actions: Vec<Action> = (0..=9).map(Action::Digit).collect();
        actions.extend([
            Self::Point,
            Self::Push,
            Self::Backspace,
            Self::ClearOrClearAll,
            Self::ClearAll,
            Self::Drop,
            Self::Swap,
            Self::ToggleAlt,
            Self::ToggleAngleMode,
        ]);
        actions.extend(Operator::ALL.into_iter().map(Self::Apply));
        actions.extend([
            Self::Insert(Constant::Pi),
            Self::Insert(Constant::E),
            Self::Copy,
            Self::Paste,
            Self::Quit,
        ]);
        actions
    }

    /// Stable name used in configuration files.
    pub fn name(self) -> String {
        match self {
            Self::Digit(d) => format!("digit-{}", d),
            Self::Point => "point".to_string(),
            Self::Push => "push".to_string(),
            Self::Backspace => "backspace".to_string(),
            Self::ClearOrClearAll => "clear".to_string(),
            Self::ClearAll => "clear-all".to_string(),
            Self::Drop => "drop".to_string(),
            Self::Swap => "swap".to_string(),
            Self::ToggleAlt => "toggle-alt".to_string(),
            Self::ToggleAngleMode => "toggle-angle".to_string(),
            Self::Apply(op) => op.name().to_string(),
            Self::Insert(constant) => constant.name().to_string(),
            Self::Copy => "copy".to_string(),
            Self::Paste => "paste".to_string(),
            Self::Quit => "quit".to_string(),
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<String> = Action::all().into_iter().map(Action::name).collect();
        assert_eq!(names.len(), Action::all().len());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("digit-7".parse(), Ok(Action::Digit(7)));
        assert_eq!("push".parse(), Ok(Action::Push));
        assert_eq!("nth-root".parse(), Ok(Action::Apply(Operator::NthRoot)));
        assert_eq!("pi".parse(), Ok(Action::Insert(Constant::Pi)));
        assert_eq!("e".parse(), Ok(Action::Insert(Constant::E)));
        assert!("digit-10".parse::<Action>().is_err());
        assert_eq!(
            "explode".parse::<Action>(),
            Err(ParseActionError("explode".to_string()))
        );
    }
}
