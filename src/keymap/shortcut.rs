//! Key + modifier combinations, parsed from strings like `"ctrl+v"`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("Empty shortcut")]
    Empty,
    #[error("Unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
}

/// A physical key, independent of modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,
}

/// Modifier state of a keystroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }
}

/// A key together with its modifiers.
///
/// Shift is folded into character keys (`shift+a` is `A`), so a shortcut
/// compares equal to what the terminal reports for the same keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Shortcut {
    key: Key,
    modifiers: Modifiers,
}

impl Shortcut {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        match key {
            Key::Char(c) if modifiers.shift => Self {
                key: Key::Char(c.to_ascii_uppercase()),
                modifiers: Modifiers {
                    shift: false,
                    ..modifiers
                },
            },
            _ => Self { key, modifiers },
        }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::none())
    }

    #[cfg(test)]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

fn parse_key(name: &str) -> Result<Key, ShortcutError> {
    let key = match name.to_ascii_lowercase().as_str() {
        "enter" | "return" => Key::Enter,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "escape" | "esc" => Key::Escape,
        "tab" => Key::Tab,
        "space" => Key::Char(' '),
        "plus" => Key::Char('+'),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => return Err(ShortcutError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok(key)
}

impl FromStr for Shortcut {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutError::Empty);
        }
        if s == "+" {
            return Ok(Self::plain(Key::Char('+')));
        }

        let mut parts: Vec<&str> = s.split('+').collect();
        let key_name = parts.pop().unwrap_or_default();
        if key_name.is_empty() {
            return Err(ShortcutError::UnknownKey(s.to_string()));
        }

        let mut modifiers = Modifiers::none();
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "meta" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                _ => return Err(ShortcutError::UnknownModifier(part.to_string())),
            }
        }

        Ok(Self::new(parse_key(key_name)?, modifiers))
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("shift+")?;
        }

        match self.key {
            Key::Char(' ') => f.write_str("space"),
            Key::Char('+') if self.modifiers != Modifiers::none() => f.write_str("plus"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Enter => f.write_str("enter"),
            Key::Backspace => f.write_str("backspace"),
            Key::Delete => f.write_str("delete"),
            Key::Escape => f.write_str("escape"),
            Key::Tab => f.write_str("tab"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keys() {
        assert_eq!("7".parse(), Ok(Shortcut::plain(Key::Char('7'))));
        assert_eq!("Enter".parse(), Ok(Shortcut::plain(Key::Enter)));
        assert_eq!("esc".parse(), Ok(Shortcut::plain(Key::Escape)));
        assert_eq!("+".parse(), Ok(Shortcut::plain(Key::Char('+'))));
        assert_eq!("space".parse(), Ok(Shortcut::plain(Key::Char(' '))));
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(
            "ctrl+v".parse(),
            Ok(Shortcut::new(Key::Char('v'), Modifiers::ctrl()))
        );
        assert_eq!(
            "Ctrl+Alt+Delete".parse::<Shortcut>().map(|s| s.modifiers()),
            Ok(Modifiers {
                ctrl: true,
                alt: true,
                shift: false
            })
        );
        assert_eq!(
            "ctrl+plus".parse(),
            Ok(Shortcut::new(Key::Char('+'), Modifiers::ctrl()))
        );
    }

    #[test]
    fn test_shift_folds_into_char() {
        assert_eq!("shift+s".parse(), Ok(Shortcut::plain(Key::Char('S'))));
        assert_eq!(
            "alt+shift+t".parse(),
            Ok(Shortcut::new(Key::Char('T'), Modifiers::alt()))
        );
        let tab: Shortcut = "shift+tab".parse().unwrap();
        assert!(tab.modifiers().shift);
    }

    #[test]
    fn test_errors() {
        assert_eq!("".parse::<Shortcut>(), Err(ShortcutError::Empty));
        assert_eq!(
            "hyper+x".parse::<Shortcut>(),
            Err(ShortcutError::UnknownModifier("hyper".to_string()))
        );
        assert_eq!(
            "ctrl+pageup".parse::<Shortcut>(),
            Err(ShortcutError::UnknownKey("pageup".to_string()))
        );
        assert!("ctrl+".parse::<Shortcut>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for text in ["ctrl+v", "enter", "alt+S", "ctrl+plus", "+", "space", "shift+tab"] {
            let shortcut: Shortcut = text.parse().unwrap();
            assert_eq!(shortcut.to_string(), text);
        }
    }
}
