//! Terminal key events → [`Shortcut`]s.

use crate::keymap::{Key, Modifiers, Shortcut};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Translate a key press. Only presses count; keys that cannot be bound
/// (arrows, function keys) yield `None`.
pub fn shortcut_for(event: &KeyEvent) -> Option<Shortcut> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let mut modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
    };

    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers.shift = true;
            Key::Tab
        }
        _ => return None,
    };

    Some(Shortcut::new(key, modifiers))
}
