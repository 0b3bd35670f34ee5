//! Action dispatch between the key map, the engine, the clipboard and the store.
//!
//! Everything here is synchronous. The event loop owns the one slow operation,
//! reading the clipboard, and hands its result back through
//! [`App::on_paste_resolved`].

use crate::calculator::{Calculator, Clipboard, ClipboardError, format_number};
use crate::items::alternate_action;
use crate::keymap::{Action, Keymap, Shortcut};
use crate::storage::{DEGREES_KEY, SESSION_KEY, Session, Store};
use std::sync::Arc;
use tracing::{debug, warn};

/// What the event loop must do after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start a clipboard read and report back with `on_paste_resolved`.
    ReadClipboard,
    Quit,
}

/// Front-end state: the engine plus everything it talks to.
pub struct App {
    calculator: Calculator,
    keymap: Keymap,
    /// Receives the angle mode and, when enabled, the session.
    store: Store,
    clipboard: Arc<dyn Clipboard>,
    /// Save buffer, stack and latches after every change.
    persist_session: bool,
    /// A clipboard read is in flight.
    paste_pending: bool,
    /// Feedback from the last copy or paste.
    status: Option<String>,
}

impl App {
    /// Wrap a restored or fresh calculator. Nothing is written until the first
    /// action.
    pub fn new(
        calculator: Calculator,
        keymap: Keymap,
        store: Store,
        clipboard: Arc<dyn Clipboard>,
        persist_session: bool,
    ) -> Self {
        Self {
            calculator,
            keymap,
            store,
            clipboard,
            persist_session,
            paste_pending: false,
            status: None,
        }
    }

    /// The engine, for rendering.
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Effective bindings, used for the keypad legend.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// A handle for reading the clipboard off the event loop.
    pub fn clipboard(&self) -> Arc<dyn Clipboard> {
        Arc::clone(&self.clipboard)
    }

    /// Whether a clipboard read started by [`Effect::ReadClipboard`] has not
    /// come back yet.
    pub fn paste_pending(&self) -> bool {
        self.paste_pending
    }

    /// One-line feedback for the last copy or paste.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Dispatch a keystroke. Unbound keys are ignored.
    pub fn handle_key(&mut self, shortcut: &Shortcut) -> Effect {
        match self.keymap.lookup(shortcut) {
            Some(action) => self.handle_action(action),
            None => {
                debug!(%shortcut, "unbound key");
                Effect::None
            }
        }
    }

    /// Run one action against the engine.
    ///
    /// Under alt-mode a primary action runs the alternate that takes its place
    /// on the keypad (`x²` becomes `xʸ`, `⌫` becomes drop, and so on).
    pub fn handle_action(&mut self, action: Action) -> Effect {
        let action = match alternate_action(action) {
            Some(alternate) if self.calculator.alt_enabled() => alternate,
            _ => action,
        };
        debug!(%action, "dispatch");
        self.status = None;

        let calc = &mut self.calculator;
        match action {
            Action::Digit(digit) => calc.type_digit(digit),
            Action::Point => calc.type_point(),
            Action::Push => calc.push(),
            Action::Backspace => calc.backspace(),
            Action::ClearOrClearAll => calc.clear_or_clear_all(),
            Action::ClearAll => calc.clear_all(),
            Action::Drop => calc.drop(),
            Action::Swap => calc.swap(),
            Action::ToggleAlt => calc.toggle_alt(),
            Action::ToggleAngleMode => {
                let mode = calc.toggle_angle_mode();
                self.store.set(DEGREES_KEY, &mode.is_degrees());
            }
            Action::Apply(operator) => calc.apply_operator(operator),
            Action::Insert(constant) => calc.insert(constant),
            Action::Copy => {
                self.copy();
                return Effect::None;
            }
            Action::Paste => {
                if self.paste_pending {
                    debug!("paste already pending");
                    return Effect::None;
                }
                self.paste_pending = true;
                return Effect::ReadClipboard;
            }
            Action::Quit => return Effect::Quit,
        }

        self.save_session();
        Effect::None
    }

    /// Apply the result of a clipboard read started by [`Effect::ReadClipboard`].
    pub fn on_paste_resolved(&mut self, result: Result<String, ClipboardError>) {
        self.paste_pending = false;
        match result {
            Ok(text) => self.paste_text(&text),
            Err(e) => {
                warn!("Paste failed: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    /// Feed text pasted through the terminal, or read from the clipboard.
    pub fn paste_text(&mut self, text: &str) {
        let count = self.calculator.paste(text);
        self.status = Some(match count {
            0 => "Nothing to paste".to_string(),
            1 => "Pasted 1 value".to_string(),
            n => format!("Pasted {} values", n),
        });

        if count > 0 {
            self.save_session();
        }
    }

    fn copy(&mut self) {
        let text = self.calculator.copy_text();
        match self.clipboard.write_text(text) {
            Ok(()) => {
                debug!(text, "copied buffer");
                self.status = Some(format!("Copied {}", format_number(text)));
            }
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn save_session(&mut self) {
        if self.persist_session {
            self.store.set(SESSION_KEY, &Session::capture(&self.calculator));
        }
    }

    /// Final write on shutdown.
    pub fn finish(&mut self) {
        self.save_session();
    }
}
