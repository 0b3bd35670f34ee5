//! Clipboard access for copying the buffer and pasting values.

use arboard::Clipboard as SystemHandle;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Access(String),
    #[error("Failed to copy to clipboard: {0}")]
    Write(String),
    #[error("Failed to read from clipboard: {0}")]
    Read(String),
}

/// Plain-text clipboard.
pub trait Clipboard: Send + Sync {
    fn read_text(&self) -> Result<String, ClipboardError>;
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard.
///
/// A new handle is opened for every call so the type stays `Send` and can be
/// used from blocking worker threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let mut clipboard = SystemHandle::new().map_err(|e| ClipboardError::Access(e.to_string()))?;

        clipboard
            .get_text()
            .map_err(|e| ClipboardError::Read(e.to_string()))
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = SystemHandle::new().map_err(|e| ClipboardError::Access(e.to_string()))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Process-local clipboard, used when no desktop clipboard is reachable.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(text.to_string()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn read_text(&self) -> Result<String, ClipboardError> {
        let guard = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::Access(e.to_string()))?;

        guard
            .clone()
            .ok_or_else(|| ClipboardError::Read("clipboard is empty".to_string()))
    }

    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::Access(e.to_string()))?;

        *guard = Some(text.to_string());
        Ok(())
    }
}

/// Pick the desktop clipboard when one can be opened.
pub fn detect_clipboard() -> Arc<dyn Clipboard> {
    match SystemHandle::new() {
        Ok(_) => Arc::new(SystemClipboard),
        Err(e) => {
            tracing::warn!("System clipboard unavailable, using in-process clipboard: {}", e);
            Arc::new(MemoryClipboard::default())
        }
    }
}
