//! Best-effort key-value persistence.
//!
//! Values live in a single JSON object on disk. Nothing here ever fails
//! loudly: unreadable or corrupt files and failed writes are logged and the
//! caller gets its default back.

mod session;

pub use session::Session;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Degree (true) or radian (false) mode.
pub const DEGREES_KEY: &str = "calculator-degrees";
/// Buffer, stack and latches.
pub const SESSION_KEY: &str = "calculator-session";

#[derive(Debug, Error)]
enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON object at the top level")]
    NotAnObject,
}

/// A JSON-file-backed key-value store.
#[derive(Debug, Default)]
pub struct Store {
    /// `None` keeps everything in memory.
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl Store {
    /// Open the store at `path`, starting empty if it cannot be read.
    pub fn open(path: PathBuf) -> Self {
        let values = match read_values(&path) {
            Ok(values) => values,
            Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!(path = %path.display(), "Failed to load saved state: {}", e);
                Map::new()
            }
        };

        Self {
            path: Some(path),
            values,
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read `key`, falling back to `default` when missing or undecodable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.values.get(key) else {
            return default;
        };

        match serde_json::from_value(value.clone()) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(key, "Ignoring saved value: {}", e);
                default
            }
        }
    }

    /// Store `value` under `key` and write the file.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(encoded) => {
                self.values.insert(key.to_string(), encoded);
            }
            Err(e) => {
                warn!(key, "Failed to encode value: {}", e);
                return;
            }
        }

        if let Some(path) = &self.path
            && let Err(e) = write_values(path, &self.values)
        {
            warn!(path = %path.display(), "Failed to save state: {}", e);
        }
    }
}

fn read_values(path: &Path) -> Result<Map<String, Value>, StorageError> {
    let text = std::fs::read_to_string(path)?;
    match serde_json::from_str(&text)? {
        Value::Object(values) => Ok(values),
        _ => Err(StorageError::NotAnObject),
    }
}

fn write_values(path: &Path, values: &Map<String, Value>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let text = serde_json::to_string_pretty(values)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, text)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
