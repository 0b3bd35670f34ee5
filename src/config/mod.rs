//! User configuration loaded from a TOML file.
//!
//! ```toml
//! persist_session = true
//! state_file = "/home/me/.local/share/ralc/state.json"
//!
//! [keybindings]
//! push = ["enter", "space"]
//! swap = ["ctrl+x"]
//! ```

use crate::keymap::{Keymap, KeymapError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "ralc";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Keymap(#[from] KeymapError),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Save buffer, stack and latches between runs.
    pub persist_session: bool,
    /// Where persisted state lives. Defaults to the user data directory.
    pub state_file: Option<PathBuf>,
    /// Where logs go. Defaults to the user data directory.
    pub log_file: Option<PathBuf>,
    /// Action name → shortcuts, replacing that action's defaults.
    pub keybindings: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            persist_session: true,
            state_file: None,
            log_file: None,
            keybindings: BTreeMap::new(),
        }
    }
}

/// `$XDG_CONFIG_HOME/ralc/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Directory for state and logs.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR))
}

impl Config {
    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Surface bad keybindings at load time rather than at first keypress.
        config.keymap()?;
        Ok(config)
    }

    pub fn keymap(&self) -> Result<Keymap, KeymapError> {
        Keymap::with_overrides(&self.keybindings)
    }

    pub fn state_path(&self) -> Option<PathBuf> {
        self.state_file
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join("state.json")))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join("ralc.log")))
    }
}
