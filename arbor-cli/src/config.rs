//! CLI configuration, read from `config.json` in the config directory.

use std::fs;
use std::path::Path;

use arbor::{LeafToggle, SelectionMode, StoreConfig};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

use crate::error::CliError;

/// Settings for one CLI session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Selection policy for the store.
    pub selection: SelectionMode,
    /// Leaf toggle policy for the store.
    pub leaf_toggle: LeafToggle,
    /// Log verbosity.
    pub log_level: LevelFilter,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            selection: SelectionMode::default(),
            leaf_toggle: LeafToggle::default(),
            log_level: LevelFilter::Debug,
        }
    }
}

impl CliConfig {
    /// Read the config at `path`, or the defaults if there is no file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(text: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The store settings carried by this config.
    pub fn store(&self) -> StoreConfig {
        StoreConfig::new()
            .selection(self.selection)
            .leaf_toggle(self.leaf_toggle)
    }
}
