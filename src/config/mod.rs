use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    cli::view::ViewMode,
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::LedgerError,
    storage::DEFAULT_STORAGE_KEY,
};

/// User-tunable settings persisted next to the ledger slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Slot the ledger is mirrored into.
    pub storage_key: String,
    pub default_view: ViewMode,
    /// Disables colors and icons in console output.
    pub plain_mode: bool,
    pub screen_reader_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.into(),
            default_view: ViewMode::Console,
            plain_mode: false,
            screen_reader_mode: false,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for `<base>/config/config.json`, creating the directory.
    pub fn with_base_dir(base: &Path) -> Result<Self, LedgerError> {
        ensure_dir(&PathResolver::config_dir_in(base))?;
        Ok(Self {
            path: PathResolver::config_file_in(base),
        })
    }

    /// Reads the config file, falling back to defaults when it is absent.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
