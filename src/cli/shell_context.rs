use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm};
use tracing::{debug, warn};

use crate::cli::interpreter::{CommandInterpreter, Submission};
use crate::cli::output::{self, OutputPreferences};
use crate::cli::view::ViewMode;
use crate::config::{Config, ConfigManager};
use crate::core::utils::PathResolver;
use crate::currency::format_currency_value;
use crate::errors::CliError;
use crate::ledger::LedgerStore;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore, PersistenceBridge};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    SwitchView,
    Exit,
}

/// Everything one shell session owns: the ledger, the console
/// interpreter and the active view.
pub struct ShellContext {
    pub mode: CliMode,
    pub view: ViewMode,
    pub store: LedgerStore,
    pub interpreter: CommandInterpreter,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Builds a session rooted at the resolved data directory.
    pub fn new(mode: CliMode) -> Self {
        Self::load(mode, &PathResolver::base_dir())
    }

    /// Reads the config under `base`, applies its output preferences and
    /// loads the ledger slot it names.
    ///
    /// An unusable data directory never stops the session: the config falls
    /// back to defaults and the ledger lives in memory only.
    pub fn load(mode: CliMode, base: &Path) -> Self {
        let config = match ConfigManager::with_base_dir(base) {
            Ok(manager) => load_config(&manager),
            Err(err) => {
                warn!(path = %base.display(), %err, "config directory unavailable, using defaults");
                Config::default()
            }
        };
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_mode,
            screen_reader_mode: config.screen_reader_mode,
        });

        let key = config.storage_key.clone();
        match JsonFileStore::for_base(base) {
            Ok(slots) => Self::with_bridge(mode, config, PersistenceBridge::new(slots, key)),
            Err(err) => {
                warn!(path = %base.display(), %err, "storage directory unavailable, ledger will not be saved");
                Self::with_bridge(mode, config, PersistenceBridge::new(MemoryStore::new(), key))
            }
        }
    }

    /// Session over an arbitrary slot store; the bridge is subscribed to
    /// the store so every mutation is saved.
    pub fn with_bridge<S>(mode: CliMode, config: Config, bridge: PersistenceBridge<S>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let mut store = LedgerStore::with_transactions(bridge.load());
        debug!(count = store.len(), key = bridge.key(), "ledger loaded");
        store.subscribe(Box::new(bridge));

        let view = match mode {
            CliMode::Interactive => config.default_view,
            CliMode::Script => ViewMode::Console,
        };

        Self {
            mode,
            view,
            store,
            interpreter: CommandInterpreter::new(),
            config,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn submit(&mut self, line: &str) -> Submission {
        self.interpreter.submit(&mut self.store, line)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.interpreter.registry().names().collect()
    }

    /// Console prompt carrying the live balance.
    pub fn prompt(&self) -> String {
        format!("[{}] $ ", format_currency_value(self.store.balance()))
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit finance tracker?")
            .default(true)
            .interact()?)
    }
}

fn load_config(manager: &ConfigManager) -> Config {
    if !manager.path().exists() {
        let config = Config::default();
        if let Err(err) = manager.save(&config) {
            warn!(path = %manager.path().display(), %err, "could not write default config");
        }
        return config;
    }
    manager.load().unwrap_or_else(|err| {
        warn!(path = %manager.path().display(), %err, "config unreadable, using defaults");
        Config::default()
    })
}
