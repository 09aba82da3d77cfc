//! Durable key-value slots and the bridge that mirrors the ledger into one.

pub mod bridge;
pub mod json_backend;
pub mod memory;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Key under which the transaction list is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "finance_tracker_data";

/// Abstraction over string-valued storage slots addressed by key.
pub trait KeyValueStore {
    /// Returns `None` when nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Overwrites the slot wholesale.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

pub use bridge::PersistenceBridge;
pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
