use crate::{domain::Transaction, errors::LedgerError, ledger::LedgerObserver};

use super::{KeyValueStore, Result};

/// Mirrors the full transaction list into a single durable slot.
///
/// Loading never fails: unreadable or corrupt data yields an empty ledger.
/// Saving never propagates: failures are logged and dropped.
pub struct PersistenceBridge<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the slot and parses it into the initial ledger state.
    pub fn load(&self) -> Vec<Transaction> {
        match self.try_load() {
            Ok(Some(transactions)) => {
                tracing::debug!(
                    key = %self.key,
                    count = transactions.len(),
                    "loaded persisted transactions"
                );
                transactions
            }
            Ok(None) => {
                tracing::debug!(key = %self.key, "no persisted transactions found");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "error reading stored ledger, starting empty");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Option<Vec<Transaction>>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let transactions: Vec<Transaction> = serde_json::from_str(&raw)?;
        Ok(Some(transactions))
    }

    pub fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(transactions).map_err(LedgerError::from)?;
        self.store.set(&self.key, &json)
    }
}

impl<S: KeyValueStore> LedgerObserver for PersistenceBridge<S> {
    fn ledger_changed(&self, transactions: &[Transaction]) {
        if let Err(err) = self.save(transactions) {
            tracing::error!(key = %self.key, error = %err, "error saving ledger");
        }
    }
}
