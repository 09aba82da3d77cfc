mod common;

use std::{cell::Cell, fs, rc::Rc};

use common::{interpreter, respond, temp_base, today};
use finance_tracker::{
    core::utils::tmp_path,
    domain::{Transaction, TransactionDraft, TransactionType},
    errors::LedgerError,
    ledger::{LedgerStore, UpdateOutcome},
    storage::{JsonFileStore, KeyValueStore, MemoryStore, PersistenceBridge, DEFAULT_STORAGE_KEY},
};

fn draft(kind: TransactionType, category: &str, amount: f64) -> TransactionDraft {
    TransactionDraft::new(today(), kind, category, amount)
}

/// Slot store that counts writes before delegating to memory.
#[derive(Clone, Default)]
struct CountingStore {
    inner: MemoryStore,
    writes: Rc<Cell<usize>>,
}

impl KeyValueStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        self.writes.set(self.writes.get() + 1);
        self.inner.set(key, value)
    }
}

#[test]
fn file_slot_round_trip_reproduces_sequence() {
    let base = temp_base();
    let files = JsonFileStore::in_dir(base.join("storage")).unwrap();
    let bridge = PersistenceBridge::new(files.clone(), DEFAULT_STORAGE_KEY);

    let mut store = LedgerStore::new();
    store.subscribe(Box::new(bridge));
    store.add(draft(TransactionType::Income, "Salary", 1500.0).with_description("March paycheck"));
    store.add(draft(TransactionType::Expense, "Rent", 300.0));
    let expected: Vec<Transaction> = store.list().to_vec();

    assert!(files.slot_path(DEFAULT_STORAGE_KEY).exists());
    let reloaded = PersistenceBridge::new(files, DEFAULT_STORAGE_KEY).load();
    assert_eq!(reloaded, expected);
}

#[test]
fn slot_json_uses_lowercase_type_and_plain_dates() {
    let slots = MemoryStore::new();
    let mut store = LedgerStore::new();
    store.subscribe(Box::new(PersistenceBridge::new(slots.clone(), "ledger")));
    store.add(draft(TransactionType::Expense, "Food", 12.5));

    let raw = slots.get("ledger").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let record = &value[0];
    assert_eq!(record["type"], "expense");
    assert_eq!(record["date"], "2024-03-15");
    assert_eq!(record["amount"], 12.5);
    assert_eq!(record["description"], "No description");
}

#[test]
fn every_effective_mutation_saves_once() {
    let slots = CountingStore::default();
    let mut store = LedgerStore::new();
    store.subscribe(Box::new(PersistenceBridge::new(slots.clone(), "ledger")));

    let id = store.add(draft(TransactionType::Expense, "Food", 3.0));
    assert_eq!(slots.writes.get(), 1);

    let mut changed = store.get(id).unwrap().clone();
    changed.amount = 4.0;
    assert_eq!(store.update(changed.clone()), UpdateOutcome::Updated);
    assert_eq!(slots.writes.get(), 2);

    changed.id = uuid::Uuid::new_v4();
    assert_eq!(store.update(changed), UpdateOutcome::NotFound);
    store.delete(uuid::Uuid::new_v4());
    assert_eq!(slots.writes.get(), 2);

    store.delete(id);
    store.delete(id);
    assert_eq!(slots.writes.get(), 3);
}

#[test]
fn corrupt_slot_loads_as_empty_ledger() {
    let base = temp_base();
    let files = JsonFileStore::in_dir(base.join("storage")).unwrap();
    fs::write(files.slot_path(DEFAULT_STORAGE_KEY), "{not json").unwrap();

    let bridge = PersistenceBridge::new(files, DEFAULT_STORAGE_KEY);
    assert!(bridge.try_load().is_err());
    assert!(bridge.load().is_empty());
}

#[test]
fn failing_slot_write_changes_neither_ledger_nor_transcript() {
    let base = temp_base();
    let files = JsonFileStore::in_dir(base.join("storage")).unwrap();
    let slot = files.slot_path(DEFAULT_STORAGE_KEY);
    // A directory where the staging file should go makes every write fail.
    fs::create_dir_all(tmp_path(&slot)).unwrap();

    let mut store = LedgerStore::new();
    store.subscribe(Box::new(PersistenceBridge::new(files, DEFAULT_STORAGE_KEY)));
    let mut console = interpreter();

    let response = respond(&mut console, &mut store, "add income 20 Gift");
    assert!(!response.is_error());
    assert_eq!(store.len(), 1);
    assert_eq!(console.log().len(), 1);
    assert!(!slot.exists());
}
