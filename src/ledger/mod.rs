//! In-memory ledger state and its mutation contract.

pub mod store;

pub use store::{
    DeleteOutcome, LedgerObserver, LedgerStore, LedgerTotals, ListFilter, UpdateOutcome,
};
