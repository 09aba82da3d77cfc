use std::{fmt, str::FromStr};

use uuid::Uuid;

use crate::domain::{Transaction, TransactionDraft, TransactionType};

/// Receives the full transaction sequence after every successful mutation.
pub trait LedgerObserver {
    fn ledger_changed(&self, transactions: &[Transaction]);
}

/// Result of replacing a transaction by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Result of deleting a transaction by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Aggregates shown by the summary views.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Type filter accepted by listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    All,
    Only(TransactionType),
}

impl ListFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::Only(kind) => transaction.kind == *kind,
        }
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFilter::All => f.write_str("all"),
            ListFilter::Only(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for ListFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.eq_ignore_ascii_case("all") {
            return Ok(ListFilter::All);
        }
        raw.parse::<TransactionType>()
            .map(ListFilter::Only)
            .map_err(|_| raw.to_string())
    }
}

/// Ordered transaction list with a narrow mutation interface.
///
/// Insertion order is the only ordering. Observers are notified
/// synchronously after each add, and after each update/delete that matched a
/// record.
#[derive(Default)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    observers: Vec<Box<dyn LedgerObserver>>,
    revision: u64,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with previously persisted records without notifying
    /// observers.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            observers: Vec::new(),
            revision: 0,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn LedgerObserver>) {
        self.observers.push(observer);
    }

    /// Appends a new record built from `draft` and returns its fresh id.
    pub fn add(&mut self, draft: TransactionDraft) -> Uuid {
        let id = Uuid::new_v4();
        self.transactions.push(Transaction::from_draft(id, draft));
        tracing::debug!(%id, count = self.transactions.len(), "transaction added");
        self.notify();
        id
    }

    /// Replaces the record carrying `transaction.id`, keeping its position.
    pub fn update(&mut self, transaction: Transaction) -> UpdateOutcome {
        let Some(slot) = self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == transaction.id)
        else {
            tracing::debug!(id = %transaction.id, "update ignored for unknown transaction");
            return UpdateOutcome::NotFound;
        };
        let id = transaction.id;
        *slot = transaction;
        tracing::debug!(%id, "transaction updated");
        self.notify();
        UpdateOutcome::Updated
    }

    pub fn delete(&mut self, id: Uuid) -> DeleteOutcome {
        let Some(index) = self.transactions.iter().position(|txn| txn.id == id) else {
            tracing::debug!(%id, "delete ignored for unknown transaction");
            return DeleteOutcome::NotFound;
        };
        self.transactions.remove(index);
        tracing::debug!(%id, count = self.transactions.len(), "transaction deleted");
        self.notify();
        DeleteOutcome::Deleted
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Counter bumped by every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn totals(&self) -> LedgerTotals {
        let (income, expense) =
            self.transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    TransactionType::Income => (income + txn.amount, expense),
                    TransactionType::Expense => (income, expense + txn.amount),
                });
        LedgerTotals {
            income,
            expense,
            balance: self.balance(),
        }
    }

    /// Up to `limit` matching records, newest first.
    ///
    /// The filter is applied before the window is taken.
    pub fn recent(&self, filter: ListFilter, limit: usize) -> Vec<&Transaction> {
        let matching: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect();
        let skip = matching.len().saturating_sub(limit);
        matching.into_iter().skip(skip).rev().collect()
    }

    fn notify(&mut self) {
        self.revision += 1;
        for observer in &self.observers {
            observer.ledger_changed(&self.transactions);
        }
    }
}

impl fmt::Debug for LedgerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerStore")
            .field("transactions", &self.transactions)
            .field("observers", &self.observers.len())
            .field("revision", &self.revision)
            .finish()
    }
}
