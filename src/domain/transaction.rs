use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Displayable;

/// Placeholder stored when a command omits the description.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Direction of money movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Upper-case label used in listings and confirmations.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    pub fn sign(&self) -> char {
        match self {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTypeError(pub String);

impl fmt::Display for ParseTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not one of income, expense", self.0)
    }
}

impl std::error::Error for ParseTypeError {}

impl FromStr for TransactionType {
    type Err = ParseTypeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ParseTypeError(raw.to_string())),
        }
    }
}

/// Field set of a transaction before an identifier is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub kind: TransactionType,
    pub category: String,
    pub amount: f64,
    pub description: String,
}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        kind: TransactionType,
        category: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A recorded income or expense. Updated only by whole-record replacement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: f64,
    pub description: String,
}

impl Transaction {
    pub fn from_draft(id: Uuid, draft: TransactionDraft) -> Self {
        let TransactionDraft {
            date,
            kind,
            category,
            amount,
            description,
        } = draft;
        Self {
            id,
            date,
            kind,
            category,
            amount,
            description,
        }
    }

    /// Amount with the sign applied by its type.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// First four characters of the id, as shown in compact listings.
    pub fn short_id(&self) -> String {
        let mut id = self.id.to_string();
        id.truncate(4);
        format!("{id}...")
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} - {}: {}", self.date, self.kind.label(), self.category)
    }
}
