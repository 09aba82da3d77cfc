use std::fmt;

use crate::cli::ui::{Alignment, Table, TableColumn};
use crate::currency::format_signed_amount;
use crate::domain::Transaction;
use crate::ledger::ListFilter;

/// Output attached to a transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(String),
    Info(String),
    /// Non-error notice, such as an empty listing.
    Notice(String),
    Error(String),
    Listing(Listing),
    Help(Vec<String>),
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// Plain-text rendering with no styling applied.
    pub fn render(&self) -> String {
        match self {
            Response::Success(text)
            | Response::Info(text)
            | Response::Notice(text)
            | Response::Error(text) => text.clone(),
            Response::Listing(listing) => listing.render(),
            Response::Help(lines) => lines.join("\n"),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// One table row of a `list` response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub short_id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
}

impl From<&Transaction> for ListingRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            short_id: transaction.short_id(),
            date: transaction.date.format("%Y-%m-%d").to_string(),
            kind: transaction.kind.label().to_string(),
            amount: format_signed_amount(transaction.kind, transaction.amount),
            category: transaction.category.clone(),
        }
    }
}

/// Tabular result of a `list` command, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub filter: ListFilter,
    pub rows: Vec<ListingRow>,
}

impl Listing {
    pub fn new(filter: ListFilter, rows: Vec<ListingRow>) -> Self {
        Self { filter, rows }
    }

    pub fn shown(&self) -> usize {
        self.rows.len()
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(vec![
            TableColumn::new("ID", Alignment::Left),
            TableColumn::new("DATE", Alignment::Left),
            TableColumn::new("TYPE", Alignment::Left),
            TableColumn::new("AMOUNT", Alignment::Right),
            TableColumn::new("CATEGORY", Alignment::Left).max_width(24),
        ]);
        for row in &self.rows {
            table.push_row(vec![
                row.short_id.clone(),
                row.date.clone(),
                row.kind.clone(),
                row.amount.clone(),
                row.category.clone(),
            ]);
        }
        table
    }

    pub fn footer(&self) -> String {
        format!("Showing latest {} records.", self.shown())
    }

    pub fn render(&self) -> String {
        format!("{}\n{}", self.table().render(), self.footer())
    }
}
