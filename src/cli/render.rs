//! Text renderings of ledger state shared by the console and the editor.

use crate::currency::{format_currency_value, format_signed_amount};
use crate::domain::{Displayable, Transaction};
use crate::ledger::{LedgerStore, LedgerTotals};

/// Longest description shown in the full list view.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// Net balance followed by income and expense totals.
pub fn summary_lines(totals: &LedgerTotals) -> Vec<String> {
    vec![
        format!("Balance: {}", format_currency_value(totals.balance)),
        format!("Income:  +{}", format_currency_value(totals.income)),
        format!("Expense: -{}", format_currency_value(totals.expense)),
    ]
}

/// Single-line form of the summary, used by the console.
pub fn summary_line(totals: &LedgerTotals) -> String {
    format!(
        "Balance {} | Income +{} | Expense -{}",
        format_currency_value(totals.balance),
        format_currency_value(totals.income),
        format_currency_value(totals.expense)
    )
}

pub fn preview_description(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return description.to_string();
    }
    let mut cut: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

/// `date - TYPE: category` heading plus description and signed amount.
pub fn history_row(transaction: &Transaction) -> String {
    let heading = transaction.display_label();
    let amount = format_signed_amount(transaction.kind, transaction.amount);
    if transaction.description.is_empty() {
        format!("{heading}  {amount}")
    } else {
        format!(
            "{heading}  {amount}  ({})",
            preview_description(&transaction.description)
        )
    }
}

/// Every transaction, newest first, under a balance header.
pub fn history_lines(store: &LedgerStore) -> Vec<String> {
    let mut lines = vec![format!(
        "Current Balance: {}",
        format_currency_value(store.balance())
    )];
    if store.is_empty() {
        lines.push("No transactions recorded yet.".to_string());
        return lines;
    }
    lines.extend(store.list().iter().rev().map(history_row));
    lines
}
