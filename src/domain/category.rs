//! Fixed category vocabulary offered by the form editor.
//!
//! The command console accepts any non-empty category and never consults
//! this list.

use crate::domain::transaction::TransactionType;

const INCOME_CATEGORIES: &[&str] = &["Salary", "Investment", "Gift", "Other"];
const EXPENSE_CATEGORIES: &[&str] = &["Food", "Transport", "Rent", "Bills", "Entertainment", "Other"];

/// Categories selectable for the given transaction type, in display order.
pub fn categories_for(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}

pub fn is_known_category(kind: TransactionType, name: &str) -> bool {
    categories_for(kind).iter().any(|candidate| *candidate == name)
}
