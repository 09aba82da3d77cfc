//! Transaction entry form shared by the add and edit flows of the editor.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{categories_for, is_known_category, Transaction, TransactionDraft, TransactionType};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Outcome of an interactive form session.
#[derive(Debug, Clone, PartialEq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter an amount, category, and date.")]
    MissingFields,
    #[error("Invalid date `{0}`: use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Category `{category}` is not available for {kind} transactions.")]
    UnknownCategory {
        category: String,
        kind: TransactionType,
    },
    #[error("This form is not editing an existing transaction.")]
    NotEditing,
}

/// Field values of the add/edit form, held as the user typed them.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    editing: Option<Uuid>,
    kind: TransactionType,
    pub category: String,
    pub amount: f64,
    pub date: String,
    pub description: String,
}

impl TransactionForm {
    /// Blank form: expense, dated `today`, amount 0, no category.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            editing: None,
            kind: TransactionType::Expense,
            category: String::new(),
            amount: 0.0,
            date: today.format(DATE_FORMAT).to_string(),
            description: String::new(),
        }
    }

    /// Form pre-filled with an existing record, submitting as an update.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            editing: Some(transaction.id),
            kind: transaction.kind,
            category: transaction.category.clone(),
            amount: transaction.amount,
            date: transaction.date.format(DATE_FORMAT).to_string(),
            description: transaction.description.clone(),
        }
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    /// Switches the type. A different type clears the category, since each
    /// type has its own vocabulary.
    pub fn set_kind(&mut self, kind: TransactionType) {
        if kind != self.kind {
            self.category.clear();
        }
        self.kind = kind;
    }

    /// Stores a typed amount; unparsable text counts as 0.
    pub fn set_amount_input(&mut self, raw: &str) {
        self.amount = raw.trim().parse::<f64>().unwrap_or(0.0);
    }

    pub fn category_options(&self) -> &'static [&'static str] {
        categories_for(self.kind)
    }

    fn validated_draft(&self) -> Result<TransactionDraft, FormError> {
        let date_text = self.date.trim();
        if !(self.amount.is_finite() && self.amount > 0.0)
            || self.category.trim().is_empty()
            || date_text.is_empty()
        {
            return Err(FormError::MissingFields);
        }
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(date_text.to_string()))?;
        if !is_known_category(self.kind, &self.category) {
            return Err(FormError::UnknownCategory {
                category: self.category.clone(),
                kind: self.kind,
            });
        }
        Ok(TransactionDraft::new(date, self.kind, self.category.clone(), self.amount)
            .with_description(self.description.clone()))
    }

    /// Checks the fields without submitting.
    pub fn validate(&self) -> Result<(), FormError> {
        self.validated_draft().map(|_| ())
    }

    /// Draft for a new record; the description is kept as entered.
    pub fn submit_new(&self) -> Result<TransactionDraft, FormError> {
        self.validated_draft()
    }

    /// Replacement record keeping the edited record's id.
    pub fn submit_edit(&self) -> Result<Transaction, FormError> {
        let id = self.editing.ok_or(FormError::NotEditing)?;
        let draft = self.validated_draft()?;
        Ok(Transaction::from_draft(id, draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn defaults_match_a_fresh_expense() {
        let form = TransactionForm::new(today());
        assert_eq!(form.kind(), TransactionType::Expense);
        assert_eq!(form.date, "2024-03-15");
        assert_eq!(form.amount, 0.0);
        assert!(form.category.is_empty());
        assert!(form.editing().is_none());
    }

    #[test]
    fn blank_form_is_rejected_with_single_message() {
        let form = TransactionForm::new(today());
        assert_eq!(form.validate(), Err(FormError::MissingFields));
        assert_eq!(
            FormError::MissingFields.to_string(),
            "Please enter an amount, category, and date."
        );
    }

    #[test]
    fn changing_type_resets_category() {
        let mut form = TransactionForm::new(today());
        form.category = "Food".into();
        form.set_kind(TransactionType::Expense);
        assert_eq!(form.category, "Food");
        form.set_kind(TransactionType::Income);
        assert!(form.category.is_empty());
        assert_eq!(form.category_options(), categories_for(TransactionType::Income));
    }

    #[test]
    fn submit_new_keeps_empty_description() {
        let mut form = TransactionForm::new(today());
        form.set_amount_input("42.5");
        form.category = "Food".into();
        let draft = form.submit_new().unwrap();
        assert_eq!(draft.amount, 42.5);
        assert_eq!(draft.description, "");
        assert_eq!(draft.date, today());
    }

    #[test]
    fn rejects_non_positive_amount_and_bad_date() {
        let mut form = TransactionForm::new(today());
        form.category = "Food".into();
        form.set_amount_input("-3");
        assert_eq!(form.validate(), Err(FormError::MissingFields));
        form.set_amount_input("abc");
        assert_eq!(form.validate(), Err(FormError::MissingFields));

        form.set_amount_input("3");
        form.date = "   ".into();
        assert_eq!(form.validate(), Err(FormError::MissingFields));
        form.date = "15/03/2024".into();
        assert_eq!(
            form.validate(),
            Err(FormError::InvalidDate("15/03/2024".into()))
        );
    }

    #[test]
    fn rejects_category_outside_vocabulary() {
        let mut form = TransactionForm::new(today());
        form.set_amount_input("3");
        form.category = "Salary".into();
        assert!(matches!(
            form.validate(),
            Err(FormError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn edit_preserves_id() {
        let original = Transaction::from_draft(
            Uuid::new_v4(),
            TransactionDraft::new(today(), TransactionType::Income, "Gift", 50.0),
        );
        let mut form = TransactionForm::from_transaction(&original);
        form.set_amount_input("75");
        let updated = form.submit_edit().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.amount, 75.0);
        assert_eq!(updated.description, original.description);

        assert_eq!(
            TransactionForm::new(today()).submit_edit(),
            Err(FormError::NotEditing)
        );
    }
}
