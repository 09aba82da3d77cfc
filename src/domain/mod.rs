pub mod category;
pub mod common;
pub mod transaction;

pub use category::{categories_for, is_known_category};
pub use common::Displayable;
pub use transaction::{Transaction, TransactionDraft, TransactionType, DEFAULT_DESCRIPTION};
