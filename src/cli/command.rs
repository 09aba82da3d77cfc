use chrono::NaiveDate;
use thiserror::Error;

use crate::cli::registry::CommandRegistry;
use crate::cli::response::Response;
use crate::cli::transcript::SessionLog;
use crate::domain::{TransactionDraft, TransactionType};
use crate::ledger::{LedgerStore, ListFilter};

pub const ADD_USAGE: &str = "add [income|expense] <amount> <category> [-d <desc>]";
pub const LIST_USAGE: &str = "list [all|income|expense]";
const DESCRIPTION_FLAG: &str = "-d";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command: {verb}. Type 'help' for a list of commands.")]
    UnknownCommand {
        verb: String,
        suggestion: Option<&'static str>,
    },
    #[error("An unexpected error occurred.")]
    Unexpected(String),
}

impl CommandError {
    pub fn into_response(self) -> Response {
        match &self {
            CommandError::UnknownCommand {
                suggestion: Some(name),
                ..
            } => Response::Error(format!("{self} Did you mean `{name}`?")),
            _ => Response::Error(self.to_string()),
        }
    }
}

pub type CommandResult = Result<Option<Response>, CommandError>;

/// State a command handler may read or mutate.
pub struct CommandContext<'a> {
    pub store: &'a mut LedgerStore,
    pub log: &'a mut SessionLog,
    pub registry: &'a CommandRegistry,
    pub today: NaiveDate,
}

fn invalid_add(detail: impl std::fmt::Display) -> CommandError {
    CommandError::InvalidArguments(format!(
        "Invalid 'add' format: {detail}. Use '{ADD_USAGE}'."
    ))
}

/// Validated arguments of `add <type> <amount> <category> [-d <words...>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddArgs {
    pub kind: TransactionType,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

impl AddArgs {
    /// Parses the tokens following the verb. Tokens between the category
    /// and `-d` are ignored; everything after the first `-d` is the
    /// description.
    pub fn parse(args: &[&str]) -> Result<Self, CommandError> {
        let raw_kind = args
            .first()
            .ok_or_else(|| invalid_add("missing transaction type"))?;
        let kind = raw_kind
            .parse::<TransactionType>()
            .map_err(|_| invalid_add(format!("unknown type `{raw_kind}`, expected income or expense")))?;

        let raw_amount = args.get(1).ok_or_else(|| invalid_add("missing amount"))?;
        let amount = raw_amount
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| invalid_add(format!("amount `{raw_amount}` is not a number")))?;
        if amount <= 0.0 {
            return Err(invalid_add("amount must be greater than zero"));
        }

        let category = args
            .get(2)
            .filter(|token| !token.eq_ignore_ascii_case(DESCRIPTION_FLAG))
            .ok_or_else(|| invalid_add("missing category"))?;

        let rest = &args[3..];
        let description = rest
            .iter()
            .position(|token| token.eq_ignore_ascii_case(DESCRIPTION_FLAG))
            .map(|idx| rest[idx + 1..].join(" "))
            .filter(|text| !text.is_empty());

        Ok(Self {
            kind,
            amount,
            category: (*category).to_string(),
            description,
        })
    }

    pub fn into_draft(self, date: NaiveDate) -> TransactionDraft {
        let draft = TransactionDraft::new(date, self.kind, self.category, self.amount);
        match self.description {
            Some(description) => draft.with_description(description),
            None => draft,
        }
    }
}

/// Reads the optional `list` filter; tokens after the first are ignored.
pub fn parse_list_filter(args: &[&str]) -> Result<ListFilter, CommandError> {
    match args.first() {
        None => Ok(ListFilter::All),
        Some(raw) => raw.parse::<ListFilter>().map_err(|raw| {
            CommandError::InvalidArguments(format!(
                "Invalid 'list' filter `{raw}`. Use '{LIST_USAGE}'."
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_DESCRIPTION;

    #[test]
    fn parses_description_after_flag() {
        let args = AddArgs::parse(&["income", "1500", "Salary", "-d", "March", "paycheck"]).unwrap();
        assert_eq!(args.kind, TransactionType::Income);
        assert_eq!(args.amount, 1500.0);
        assert_eq!(args.category, "Salary");
        assert_eq!(args.description.as_deref(), Some("March paycheck"));
    }

    #[test]
    fn ignores_tokens_between_category_and_flag() {
        let args = AddArgs::parse(&["expense", "12.5", "Food", "lunch", "-d", "tacos"]).unwrap();
        assert_eq!(args.description.as_deref(), Some("tacos"));
        let args = AddArgs::parse(&["expense", "12.5", "Food", "lunch"]).unwrap();
        assert_eq!(args.description, None);
    }

    #[test]
    fn dangling_flag_falls_back_to_placeholder() {
        let args = AddArgs::parse(&["expense", "3", "Bills", "-d"]).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(args.into_draft(date).description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn type_is_case_insensitive_and_category_keeps_case() {
        let args = AddArgs::parse(&["INCOME", "10", "SideGig"]).unwrap();
        assert_eq!(args.kind, TransactionType::Income);
        assert_eq!(args.category, "SideGig");
    }

    #[test]
    fn rejects_bad_input() {
        for args in [
            vec![],
            vec!["transfer", "10", "Food"],
            vec!["expense"],
            vec!["expense", "abc", "Food"],
            vec!["expense", "NaN", "Food"],
            vec!["expense", "inf", "Food"],
            vec!["expense", "0", "Food"],
            vec!["expense", "-4", "Food"],
            vec!["expense", "4"],
            vec!["expense", "4", "-d", "oops"],
        ] {
            let err = AddArgs::parse(&args).unwrap_err();
            assert!(
                matches!(err, CommandError::InvalidArguments(ref msg) if msg.contains(ADD_USAGE)),
                "args {args:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn flag_in_category_position_counts_as_missing_category() {
        let err = AddArgs::parse(&["income", "10", "-d", "lunch"]).unwrap_err();
        assert_eq!(
            err,
            CommandError::InvalidArguments(format!(
                "Invalid 'add' format: missing category. Use '{ADD_USAGE}'."
            ))
        );
        assert!(AddArgs::parse(&["income", "10", "-D"]).is_err());
    }

    #[test]
    fn list_filter_parsing() {
        assert_eq!(parse_list_filter(&[]).unwrap(), ListFilter::All);
        assert_eq!(
            parse_list_filter(&["Income", "extra"]).unwrap(),
            ListFilter::Only(TransactionType::Income)
        );
        assert!(parse_list_filter(&["weekly"]).is_err());
    }

    #[test]
    fn unknown_command_with_suggestion_renders_hint() {
        let response = CommandError::UnknownCommand {
            verb: "lst".into(),
            suggestion: Some("list"),
        }
        .into_response();
        assert_eq!(
            response,
            Response::Error(
                "Unknown command: lst. Type 'help' for a list of commands. Did you mean `list`?"
                    .into()
            )
        );
    }
}
