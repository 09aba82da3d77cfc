use tracing::debug;

use crate::cli::command::{parse_list_filter, AddArgs, CommandContext, CommandResult, ADD_USAGE, LIST_USAGE};
use crate::cli::registry::CommandEntry;
use crate::cli::response::{Listing, ListingRow, Response};
use crate::currency::format_currency_value;

/// Number of rows shown by `list`.
pub const LIST_LIMIT: usize = 10;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new transaction dated today",
            ADD_USAGE,
            handle_add,
        ),
        CommandEntry::new(
            "list",
            "Show the latest transactions, newest first",
            LIST_USAGE,
            handle_list,
        ),
        CommandEntry::new(
            "balance",
            "Point at the live balance display",
            "balance",
            handle_balance,
        ),
    ]
}

fn handle_add(context: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    let parsed = AddArgs::parse(args)?;
    let draft = parsed.into_draft(context.today);
    let message = format!(
        "Transaction added: {} {} ({}).",
        draft.kind.label(),
        format_currency_value(draft.amount),
        draft.category
    );
    let id = context.store.add(draft);
    debug!(%id, "transaction added from console");
    Ok(Some(Response::Success(message)))
}

fn handle_list(context: &mut CommandContext<'_>, args: &[&str]) -> CommandResult {
    let filter = parse_list_filter(args)?;
    let rows: Vec<ListingRow> = context
        .store
        .recent(filter, LIST_LIMIT)
        .into_iter()
        .map(ListingRow::from)
        .collect();
    if rows.is_empty() {
        return Ok(Some(Response::Notice(format!(
            "No transactions found for type: {filter}."
        ))));
    }
    Ok(Some(Response::Listing(Listing::new(filter, rows))))
}

fn handle_balance(_context: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    Ok(Some(Response::Info(
        "Current Balance: Check the prompt for the real-time balance."
            .to_string(),
    )))
}
