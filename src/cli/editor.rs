//! Menu-driven editor view: the full transaction list plus add, edit and
//! delete flows built on dialoguer prompts.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing::debug;
use uuid::Uuid;

use crate::cli::forms::{FormError, FormResult, TransactionForm};
use crate::cli::output;
use crate::cli::render;
use crate::cli::shell_context::ShellContext;
use crate::core::time::{Clock, SystemClock};
use crate::currency::format_number;
use crate::domain::TransactionType;
use crate::errors::CliError;
use crate::ledger::{DeleteOutcome, LedgerStore, UpdateOutcome};

const MENU_ITEMS: [&str; 5] = [
    "Add transaction",
    "Edit transaction",
    "Delete transaction",
    "Switch to console",
    "Exit",
];

/// How the editor was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorExit {
    SwitchToConsole,
    Quit,
}

/// Adds the form's draft to the store.
pub fn apply_new(store: &mut LedgerStore, form: &TransactionForm) -> Result<Uuid, FormError> {
    let draft = form.submit_new()?;
    Ok(store.add(draft))
}

/// Replaces the record the form was opened on.
pub fn apply_edit(
    store: &mut LedgerStore,
    form: &TransactionForm,
) -> Result<UpdateOutcome, FormError> {
    let transaction = form.submit_edit()?;
    Ok(store.update(transaction))
}

/// Runs the editor until the user leaves it.
pub fn run(context: &mut ShellContext) -> Result<EditorExit, CliError> {
    loop {
        output::section("Transactions");
        for line in render::summary_lines(&context.store.totals()) {
            output::info(line);
        }
        for line in render::history_lines(&context.store).into_iter().skip(1) {
            output::info(line);
        }

        let choice = Select::with_theme(&context.theme)
            .with_prompt("Choose an action")
            .items(&MENU_ITEMS[..])
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => add_flow(context)?,
            Some(1) => edit_flow(context)?,
            Some(2) => delete_flow(context)?,
            Some(3) | None => return Ok(EditorExit::SwitchToConsole),
            Some(_) => return Ok(EditorExit::Quit),
        }
    }
}

fn add_flow(context: &mut ShellContext) -> Result<(), CliError> {
    let mut form = TransactionForm::new(SystemClock.today());
    loop {
        if let FormResult::Cancelled = fill_form(&context.theme, &mut form)? {
            output::info("Add cancelled.");
            return Ok(());
        }
        match apply_new(&mut context.store, &form) {
            Ok(id) => {
                debug!(%id, "transaction added from editor");
                output::success("Transaction added.");
                return Ok(());
            }
            Err(err) => {
                if !retry_after(&context.theme, &err)? {
                    return Ok(());
                }
            }
        }
    }
}

fn edit_flow(context: &mut ShellContext) -> Result<(), CliError> {
    let Some(id) = pick_transaction(context, "Select a transaction to edit")? else {
        return Ok(());
    };
    let Some(existing) = context.store.get(id) else {
        return Ok(());
    };
    let mut form = TransactionForm::from_transaction(existing);
    loop {
        if let FormResult::Cancelled = fill_form(&context.theme, &mut form)? {
            output::info("Edit cancelled.");
            return Ok(());
        }
        match apply_edit(&mut context.store, &form) {
            Ok(UpdateOutcome::Updated) => {
                output::success("Transaction updated.");
                return Ok(());
            }
            Ok(UpdateOutcome::NotFound) => {
                output::warning("Transaction no longer exists.");
                return Ok(());
            }
            Err(err) => {
                if !retry_after(&context.theme, &err)? {
                    return Ok(());
                }
            }
        }
    }
}

fn delete_flow(context: &mut ShellContext) -> Result<(), CliError> {
    let Some(id) = pick_transaction(context, "Select a transaction to delete")? else {
        return Ok(());
    };
    let confirmed = Confirm::with_theme(&context.theme)
        .with_prompt("Delete this transaction?")
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }
    match context.store.delete(id) {
        DeleteOutcome::Deleted => output::success("Transaction deleted."),
        DeleteOutcome::NotFound => output::warning("Transaction no longer exists."),
    }
    Ok(())
}

fn pick_transaction(context: &ShellContext, prompt: &str) -> Result<Option<Uuid>, CliError> {
    if context.store.is_empty() {
        output::info("No transactions recorded yet.");
        return Ok(None);
    }
    let newest_first: Vec<_> = context.store.list().iter().rev().collect();
    let labels: Vec<String> = newest_first.iter().map(|txn| render::history_row(txn)).collect();
    let choice = Select::with_theme(&context.theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.and_then(|idx| newest_first.get(idx).map(|txn| txn.id)))
}

fn retry_after(theme: &ColorfulTheme, err: &FormError) -> Result<bool, CliError> {
    output::error(err);
    Ok(Confirm::with_theme(theme)
        .with_prompt("Edit the form again?")
        .default(true)
        .interact()?)
}

/// Walks the user through every field, starting from the form's values.
fn fill_form(theme: &ColorfulTheme, form: &mut TransactionForm) -> Result<FormResult<()>, CliError> {
    let kinds = [TransactionType::Expense, TransactionType::Income];
    let kind_labels: Vec<&str> = kinds.iter().map(|kind| kind.label()).collect();
    let current = kinds.iter().position(|kind| *kind == form.kind()).unwrap_or(0);
    let Some(kind_idx) = Select::with_theme(theme)
        .with_prompt("Type")
        .items(&kind_labels)
        .default(current)
        .interact_opt()?
    else {
        return Ok(FormResult::Cancelled);
    };
    form.set_kind(kinds[kind_idx]);

    let amount_text = if form.amount > 0.0 {
        format_number(form.amount).replace(',', "")
    } else {
        String::new()
    };
    let raw_amount: String = Input::with_theme(theme)
        .with_prompt("Amount")
        .with_initial_text(amount_text)
        .allow_empty(true)
        .interact_text()?;
    form.set_amount_input(&raw_amount);

    form.date = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .with_initial_text(form.date.clone())
        .allow_empty(true)
        .interact_text()?;

    let options = form.category_options();
    let selected = options
        .iter()
        .position(|name| *name == form.category)
        .unwrap_or(0);
    let Some(category_idx) = Select::with_theme(theme)
        .with_prompt("Category")
        .items(options)
        .default(selected)
        .interact_opt()?
    else {
        return Ok(FormResult::Cancelled);
    };
    form.category = options[category_idx].to_string();

    form.description = Input::with_theme(theme)
        .with_prompt("Description")
        .with_initial_text(form.description.clone())
        .allow_empty(true)
        .interact_text()?;

    Ok(FormResult::Completed(()))
}
