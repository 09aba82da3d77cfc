mod common;

use common::{interpreter, respond, today};
use finance_tracker::{
    cli::{Response, Submission},
    domain::{TransactionType, DEFAULT_DESCRIPTION},
    ledger::{LedgerStore, ListFilter},
};
use regex::Regex;

fn listing(response: Response) -> finance_tracker::cli::response::Listing {
    match response {
        Response::Listing(listing) => listing,
        other => panic!("expected a listing, got {other:?}"),
    }
}

#[test]
fn valid_add_appends_one_record_and_moves_balance() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();

    let response = respond(&mut console, &mut store, "add income 1500 Salary -d March paycheck");
    assert_eq!(
        response,
        Response::Success("Transaction added: INCOME $1,500 (Salary).".into())
    );
    assert_eq!(store.len(), 1);
    let txn = &store.list()[0];
    assert_eq!(txn.kind, TransactionType::Income);
    assert_eq!(txn.amount, 1500.0);
    assert_eq!(txn.category, "Salary");
    assert_eq!(txn.description, "March paycheck");
    assert_eq!(txn.date, today());
    assert_eq!(store.balance(), 1500.0);

    respond(&mut console, &mut store, "add expense 300 Rent");
    assert_eq!(store.balance(), 1200.0);
    assert_eq!(store.list()[1].description, DEFAULT_DESCRIPTION);
}

#[test]
fn invalid_add_leaves_ledger_unchanged() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    respond(&mut console, &mut store, "add expense 10 Food");

    for line in [
        "add",
        "add expense abc Food",
        "add expense 0 Food",
        "add expense -5 Food",
        "add expense 5",
        "add transfer 5 Food",
    ] {
        let response = respond(&mut console, &mut store, line);
        assert!(response.is_error(), "`{line}` should fail, got {response:?}");
        assert_eq!(store.len(), 1, "`{line}` mutated the ledger");
    }
    assert_eq!(store.balance(), -10.0);
}

#[test]
fn list_all_shows_ten_most_recent_newest_first() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    for idx in 0..12 {
        respond(&mut console, &mut store, &format!("add expense {} Cat{idx}", idx + 1));
    }

    let listing = listing(respond(&mut console, &mut store, "list all"));
    assert_eq!(listing.shown(), 10);
    assert_eq!(listing.rows[0].category, "Cat11");
    assert_eq!(listing.rows[9].category, "Cat2");
    assert!(listing.render().ends_with("Showing latest 10 records."));
}

#[test]
fn list_income_filters_before_windowing() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    for line in [
        "add income 100 Salary",
        "add expense 5 Food",
        "add income 200 Gift",
        "add expense 7 Bills",
        "add income 300 Investment",
    ] {
        respond(&mut console, &mut store, line);
    }

    let listing = listing(respond(&mut console, &mut store, "list INCOME"));
    assert_eq!(listing.filter, ListFilter::Only(TransactionType::Income));
    let categories: Vec<_> = listing.rows.iter().map(|row| row.category.as_str()).collect();
    assert_eq!(categories, vec!["Investment", "Gift", "Salary"]);
    assert!(listing.rows.iter().all(|row| row.kind == "INCOME"));
}

#[test]
fn listing_rows_render_signed_amounts() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    respond(&mut console, &mut store, "add income 1500 Salary");
    respond(&mut console, &mut store, "add expense 300 Rent");

    let rendered = listing(respond(&mut console, &mut store, "list")).render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert!(lines[0].contains("ID") && lines[0].contains("CATEGORY"));
    let rent = Regex::new(r"^\s*[0-9a-f]{4}\.\.\.\s+2024-03-15\s+EXPENSE\s+- \$300\s+Rent$").unwrap();
    let salary = Regex::new(r"^\s*[0-9a-f]{4}\.\.\.\s+2024-03-15\s+INCOME\s+\+ \$1,500\s+Salary$").unwrap();
    assert!(rent.is_match(lines[2]), "row was {:?}", lines[2]);
    assert!(salary.is_match(lines[3]), "row was {:?}", lines[3]);
    assert_eq!(lines[4], "Showing latest 2 records.");
}

#[test]
fn empty_listing_names_the_filter() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    assert_eq!(
        respond(&mut console, &mut store, "list"),
        Response::Notice("No transactions found for type: all.".into())
    );
    respond(&mut console, &mut store, "add expense 4 Food");
    assert_eq!(
        respond(&mut console, &mut store, "list income"),
        Response::Notice("No transactions found for type: income.".into())
    );
    assert!(respond(&mut console, &mut store, "list weekly").is_error());
}

#[test]
fn clear_empties_history_but_not_the_ledger() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    respond(&mut console, &mut store, "add income 50 Gift");
    respond(&mut console, &mut store, "help");

    assert_eq!(console.submit(&mut store, "clear"), Submission::Cleared);
    assert!(console.log().history().is_empty());
    assert!(console.log().outputs().is_empty());

    let listing = listing(respond(&mut console, &mut store, "list all"));
    assert_eq!(listing.shown(), 1);
    assert_eq!(console.log().history(), vec!["$ list all"]);
}

#[test]
fn blank_lines_record_a_bare_prompt() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    assert_eq!(console.submit(&mut store, "   "), Submission::Blank);
    respond(&mut console, &mut store, "balance");
    assert_eq!(console.log().history(), vec!["$", "$ balance"]);
    assert_eq!(console.log().outputs().len(), 1);
}

#[test]
fn history_pairs_inputs_with_outputs() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    respond(&mut console, &mut store, "add expense 9 Food");
    respond(&mut console, &mut store, "nonsense");
    let entries = console.log().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].input, "$ add expense 9 Food");
    assert!(matches!(entries[0].output, Some(Response::Success(_))));
    assert_eq!(
        entries[1].output,
        Some(Response::Error(
            "Unknown command: nonsense. Type 'help' for a list of commands.".into()
        ))
    );
}

#[test]
fn help_lists_every_verb() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    let Response::Help(lines) = respond(&mut console, &mut store, "help") else {
        panic!("help did not return help text");
    };
    assert_eq!(lines[0], "Available Commands:");
    for verb in ["add [income|expense]", "list [all|income|expense]", "balance", "clear", "help"] {
        assert!(
            lines.iter().any(|line| line.starts_with(&format!("- {verb}"))),
            "missing {verb}"
        );
    }
}

#[test]
fn balance_points_at_live_display() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    let response = respond(&mut console, &mut store, "balance");
    assert!(matches!(response, Response::Info(ref text) if text.starts_with("Current Balance:")));
}

#[test]
fn example_scenario() {
    let mut store = LedgerStore::new();
    let mut console = interpreter();
    respond(&mut console, &mut store, "add income 1500 Salary -d March paycheck");
    assert_eq!(store.balance(), 1500.0);
    respond(&mut console, &mut store, "add expense 300 Rent");
    assert_eq!(store.balance(), 1200.0);
    assert_eq!(store.list()[1].description, "No description");

    let listing = listing(respond(&mut console, &mut store, "list all"));
    assert_eq!(listing.rows[0].category, "Rent");
    assert_eq!(listing.rows[1].category, "Salary");
}
