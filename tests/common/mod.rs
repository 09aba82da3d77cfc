#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use finance_tracker::{
    cli::{CommandInterpreter, Response, Submission},
    core::time::FixedClock,
    ledger::LedgerStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

/// Interpreter whose `add` dates everything `today()`.
pub fn interpreter() -> CommandInterpreter {
    CommandInterpreter::with_clock(Box::new(FixedClock(today())))
}

/// Submits `line` and returns the response it produced.
pub fn respond(interpreter: &mut CommandInterpreter, store: &mut LedgerStore, line: &str) -> Response {
    match interpreter.submit(store, line) {
        Submission::Responded(response) => response,
        other => panic!("`{line}` produced no response: {other:?}"),
    }
}
