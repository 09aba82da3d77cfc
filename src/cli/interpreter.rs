use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use tracing::error;

use crate::cli::command::{CommandContext, CommandError, CommandResult};
use crate::cli::commands;
use crate::cli::registry::CommandRegistry;
use crate::cli::response::Response;
use crate::cli::transcript::SessionLog;
use crate::core::time::{Clock, SystemClock};
use crate::ledger::LedgerStore;

/// What a single submitted line did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Whitespace-only input; a bare prompt marker was recorded.
    Blank,
    /// The session log was wiped.
    Cleared,
    Responded(Response),
}

/// Turns console lines into ledger operations and records them in the
/// session log.
pub struct CommandInterpreter {
    registry: CommandRegistry,
    log: SessionLog,
    clock: Box<dyn Clock>,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            registry: commands::default_registry(),
            log: SessionLog::new(),
            clock,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    /// Interprets one line against `store`.
    ///
    /// The verb is matched case-insensitively; remaining tokens are passed
    /// through untouched. Handler failures, panics included, never escape.
    pub fn submit(&mut self, store: &mut LedgerStore, line: &str) -> Submission {
        let trimmed = line.trim();
        let ticket = self.log.record_input(trimmed);
        if trimmed.is_empty() {
            return Submission::Blank;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let verb = tokens[0].to_lowercase();
        let args = &tokens[1..];

        let result = match self.registry.handler(&verb) {
            Some(handler) => {
                let mut context = CommandContext {
                    store,
                    log: &mut self.log,
                    registry: &self.registry,
                    today: self.clock.today(),
                };
                run_guarded(|| handler(&mut context, args))
            }
            None => Err(CommandError::UnknownCommand {
                suggestion: self.registry.suggest(&verb),
                verb,
            }),
        };

        let response = match result {
            Ok(Some(response)) => response,
            Ok(None) => return Submission::Cleared,
            Err(err) => {
                if let CommandError::Unexpected(detail) = &err {
                    error!(line = trimmed, %detail, "command failed unexpectedly");
                }
                err.into_response()
            }
        };

        if !self.log.attach(ticket, response.clone()) {
            return Submission::Cleared;
        }
        Submission::Responded(response)
    }
}

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

static QUIET_PANICS: Once = Once::new();

/// Wraps the process panic hook so panics raised while a command runs are
/// left to the interpreter's own `error!` report instead of stderr.
fn install_quiet_hook() {
    QUIET_PANICS.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !DISPATCHING.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Runs a handler, turning a panic into `CommandError::Unexpected`.
fn run_guarded<F>(handler: F) -> CommandResult
where
    F: FnOnce() -> CommandResult,
{
    install_quiet_hook();
    DISPATCHING.with(|flag| flag.set(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(handler));
    DISPATCHING.with(|flag| flag.set(false));
    outcome.unwrap_or_else(|payload| Err(CommandError::Unexpected(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "panic without message".to_string()
    }
}
