use std::{
    borrow::Cow,
    io::{self, BufRead, Write},
};

use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use tracing::{debug, warn};

use crate::cli::editor::{self, EditorExit};
use crate::cli::interpreter::Submission;
use crate::cli::output;
use crate::cli::render;
use crate::cli::shell_context::{CliMode, LoopControl, ShellContext};
use crate::cli::view::ViewMode;
use crate::errors::CliError;

pub const SCRIPT_ENV: &str = "FINANCE_TRACKER_SCRIPT";
pub const WELCOME_BANNER: &str = "$ Welcome to CLI Finance Tracker. Type 'help' for commands.";

/// Shell-level words handled before the interpreter sees a line.
const EXIT_WORDS: [&str; 2] = ["exit", "quit"];
const VIEW_WORDS: [&str; 2] = ["mode", "gui"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode);

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut line_editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let mut words = context.command_names();
    words.extend(EXIT_WORDS);
    words.extend(VIEW_WORDS);
    line_editor.set_helper(Some(CommandHelper::new(words)));
    line_editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output::echo_input(WELCOME_BANNER);
    print_summary(context);

    while context.running {
        match context.view {
            ViewMode::Console => run_console(context, &mut line_editor)?,
            ViewMode::Editor => match editor::run(context)? {
                EditorExit::SwitchToConsole => {
                    context.view = ViewMode::Console;
                    print_summary(context);
                }
                EditorExit::Quit => context.running = false,
            },
        }
    }

    Ok(())
}

/// Reads console lines until the view changes or the session ends.
fn run_console(
    context: &mut ShellContext,
    line_editor: &mut Editor<CommandHelper, DefaultHistory>,
) -> Result<(), CliError> {
    loop {
        let prompt = context.prompt();
        match line_editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    line_editor.add_history_entry(trimmed).ok();
                }
                match handle_line(context, &line)? {
                    LoopControl::Continue => {}
                    LoopControl::SwitchView => {
                        context.view = context.view.toggled();
                        return Ok(());
                    }
                    LoopControl::Exit => {
                        context.running = false;
                        return Ok(());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    context.running = false;
                    return Ok(());
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting finance tracker.");
                context.running = false;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    while let Some(line) = read_script_line(&mut reader)? {
        if !context.running {
            break;
        }
        match handle_line(context, &line)? {
            LoopControl::Continue => {}
            LoopControl::SwitchView => {
                output::warning("The editor needs an interactive terminal; showing all transactions.");
                for row in render::history_lines(&context.store) {
                    output::info(row);
                }
            }
            LoopControl::Exit => break,
        }
    }
    Ok(())
}

/// Next newline-terminated line, without its terminator. Bytes that are
/// not UTF-8 are replaced so one bad line cannot end the script.
fn read_script_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut raw = Vec::new();
    if reader.read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    if raw.ends_with(b"\n") {
        raw.pop();
        if raw.ends_with(b"\r") {
            raw.pop();
        }
    }
    let line = match String::from_utf8(raw) {
        Ok(line) => line,
        Err(err) => {
            warn!("script line is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    };
    Ok(Some(line))
}

/// Routes one line: shell words first, everything else to the interpreter.
fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    let word = line.trim().to_lowercase();
    if EXIT_WORDS.contains(&word.as_str()) {
        return Ok(LoopControl::Exit);
    }
    if VIEW_WORDS.contains(&word.as_str()) {
        debug!(from = %context.view, "view toggle requested");
        return Ok(LoopControl::SwitchView);
    }

    let revision = context.store.revision();
    match context.submit(line) {
        Submission::Blank => {}
        Submission::Cleared => {
            if context.mode == CliMode::Interactive {
                clear_screen()?;
                output::echo_input(WELCOME_BANNER);
            }
        }
        Submission::Responded(response) => output::print_response(&response),
    }

    if context.mode == CliMode::Interactive && context.store.revision() != revision {
        print_summary(context);
    }
    Ok(LoopControl::Continue)
}

fn print_summary(context: &ShellContext) {
    output::info(render::summary_line(&context.store.totals()));
}

fn clear_screen() -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_string).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    /// Completes the verb only; arguments are free text.
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let trimmed = prefix.trim_start();
        if trimmed.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }

        let start = prefix.len() - trimmed.len();
        let needle = trimmed.to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}
