use thiserror::Error;

/// Error type that captures storage and configuration failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
}

/// Shell-level error surfaced by the binary entry point.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Line editor failure: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt failure: {0}")]
    Prompt(#[from] dialoguer::Error),
}
