//! Terminal front end: the command console, the menu editor and the shell
//! that switches between them.

pub mod command;
pub mod commands;
pub mod editor;
pub mod forms;
pub mod interpreter;
pub mod output;
pub mod registry;
pub mod render;
pub mod response;
pub mod shell_context;
pub mod transcript;
pub mod ui;
pub mod view;
mod shell;

pub use interpreter::{CommandInterpreter, Submission};
pub use response::Response;
pub use shell::{run_cli, SCRIPT_ENV, WELCOME_BANNER};
pub use transcript::SessionLog;
pub use view::ViewMode;
