use crate::cli::command::{CommandContext, CommandResult};
use crate::cli::registry::CommandEntry;
use crate::cli::response::Response;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("clear", "Clear the console history", "clear", handle_clear),
        CommandEntry::new("help", "Show this list of commands", "help", handle_help),
    ]
}

fn handle_clear(context: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    context.log.clear();
    Ok(None)
}

fn handle_help(context: &mut CommandContext<'_>, _args: &[&str]) -> CommandResult {
    let mut lines = vec!["Available Commands:".to_string()];
    lines.extend(
        context
            .registry
            .list()
            .into_iter()
            .map(|entry| format!("- {}: {}", entry.usage, entry.description)),
    );
    Ok(Some(Response::Help(lines)))
}
