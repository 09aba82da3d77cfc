pub mod session;
pub mod transactions;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(transactions::definitions());
    commands.extend(session::definitions());
    commands
}

/// Registry holding every console verb in help order.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for entry in all_definitions() {
        registry.register(entry);
    }
    registry
}
