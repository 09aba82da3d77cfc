use crate::cli::response::Response;

pub const PROMPT_PREFIX: &str = "$";

/// One submitted line and the response it produced, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub input: String,
    pub output: Option<Response>,
}

/// Handle to an entry recorded before its command ran.
///
/// A ticket goes stale once the log is cleared, so output from a command
/// that wiped the log is dropped rather than attached to a fresh log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTicket {
    generation: u64,
    index: usize,
}

/// Append-only record of the console session, emptied only by `clear`.
#[derive(Debug, Default, Clone)]
pub struct SessionLog {
    entries: Vec<TranscriptEntry>,
    generation: u64,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an input line echoed as `$ <line>`, or a bare `$` when blank.
    pub fn record_input(&mut self, line: &str) -> EntryTicket {
        let input = if line.is_empty() {
            PROMPT_PREFIX.to_string()
        } else {
            format!("{PROMPT_PREFIX} {line}")
        };
        self.entries.push(TranscriptEntry {
            input,
            output: None,
        });
        EntryTicket {
            generation: self.generation,
            index: self.entries.len() - 1,
        }
    }

    /// Attaches output to a previously recorded input. Returns `false` when
    /// the ticket no longer refers to a live entry.
    pub fn attach(&mut self, ticket: EntryTicket, response: Response) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match self.entries.get_mut(ticket.index) {
            Some(entry) => {
                entry.output = Some(response);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation += 1;
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Input lines in submission order.
    pub fn history(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.input.as_str()).collect()
    }

    /// Responses in submission order, skipping inputs that produced none.
    pub fn outputs(&self) -> Vec<&Response> {
        self.entries
            .iter()
            .filter_map(|entry| entry.output.as_ref())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_records_bare_prompt() {
        let mut log = SessionLog::new();
        log.record_input("");
        log.record_input("help");
        assert_eq!(log.history(), vec!["$", "$ help"]);
        assert!(log.outputs().is_empty());
    }

    #[test]
    fn stale_ticket_is_ignored_after_clear() {
        let mut log = SessionLog::new();
        let ticket = log.record_input("clear");
        log.clear();
        assert!(!log.attach(ticket, Response::Info("ignored".into())));
        assert!(log.is_empty());
    }

    #[test]
    fn attach_sets_output_on_live_entry() {
        let mut log = SessionLog::new();
        let ticket = log.record_input("balance");
        assert!(log.attach(ticket, Response::Info("ok".into())));
        assert_eq!(log.outputs(), vec![&Response::Info("ok".into())]);
    }
}
