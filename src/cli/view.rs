use std::fmt;

use serde::{Deserialize, Serialize};

/// Which presentation of the ledger the shell is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Line-oriented command console.
    #[default]
    Console,
    /// Menu-driven transaction editor.
    Editor,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Console => ViewMode::Editor,
            ViewMode::Editor => ViewMode::Console,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Console => "console",
            ViewMode::Editor => "editor",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
