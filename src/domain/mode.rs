//! Edit/view mode of the active draft

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the active draft is being composed or read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fields are open for changes; a save moves to `Viewing`
    #[default]
    Editing,
    /// Read-only presentation of a stored entry
    Viewing,
}

impl Mode {
    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing)
    }

    /// Heading shown above the draft
    pub fn heading(&self) -> &'static str {
        match self {
            Mode::Editing => "New Reflection",
            Mode::Viewing => "Vault Entry",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Editing => f.write_str("editing"),
            Mode::Viewing => f.write_str("viewing"),
        }
    }
}
