//! Presentation mode of a document pane.
//!
//! Pure domain logic - no I/O, no host dependencies.

use serde::{Deserialize, Serialize};

/// How a document pane presents its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Raw text with a live cursor.
    #[default]
    Editing,

    /// Rendered, read-only presentation.
    Previewing,
}

impl ViewMode {
    /// Returns a human-readable label for the mode.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Editing => "Editing",
            ViewMode::Previewing => "Previewing",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
