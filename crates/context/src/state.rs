//! Pane, file and cursor structures shared with the host.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// View type the host reports for editable markdown documents.
pub const DOCUMENT_VIEW_TYPE: &str = "markdown";

/// Host-assigned identifier of an open pane.
///
/// This is a reference, not ownership: the pane may close at any time and
/// every use must be re-validated against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(pub u64);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane#{}", self.0)
    }
}

/// What a pane is showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneKind {
    /// An editable markdown document.
    Document,
    /// Anything else (sidebars, graph views, settings...), by view type.
    Other(String),
}

impl PaneKind {
    pub fn view_type(&self) -> &str {
        match self {
            PaneKind::Document => DOCUMENT_VIEW_TYPE,
            PaneKind::Other(view_type) => view_type,
        }
    }

    pub fn is_document(&self) -> bool {
        matches!(self, PaneKind::Document)
    }
}

/// The file backing a document pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Vault-relative path (e.g., "journal/2024-03-05.md")
    pub path: String,

    /// Creation timestamp reported by the file system
    pub created_at: DateTime<Local>,
}

/// Snapshot of an open pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneInfo {
    pub id: PaneId,
    pub kind: PaneKind,
    pub file: Option<FileInfo>,

    /// Monotonic "last focused" stamp, larger is more recent
    pub last_active_ms: i64,
}

impl PaneInfo {
    pub fn is_document(&self) -> bool {
        self.kind.is_document()
    }
}

/// Position inside a document, in lines and Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct CursorPosition {
    pub line: usize,
    pub ch: usize,
}

impl CursorPosition {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }

    /// Position right after `text` when it is written starting here.
    pub fn advanced_by(self, text: &str) -> Self {
        match text.rfind('\n') {
            Some(last_newline) => Self {
                line: self.line + text.matches('\n').count(),
                ch: text[last_newline + 1..].chars().count(),
            },
            None => Self {
                line: self.line,
                ch: self.ch + text.chars().count(),
            },
        }
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.ch)
    }
}

/// A selection range; collapsed when `anchor == head`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: CursorPosition,
    pub head: CursorPosition,
}

impl Selection {
    pub fn collapsed(at: CursorPosition) -> Self {
        Self { anchor: at, head: at }
    }

    pub fn start(&self) -> CursorPosition {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> CursorPosition {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}
