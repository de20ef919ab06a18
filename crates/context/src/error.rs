//! Error types for host workspace calls.

use crate::state::{CursorPosition, PaneId};
use thiserror::Error;

/// Errors the host can report for a pane operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The pane was closed after it was looked up.
    #[error("{0} is no longer open")]
    PaneClosed(PaneId),

    /// The pane's view has no editor or no edit/preview modes.
    #[error("{pane} has view type `{view_type}` which does not support this operation")]
    UnsupportedPaneView { pane: PaneId, view_type: String },

    /// A cursor position outside the document.
    #[error("position {position} is outside the document in {pane}")]
    PositionOutOfRange { pane: PaneId, position: CursorPosition },

    /// Any other refusal from the host.
    #[error("host rejected the request: {0}")]
    Rejected(String),
}
