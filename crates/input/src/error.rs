//! Error types for rendering and insertion.

use easypaste_context::{HostError, PaneId};
use thiserror::Error;

/// Errors that can occur while inserting a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// No open document could be resolved as the target.
    #[error("no active Markdown editor found to insert value")]
    NoActiveEditor,

    /// The resolved editor closed before the edit landed.
    #[error("{0} closed before the value could be inserted")]
    TargetClosed(PaneId),

    /// Any other refusal from the host.
    #[error("editor rejected the insertion: {0}")]
    Host(HostError),
}

impl From<HostError> for InsertError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::PaneClosed(pane) => InsertError::TargetClosed(pane),
            other => InsertError::Host(other),
        }
    }
}

/// Errors that suppress a single sidebar control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Color is not "#RRGGBB".
    #[error("invalid color `{0}`, expected #RRGGBB")]
    InvalidColor(String),
}
