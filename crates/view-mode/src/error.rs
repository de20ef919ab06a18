use easypaste_context::{HostError, PaneId};
use thiserror::Error;

/// Failure to force a mode onto one pane.
///
/// Never aborts a sweep; collected in [`crate::ApplyReport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewModeError {
    #[error("could not set mode on {pane}: {source}")]
    Apply {
        pane: PaneId,
        #[source]
        source: HostError,
    },
}

impl ViewModeError {
    pub fn pane(&self) -> PaneId {
        match self {
            ViewModeError::Apply { pane, .. } => *pane,
        }
    }

    /// True when the pane simply has no edit/preview modes.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            ViewModeError::Apply {
                source: HostError::UnsupportedPaneView { .. },
                ..
            }
        )
    }
}
