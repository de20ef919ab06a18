//! The host workspace seam.
//!
//! This trait abstracts the editing application's pane manager, allowing the
//! sidebar logic to remain pure and testable.

use crate::error::HostError;
use crate::mode::ViewMode;
use crate::state::{CursorPosition, FileInfo, PaneId, PaneInfo, Selection};
use easypaste_events::{Callback, ListenerId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which panes [`HostWorkspace::open_panes`] should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFilter {
    /// Only editable document panes.
    Documents,
    /// Every open pane.
    All,
}

/// Fired when the host's active pane changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusChanged {
    /// Newly active pane, if any.
    pub pane: Option<PaneId>,
}

/// Fired when a file is opened into a pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOpened {
    pub pane: PaneId,
    pub file: FileInfo,
}

/// The editing application, as seen by the sidebar.
///
/// All calls happen on the host's UI loop. Pane ids handed out by the host
/// may go stale at any moment, so every mutating call takes a [`PaneId`] and
/// fails with [`HostError::PaneClosed`] instead of acting on a dead pane.
pub trait HostWorkspace: Send + Sync {
    /// The currently active pane of any kind.
    fn active_pane(&self) -> Option<PaneInfo>;

    /// All open panes matching `filter`, in layout order.
    fn open_panes(&self, filter: PaneFilter) -> Vec<PaneInfo>;

    /// Look up a pane by id. `None` once it has been closed.
    fn pane(&self, id: PaneId) -> Option<PaneInfo> {
        self.open_panes(PaneFilter::All)
            .into_iter()
            .find(|pane| pane.id == id)
    }

    /// Cursor head of the pane's editor.
    fn cursor(&self, pane: PaneId) -> Result<CursorPosition, HostError>;

    /// Current selection of the pane's editor.
    fn selection(&self, pane: PaneId) -> Result<Selection, HostError>;

    /// Collapse the selection to `position`.
    fn set_cursor(&self, pane: PaneId, position: CursorPosition) -> Result<(), HostError>;

    /// Replace the current selection (or insert at the cursor) with `text`.
    fn replace_selection(&self, pane: PaneId, text: &str) -> Result<(), HostError>;

    /// Give keyboard focus to the pane's editor.
    fn focus(&self, pane: PaneId) -> Result<(), HostError>;

    fn pane_mode(&self, pane: PaneId) -> Result<ViewMode, HostError>;

    fn set_pane_mode(&self, pane: PaneId, mode: ViewMode) -> Result<(), HostError>;

    /// Bring a pane into view, expanding its split if collapsed.
    fn reveal_pane(&self, pane: PaneId) -> Result<(), HostError>;

    /// Collapse or expand the side panel hosting the sidebar.
    fn toggle_panel_collapsed(&self);

    /// Show a transient, user-visible message.
    fn show_notice(&self, message: &str);

    fn on_focus_changed(&self, callback: Callback<FocusChanged>) -> ListenerId;

    fn on_file_opened(&self, callback: Callback<FileOpened>) -> ListenerId;

    /// Remove a listener registered through `on_focus_changed` or
    /// `on_file_opened`. Returns `false` for unknown ids.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// Type alias for a shared host reference.
pub type HostRef = Arc<dyn HostWorkspace>;
