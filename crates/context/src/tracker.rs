//! Tracks which editor should receive the next inserted value.
//!
//! Clicking a sidebar control moves host focus to the sidebar, so "the
//! active pane" at insertion time is usually the sidebar itself. The tracker
//! remembers the last document the user was working in and re-validates it
//! against the host on every lookup.

use crate::provider::{HostWorkspace, PaneFilter};
use crate::state::{PaneId, PaneInfo};

/// Remembers the most recently observed document pane.
#[derive(Debug, Clone, Default)]
pub struct ActiveTargetTracker {
    last_editor: Option<PaneId>,
}

impl ActiveTargetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pane currently remembered, without checking it is still open.
    pub fn tracked(&self) -> Option<PaneId> {
        self.last_editor
    }

    /// Re-derive the target from the host's active pane.
    ///
    /// Non-document focus (the sidebar, a graph view) keeps the previous
    /// target. Returns `true` when the tracked pane changed.
    pub fn on_focus_changed(&mut self, host: &dyn HostWorkspace) -> bool {
        let active = host.active_pane().map(|pane| pane.id);
        self.on_pane_focused(host, active)
    }

    /// Same as [`Self::on_focus_changed`] for a focus event that names its
    /// pane. Queued events are handled after the fact, so the pane in the
    /// event is used instead of whatever is active now.
    pub fn on_pane_focused(&mut self, host: &dyn HostWorkspace, pane: Option<PaneId>) -> bool {
        let Some(id) = pane else {
            return false;
        };
        match host.pane(id) {
            Some(pane) if pane.is_document() => self.record(pane.id),
            Some(pane) => {
                tracing::trace!(
                    pane = %pane.id,
                    view_type = pane.kind.view_type(),
                    "ignoring focus on non-document pane"
                );
                false
            }
            None => {
                tracing::trace!(pane = %id, "focused pane already closed");
                false
            }
        }
    }

    /// Record a freshly opened file's pane as the candidate target.
    ///
    /// Covers hosts that fire the focus change before the new pane is
    /// reported as active.
    pub fn on_file_opened(&mut self, host: &dyn HostWorkspace, pane: PaneId) -> bool {
        match host.pane(pane) {
            Some(info) if info.is_document() => self.record(info.id),
            _ => false,
        }
    }

    fn record(&mut self, pane: PaneId) -> bool {
        if self.last_editor == Some(pane) {
            return false;
        }
        tracing::debug!(%pane, previous = ?self.last_editor, "active target changed");
        self.last_editor = Some(pane);
        true
    }

    /// Best-effort editor for an insertion, re-validated against the host.
    ///
    /// Order:
    /// 1. The tracked editor, if still open
    /// 2. The host's active pane, if it is a document
    /// 3. The most recently used open document
    pub fn resolve(&self, host: &dyn HostWorkspace) -> Option<PaneInfo> {
        if let Some(id) = self.last_editor {
            match host.pane(id) {
                Some(pane) if pane.is_document() => return Some(pane),
                _ => tracing::debug!(pane = %id, "tracked editor is gone, falling back"),
            }
        }

        if let Some(pane) = host.active_pane().filter(PaneInfo::is_document) {
            return Some(pane);
        }

        host.open_panes(PaneFilter::Documents)
            .into_iter()
            .filter(PaneInfo::is_document)
            .max_by_key(|pane| pane.last_active_ms)
    }

    /// Forget the tracked editor.
    pub fn clear(&mut self) {
        self.last_editor = None;
    }
}
