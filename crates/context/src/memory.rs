//! Scriptable in-memory host.
//!
//! Behaves like a small markdown editor: panes hold plain text, selections
//! and a view mode. Used by tests and demos to drive the sidebar without a
//! real application.

use crate::error::HostError;
use crate::mode::ViewMode;
use crate::provider::{FileOpened, FocusChanged, HostWorkspace, PaneFilter};
use crate::state::{CursorPosition, FileInfo, PaneId, PaneInfo, PaneKind, Selection};
use chrono::{DateTime, Local};
use easypaste_events::{Callback, ListenerId, Listeners};
use std::sync::{Arc, Mutex, MutexGuard};

enum HostEvent {
    Focus(FocusChanged),
    Opened(FileOpened),
}

struct MemoryPane {
    info: PaneInfo,
    text: String,
    selection: Selection,
    mode: ViewMode,
    supports_modes: bool,
    /// Snapshots taken before each edit, newest last.
    undo: Vec<(String, Selection)>,
}

impl MemoryPane {
    fn editor_guard(&self) -> Result<(), HostError> {
        if self.info.is_document() {
            Ok(())
        } else {
            Err(HostError::UnsupportedPaneView {
                pane: self.info.id,
                view_type: self.info.kind.view_type().to_string(),
            })
        }
    }

    fn offset_of(&self, position: CursorPosition) -> Result<usize, HostError> {
        byte_offset(&self.text, position).ok_or(HostError::PositionOutOfRange {
            pane: self.info.id,
            position,
        })
    }
}

#[derive(Default)]
struct Inner {
    panes: Vec<MemoryPane>,
    active: Option<PaneId>,
    next_id: u64,
    clock: i64,
    notices: Vec<String>,
    panel_collapsed: bool,
    revealed: Vec<PaneId>,
    focused: Option<PaneId>,
}

impl Inner {
    fn pane_mut(&mut self, id: PaneId) -> Result<&mut MemoryPane, HostError> {
        self.panes
            .iter_mut()
            .find(|pane| pane.info.id == id)
            .ok_or(HostError::PaneClosed(id))
    }

    fn add(&mut self, kind: PaneKind, file: Option<FileInfo>, text: &str) -> PaneId {
        self.next_id += 1;
        let id = PaneId(self.next_id);
        self.panes.push(MemoryPane {
            info: PaneInfo {
                id,
                kind,
                file,
                last_active_ms: 0,
            },
            text: text.to_string(),
            selection: Selection::default(),
            mode: ViewMode::Editing,
            supports_modes: true,
            undo: Vec::new(),
        });
        id
    }
}

/// In-memory [`HostWorkspace`].
#[derive(Default)]
pub struct InMemoryWorkspace {
    inner: Mutex<Inner>,
    listeners: Listeners<HostEvent>,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a document pane without firing any event.
    pub fn add_document(&self, path: &str, text: &str) -> PaneId {
        self.add_document_created(path, text, Local::now())
    }

    pub fn add_document_created(&self, path: &str, text: &str, created_at: DateTime<Local>) -> PaneId {
        let file = FileInfo {
            path: path.to_string(),
            created_at,
        };
        self.lock().add(PaneKind::Document, Some(file), text)
    }

    /// Add a non-document pane (e.g., the sidebar itself) without events.
    pub fn add_panel(&self, view_type: &str) -> PaneId {
        self.lock()
            .add(PaneKind::Other(view_type.to_string()), None, "")
    }

    /// Open a document the way the host does: file-open, then focus change.
    pub fn open_document(&self, path: &str, text: &str) -> PaneId {
        self.open_document_created(path, text, Local::now())
    }

    pub fn open_document_created(&self, path: &str, text: &str, created_at: DateTime<Local>) -> PaneId {
        let id = self.add_document_created(path, text, created_at);
        self.emit_file_opened(id);
        self.activate(id);
        id
    }

    /// Make `id` the active pane and fire a focus change.
    pub fn activate(&self, id: PaneId) -> bool {
        {
            let mut inner = self.lock();
            inner.clock += 1;
            let clock = inner.clock;
            match inner.pane_mut(id) {
                Ok(pane) => pane.info.last_active_ms = clock,
                Err(_) => return false,
            }
            inner.active = Some(id);
        }
        self.listeners
            .emit(&HostEvent::Focus(FocusChanged { pane: Some(id) }));
        true
    }

    /// Leave no pane active and fire a focus change.
    pub fn clear_active(&self) {
        self.lock().active = None;
        self.listeners
            .emit(&HostEvent::Focus(FocusChanged { pane: None }));
    }

    /// Fire a file-open event for an existing document pane.
    pub fn emit_file_opened(&self, id: PaneId) -> bool {
        let file = {
            let mut inner = self.lock();
            match inner.pane_mut(id) {
                Ok(pane) => pane.info.file.clone(),
                Err(_) => None,
            }
        };
        match file {
            Some(file) => {
                self.listeners
                    .emit(&HostEvent::Opened(FileOpened { pane: id, file }));
                true
            }
            None => false,
        }
    }

    /// Close a pane. Closing the active pane fires a focus change.
    pub fn close(&self, id: PaneId) -> bool {
        let was_active = {
            let mut inner = self.lock();
            let before = inner.panes.len();
            inner.panes.retain(|pane| pane.info.id != id);
            if inner.panes.len() == before {
                return false;
            }
            if inner.focused == Some(id) {
                inner.focused = None;
            }
            if inner.active == Some(id) {
                inner.active = None;
                true
            } else {
                false
            }
        };
        if was_active {
            self.listeners
                .emit(&HostEvent::Focus(FocusChanged { pane: None }));
        }
        true
    }

    pub fn text(&self, id: PaneId) -> Option<String> {
        self.lock().pane_mut(id).ok().map(|pane| pane.text.clone())
    }

    /// Select a range, as the user would with the mouse.
    pub fn select(&self, id: PaneId, anchor: CursorPosition, head: CursorPosition) -> Result<(), HostError> {
        let mut inner = self.lock();
        let pane = inner.pane_mut(id)?;
        pane.offset_of(anchor)?;
        pane.offset_of(head)?;
        pane.selection = Selection { anchor, head };
        Ok(())
    }

    /// Switch a pane's mode the way a user would, without going through
    /// the sidebar.
    pub fn set_mode_manually(&self, id: PaneId, mode: ViewMode) -> Result<(), HostError> {
        self.set_pane_mode(id, mode)
    }

    /// Make a pane refuse mode changes (e.g., an embedded PDF view).
    pub fn set_supports_modes(&self, id: PaneId, supported: bool) -> bool {
        match self.lock().pane_mut(id) {
            Ok(pane) => {
                pane.supports_modes = supported;
                true
            }
            Err(_) => false,
        }
    }

    /// Revert the last edit in a pane. Returns `false` when nothing to undo.
    pub fn undo(&self, id: PaneId) -> bool {
        let mut inner = self.lock();
        let Ok(pane) = inner.pane_mut(id) else {
            return false;
        };
        match pane.undo.pop() {
            Some((text, selection)) => {
                pane.text = text;
                pane.selection = selection;
                true
            }
            None => false,
        }
    }

    pub fn notices(&self) -> Vec<String> {
        self.lock().notices.clone()
    }

    pub fn is_panel_collapsed(&self) -> bool {
        self.lock().panel_collapsed
    }

    pub fn revealed(&self) -> Vec<PaneId> {
        self.lock().revealed.clone()
    }

    /// Pane whose editor last received keyboard focus.
    pub fn focused(&self) -> Option<PaneId> {
        self.lock().focused
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl HostWorkspace for InMemoryWorkspace {
    fn active_pane(&self) -> Option<PaneInfo> {
        let mut inner = self.lock();
        let id = inner.active?;
        inner.pane_mut(id).ok().map(|pane| pane.info.clone())
    }

    fn open_panes(&self, filter: PaneFilter) -> Vec<PaneInfo> {
        self.lock()
            .panes
            .iter()
            .filter(|pane| match filter {
                PaneFilter::Documents => pane.info.is_document(),
                PaneFilter::All => true,
            })
            .map(|pane| pane.info.clone())
            .collect()
    }

    fn cursor(&self, pane: PaneId) -> Result<CursorPosition, HostError> {
        let mut inner = self.lock();
        let pane = inner.pane_mut(pane)?;
        pane.editor_guard()?;
        Ok(pane.selection.head)
    }

    fn selection(&self, pane: PaneId) -> Result<Selection, HostError> {
        let mut inner = self.lock();
        let pane = inner.pane_mut(pane)?;
        pane.editor_guard()?;
        Ok(pane.selection)
    }

    fn set_cursor(&self, pane: PaneId, position: CursorPosition) -> Result<(), HostError> {
        let mut inner = self.lock();
        let pane = inner.pane_mut(pane)?;
        pane.editor_guard()?;
        pane.offset_of(position)?;
        pane.selection = Selection::collapsed(position);
        Ok(())
    }

    fn replace_selection(&self, pane: PaneId, text: &str) -> Result<(), HostError> {
        let mut inner = self.lock();
        let pane = inner.pane_mut(pane)?;
        pane.editor_guard()?;
        let start = pane.selection.start();
        let from = pane.offset_of(start)?;
        let to = pane.offset_of(pane.selection.end())?;

        pane.undo.push((pane.text.clone(), pane.selection));
        pane.text.replace_range(from..to, text);
        pane.selection = Selection::collapsed(start.advanced_by(text));
        Ok(())
    }

    fn focus(&self, pane: PaneId) -> Result<(), HostError> {
        let mut inner = self.lock();
        inner.pane_mut(pane)?.editor_guard()?;
        inner.focused = Some(pane);
        Ok(())
    }

    fn pane_mode(&self, pane: PaneId) -> Result<ViewMode, HostError> {
        let mut inner = self.lock();
        let pane = inner.pane_mut(pane)?;
        pane.editor_guard()?;
        Ok(pane.mode)
    }

    fn set_pane_mode(&self, pane: PaneId, mode: ViewMode) -> Result<(), HostError> {
        let mut inner = self.lock();
        let pane = inner.pane_mut(pane)?;
        pane.editor_guard()?;
        if !pane.supports_modes {
            return Err(HostError::UnsupportedPaneView {
                pane: pane.info.id,
                view_type: pane.info.kind.view_type().to_string(),
            });
        }
        pane.mode = mode;
        Ok(())
    }

    fn reveal_pane(&self, pane: PaneId) -> Result<(), HostError> {
        let mut inner = self.lock();
        inner.pane_mut(pane)?;
        inner.panel_collapsed = false;
        inner.revealed.push(pane);
        Ok(())
    }

    fn toggle_panel_collapsed(&self) {
        let mut inner = self.lock();
        inner.panel_collapsed = !inner.panel_collapsed;
    }

    fn show_notice(&self, message: &str) {
        self.lock().notices.push(message.to_string());
    }

    fn on_focus_changed(&self, callback: Callback<FocusChanged>) -> ListenerId {
        self.listeners.subscribe(Arc::new(move |event: &HostEvent| {
            if let HostEvent::Focus(focus) = event {
                callback(focus);
            }
        }))
    }

    fn on_file_opened(&self, callback: Callback<FileOpened>) -> ListenerId {
        self.listeners.subscribe(Arc::new(move |event: &HostEvent| {
            if let HostEvent::Opened(opened) = event {
                callback(opened);
            }
        }))
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

/// Byte offset of a line/char position, `None` when out of range.
fn byte_offset(text: &str, position: CursorPosition) -> Option<usize> {
    let mut line_start = 0;
    for (index, line) in text.split('\n').enumerate() {
        if index == position.line {
            return line
                .char_indices()
                .map(|(offset, _)| offset)
                .chain(std::iter::once(line.len()))
                .nth(position.ch)
                .map(|offset| line_start + offset);
        }
        line_start += line.len() + 1;
    }
    None
}
