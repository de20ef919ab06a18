//! Inbound workspace events and outbound event payloads.

use easypaste_config::SidebarConfig;
use easypaste_context::{CursorPosition, FileOpened, FocusChanged, PaneId};
use easypaste_input::SidebarItem;
use serde::Serialize;

/// Something the host or the store reported, waiting for the next pump.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceEvent {
    FocusChanged(FocusChanged),
    FileOpened(FileOpened),
    ConfigChanged(SidebarConfig),
}

impl WorkspaceEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WorkspaceEvent::FocusChanged(_) => "focus_changed",
            WorkspaceEvent::FileOpened(_) => "file_opened",
            WorkspaceEvent::ConfigChanged(_) => "config_changed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemsChangedReason {
    /// Configuration was saved.
    Config,
    /// A different editor became the insertion target.
    Target,
}

/// Payload of `sidebar:items_changed`.
#[derive(Debug, Clone, Serialize)]
pub struct ItemsChanged {
    pub reason: ItemsChangedReason,
    pub items: Vec<SidebarItem>,
}

/// Payload of `sidebar:inserted`.
#[derive(Debug, Clone, Serialize)]
pub struct Inserted {
    pub pane: PaneId,
    pub chars: usize,
    pub cursor: CursorPosition,
}
