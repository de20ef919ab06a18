//! Easy-paste sidebar.
//!
//! Wires the host workspace, the configuration store and the presentation
//! layer together into one [`SidebarContext`]:
//!
//! ```text
//! ┌──────────────┐  focus / file-open  ┌──────────────┐  config changed  ┌─────────────┐
//! │ HostWorkspace│ ──────────────────▶ │  EventQueue  │ ◀─────────────── │ ConfigStore │
//! └──────────────┘                     └──────┬───────┘                  └─────────────┘
//!        ▲                                    │ pump()
//!        │ insert / set mode / focus   ┌──────▼───────┐     emit         ┌─────────────┐
//!        └──────────────────────────── │SidebarContext│ ───────────────▶ │  EventBus   │
//!                                      └──────────────┘                  └─────────────┘
//! ```
//!
//! Host and store callbacks never act directly; they enqueue a
//! [`WorkspaceEvent`] that the next [`SidebarContext::pump`] handles on the
//! UI loop.

mod context;
mod events;
mod queue;

pub use context::SidebarContext;
pub use events::{Inserted, ItemsChanged, ItemsChangedReason, WorkspaceEvent};
pub use queue::{DeferredFocus, EventQueue};

/// View type the sidebar pane registers with the host.
pub const VIEW_TYPE: &str = "my-custom-sidebar-tab";

/// Title of the sidebar pane.
pub const DISPLAY_TEXT: &str = "My Easy Paste for Consistent Documentation";

/// Icon of the sidebar pane and its ribbon button.
pub const ICON: &str = "star";
