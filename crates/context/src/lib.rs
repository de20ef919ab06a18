//! Host workspace awareness for easy-paste.
//!
//! This crate models the editing application the sidebar lives in and keeps
//! track of which editor should receive the next inserted value.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  mode.rs     - ViewMode enum (pure)                         │
//! │  state.rs    - PaneId, PaneInfo, FileInfo, cursor types     │
//! │  provider.rs - HostWorkspace trait + host event payloads    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  tracker.rs - ActiveTargetTracker (focus/open bookkeeping)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  memory.rs - InMemoryWorkspace, a scriptable host           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use easypaste_context::{ActiveTargetTracker, InMemoryWorkspace};
//!
//! let host = InMemoryWorkspace::new();
//! let pane = host.open_document("notes/today.md", "");
//!
//! let mut tracker = ActiveTargetTracker::new();
//! tracker.on_focus_changed(&host);
//! assert_eq!(tracker.resolve(&host).map(|p| p.id), Some(pane));
//! ```

mod error;
mod memory;
mod mode;
mod provider;
mod state;
mod tracker;

pub use error::HostError;
pub use memory::InMemoryWorkspace;
pub use mode::ViewMode;
pub use provider::{FileOpened, FocusChanged, HostRef, HostWorkspace, PaneFilter};
pub use state::{CursorPosition, FileInfo, PaneId, PaneInfo, PaneKind, Selection, DOCUMENT_VIEW_TYPE};
pub use tracker::ActiveTargetTracker;
