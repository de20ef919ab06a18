//! Sidebar items and text insertion for easy-paste.
//!
//! Turns configured snippets into pressable controls and inserts their
//! values at the live cursor of the editor the user was last working in.
//!
//! # Safety Features
//!
//! - **Stale-target check**: the target editor is re-resolved against the
//!   host right before every edit, never cached across turns
//! - **Per-item rendering**: a malformed entry hides only itself
//! - **Deferred focus**: focus restoration can be pushed to the next event
//!   loop turn through a [`FocusScheduler`]
//!
//! # Example
//!
//! ```ignore
//! use easypaste_input::InsertionEngine;
//!
//! let engine = InsertionEngine::new(None);
//! engine.insert(&host, &tracker, "2024-03-05")?;
//! ```

mod color;
mod controller;
mod error;
mod format;
mod render;

use easypaste_context::PaneId;
use std::sync::Arc;

pub use color::{foreground_for, Foreground, Rgb, LUMINANCE_THRESHOLD};
pub use controller::{InsertResult, InsertionEngine, NO_ACTIVE_EDITOR_NOTICE};
pub use error::{InsertError, RenderError};
pub use format::format_date;
pub use render::{render_items, ItemKind, RenderContext, SidebarItem};

/// Trait for deferring editor focus restoration.
///
/// Implement this to run focus restoration on the host's next event loop
/// turn. Implementations must re-check that the pane is still open when
/// the deferred work runs.
pub trait FocusScheduler: Send + Sync {
    fn schedule_focus(&self, pane: PaneId);
}

/// Type alias for the focus scheduler.
pub type FocusSchedulerRef = Arc<dyn FocusScheduler>;
