//! Shared event plumbing for easy-paste.
//!
//! Two directions of traffic flow through this crate:
//!
//! - **Inbound**: the host workspace and the configuration store notify
//!   subscribers through a [`Listeners`] registry. Every subscription returns
//!   a [`ListenerId`] so the owner can tear it down on unload.
//! - **Outbound**: the sidebar publishes UI-facing notifications (items
//!   changed, indicator changed) through the [`EventBus`] trait, keeping the
//!   core testable without a real UI.

mod bus;
mod listeners;

pub use bus::{EmittedEvent, EventBus, EventBusExt, EventBusRef, InMemoryEventBus, NullEventBus};
pub use listeners::{Callback, ListenerId, Listeners};

/// Event names as constants to prevent typos.
pub mod event_names {
    /// The rendered sidebar items are stale and should be re-read.
    pub const ITEMS_CHANGED: &str = "sidebar:items_changed";
    /// A value was inserted into an editor.
    pub const INSERTED: &str = "sidebar:inserted";
    /// The reading-mode indicator changed state or visibility.
    pub const VIEW_MODE_INDICATOR: &str = "view_mode:indicator";
}
