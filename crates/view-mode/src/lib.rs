//! Reading-mode toggle for easy-paste.
//!
//! A three-state machine that forces every open document into editing or
//! previewing, and steps back to [`ReadingModeState::Default`] as soon as
//! the user overrides a forced pane by hand.
//!
//! ```text
//!  Default ──cycle──▶ ForceRead ──cycle──▶ ForceEdit ──cycle──▶ Default
//!                         │                    │
//!                         └── manual override ─┴──▶ Default
//! ```

mod controller;
mod error;
mod state;

pub use controller::{ApplyReport, ReadingModeController, Transition, TransitionCause};
pub use error::ViewModeError;
pub use state::{ModeIndicator, ReadingModeState, INDICATOR_TOOLTIP};
