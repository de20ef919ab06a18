//! The reading-mode controller.
//!
//! Owns the [`ReadingModeState`] and drives it from two inputs: explicit
//! cycles from the toggle button and host workspace observations (focus
//! changes, file opens).

use crate::error::ViewModeError;
use crate::state::{ModeIndicator, ReadingModeState};
use easypaste_context::{HostWorkspace, PaneFilter, PaneId, PaneInfo};
use easypaste_events::{event_names, EventBusExt, EventBusRef};
use serde::Serialize;
use std::collections::HashSet;

/// Why the state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "cause", rename_all = "snake_case")]
pub enum TransitionCause {
    /// The toggle button was pressed.
    Cycle,
    /// The user switched a forced pane's mode by hand.
    ManualOverride { pane: PaneId },
}

/// A state change, for logging and callers that react to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: ReadingModeState,
    pub to: ReadingModeState,
    pub cause: TransitionCause,
}

/// Outcome of forcing a mode onto a set of panes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Panes now in the forced mode.
    pub applied: Vec<PaneId>,
    /// Panes that refused; the rest were still processed.
    pub failed: Vec<ViewModeError>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reading-mode state machine bound to an event bus for its indicator.
pub struct ReadingModeController {
    state: ReadingModeState,
    /// Panes forced under the current state. Reset on every transition.
    forced: HashSet<PaneId>,
    indicator_visible: bool,
    bus: EventBusRef,
}

impl ReadingModeController {
    pub fn new(bus: EventBusRef, indicator_visible: bool) -> Self {
        Self {
            state: ReadingModeState::Default,
            forced: HashSet::new(),
            indicator_visible,
            bus,
        }
    }

    pub fn state(&self) -> ReadingModeState {
        self.state
    }

    pub fn indicator(&self) -> ModeIndicator {
        ModeIndicator::new(self.state, self.indicator_visible)
    }

    /// Show or hide the toggle icon. Publishes the indicator when this
    /// changes visibility.
    pub fn set_indicator_visible(&mut self, visible: bool) {
        if self.indicator_visible == visible {
            return;
        }
        self.indicator_visible = visible;
        tracing::debug!(visible, "reading mode indicator visibility changed");
        self.emit_indicator(true);
    }

    /// Advance to the next state and force its mode onto every open
    /// document.
    pub fn cycle(&mut self, host: &dyn HostWorkspace) -> (Transition, ApplyReport) {
        let transition = Transition {
            from: self.state,
            to: self.state.next(),
            cause: TransitionCause::Cycle,
        };
        self.enter(transition);

        let report = self.apply_to_all_panes(host);
        self.emit_indicator(false);
        (transition, report)
    }

    /// Force the current state's mode onto every open document pane.
    ///
    /// A no-op in [`ReadingModeState::Default`]. Best effort: a pane that
    /// refuses is recorded in the report and the sweep continues.
    pub fn apply_to_all_panes(&mut self, host: &dyn HostWorkspace) -> ApplyReport {
        let mut report = ApplyReport::default();
        if self.state.forced_mode().is_none() {
            return report;
        }

        for pane in host.open_panes(PaneFilter::Documents) {
            match self.apply_to_pane(host, pane.id) {
                Ok(true) => report.applied.push(pane.id),
                Ok(false) => {}
                Err(e) => {
                    log_failure(&e);
                    report.failed.push(e);
                }
            }
        }

        tracing::debug!(
            state = %self.state,
            applied = report.applied.len(),
            failed = report.failed.len(),
            "applied reading mode"
        );
        report
    }

    /// Force the current state's mode onto one pane.
    ///
    /// Returns `Ok(false)` when nothing is forced.
    pub fn apply_to_pane(&mut self, host: &dyn HostWorkspace, pane: PaneId) -> Result<bool, ViewModeError> {
        let Some(mode) = self.state.forced_mode() else {
            return Ok(false);
        };
        host.set_pane_mode(pane, mode)
            .map_err(|source| ViewModeError::Apply { pane, source })?;
        self.forced.insert(pane);
        Ok(true)
    }

    /// Reconcile against the pane named by a focus event.
    ///
    /// If a pane forced under the current state is found in a different
    /// mode, the user overrode it and the controller steps back to
    /// [`ReadingModeState::Default`]. A focused document not yet forced
    /// gets the forced mode instead.
    pub fn on_focus_changed(&mut self, host: &dyn HostWorkspace, focused: Option<PaneId>) -> Option<Transition> {
        let expected = self.state.forced_mode()?;
        let pane = host.pane(focused?).filter(PaneInfo::is_document)?;

        if !self.forced.contains(&pane.id) {
            if let Err(e) = self.apply_to_pane(host, pane.id) {
                log_failure(&e);
            }
            return None;
        }

        match host.pane_mode(pane.id) {
            Ok(actual) if actual != expected => {
                tracing::debug!(pane = %pane.id, %expected, %actual, "forced pane was overridden");
                let transition = Transition {
                    from: self.state,
                    to: ReadingModeState::Default,
                    cause: TransitionCause::ManualOverride { pane: pane.id },
                };
                self.enter(transition);
                self.emit_indicator(false);
                Some(transition)
            }
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(pane = %pane.id, error = %e, "could not read pane mode");
                None
            }
        }
    }

    /// Force the current mode onto a freshly opened document.
    ///
    /// Returns `true` when the pane was forced. A refusing pane is logged
    /// and left alone.
    pub fn on_file_opened(&mut self, host: &dyn HostWorkspace, pane: PaneId) -> bool {
        match self.apply_to_pane(host, pane) {
            Ok(forced) => forced,
            Err(e) => {
                log_failure(&e);
                false
            }
        }
    }

    fn enter(&mut self, transition: Transition) {
        self.state = transition.to;
        self.forced.clear();
        tracing::info!(
            from = %transition.from,
            to = %transition.to,
            cause = ?transition.cause,
            "reading mode changed"
        );
    }

    fn emit_indicator(&self, force: bool) {
        if !self.indicator_visible && !force {
            return;
        }
        self.bus
            .publish(event_names::VIEW_MODE_INDICATOR, &self.indicator());
    }
}

impl std::fmt::Debug for ReadingModeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadingModeController")
            .field("state", &self.state)
            .field("forced", &self.forced.len())
            .field("indicator_visible", &self.indicator_visible)
            .finish()
    }
}

fn log_failure(e: &ViewModeError) {
    if e.is_unsupported() {
        tracing::debug!(pane = %e.pane(), "pane has no reading mode, skipping");
    } else {
        tracing::warn!(pane = %e.pane(), error = %e, "failed to apply reading mode");
    }
}
