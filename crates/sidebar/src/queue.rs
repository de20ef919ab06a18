//! Work handed from host callbacks to the UI loop.

use crate::events::WorkspaceEvent;
use easypaste_context::PaneId;
use easypaste_input::FocusScheduler;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// FIFO of pending [`WorkspaceEvent`]s. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<VecDeque<WorkspaceEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<WorkspaceEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, event: WorkspaceEvent) {
        tracing::trace!(kind = event.kind(), "queued workspace event");
        self.lock().push_back(event);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<WorkspaceEvent> {
        self.lock().drain(..).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Focus restorations scheduled for the next pump.
#[derive(Debug, Default)]
pub struct DeferredFocus {
    pending: Mutex<Vec<PaneId>>,
}

impl DeferredFocus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PaneId>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn take(&self) -> Vec<PaneId> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl FocusScheduler for DeferredFocus {
    fn schedule_focus(&self, pane: PaneId) {
        let mut pending = self.lock();
        // Repeated presses on the same editor restore focus once.
        if !pending.contains(&pane) {
            pending.push(pane);
        }
    }
}
