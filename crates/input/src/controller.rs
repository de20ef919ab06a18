//! Insertion engine: puts a value at the live cursor of the target editor.

use crate::error::InsertError;
use crate::FocusSchedulerRef;
use easypaste_context::{ActiveTargetTracker, CursorPosition, HostWorkspace, PaneId};

/// Notice shown when nothing can receive the value.
pub const NO_ACTIVE_EDITOR_NOTICE: &str = "No active Markdown editor found to insert value.";

/// Result of an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertResult {
    /// Editor that received the value.
    pub pane: PaneId,
    /// Number of characters inserted.
    pub chars_inserted: usize,
    /// Cursor after the insertion.
    pub cursor: CursorPosition,
    /// Whether focus restoration was handed to the scheduler.
    pub focus_deferred: bool,
}

/// Performs insertions against the resolved target editor.
///
/// Focus restoration goes through the [`crate::FocusScheduler`] when one is
/// configured, so it runs on the next turn of the host's event loop instead
/// of fighting the host's own focus handling.
pub struct InsertionEngine {
    focus_scheduler: Option<FocusSchedulerRef>,
}

impl InsertionEngine {
    /// Create a new engine.
    ///
    /// # Arguments
    ///
    /// * `focus_scheduler` - Defers focus restoration. Pass `None` to focus
    ///   inline right after the edit.
    pub fn new(focus_scheduler: Option<FocusSchedulerRef>) -> Self {
        Self { focus_scheduler }
    }

    /// Insert `value` at the cursor of the resolved target, replacing any
    /// selection, and leave the cursor right after the inserted text.
    ///
    /// # Errors
    ///
    /// - `InsertError::NoActiveEditor` if no document is open; a notice is
    ///   shown and nothing is touched
    /// - `InsertError::TargetClosed` if the editor vanished mid-operation
    /// - `InsertError::Host` for any other host refusal
    pub fn insert(
        &self,
        host: &dyn HostWorkspace,
        tracker: &ActiveTargetTracker,
        value: &str,
    ) -> Result<InsertResult, InsertError> {
        let Some(target) = tracker.resolve(host) else {
            tracing::info!("no editor to insert into");
            host.show_notice(NO_ACTIVE_EDITOR_NOTICE);
            return Err(InsertError::NoActiveEditor);
        };
        let pane = target.id;

        let start = host.selection(pane)?.start();
        let cursor = start.advanced_by(value);

        host.replace_selection(pane, value)?;
        host.set_cursor(pane, cursor)?;

        let focus_deferred = match &self.focus_scheduler {
            Some(scheduler) => {
                scheduler.schedule_focus(pane);
                true
            }
            None => {
                host.focus(pane)?;
                false
            }
        };

        let chars_inserted = value.chars().count();
        tracing::debug!(
            %pane,
            chars = chars_inserted,
            cursor = %cursor,
            focus_deferred,
            "inserted value"
        );

        Ok(InsertResult {
            pane,
            chars_inserted,
            cursor,
            focus_deferred,
        })
    }
}

impl std::fmt::Debug for InsertionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsertionEngine")
            .field("has_focus_scheduler", &self.focus_scheduler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FocusScheduler, FocusSchedulerRef};
    use easypaste_context::InMemoryWorkspace;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: Mutex<Vec<PaneId>>,
    }

    impl FocusScheduler for RecordingScheduler {
        fn schedule_focus(&self, pane: PaneId) {
            self.scheduled.lock().unwrap().push(pane);
        }
    }

    fn tracked(host: &InMemoryWorkspace) -> ActiveTargetTracker {
        let mut tracker = ActiveTargetTracker::new();
        tracker.on_focus_changed(host);
        tracker
    }

    #[test]
    fn test_insert_at_cursor_and_advance() {
        let host = InMemoryWorkspace::new();
        let pane = host.open_document("a.md", "Date: ");
        host.set_cursor(pane, CursorPosition::new(0, 6)).unwrap();

        let engine = InsertionEngine::new(None);
        let result = engine
            .insert(&host, &tracked(&host), "2024-03-05")
            .unwrap();

        assert_eq!(host.text(pane).unwrap(), "Date: 2024-03-05");
        assert_eq!(result.cursor, CursorPosition::new(0, 16));
        assert_eq!(host.cursor(pane).unwrap(), CursorPosition::new(0, 16));
        assert_eq!(result.chars_inserted, 10);
        assert_eq!(host.focused(), Some(pane));
        assert!(!result.focus_deferred);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let host = InMemoryWorkspace::new();
        let pane = host.open_document("a.md", "color: TODO;");
        host.select(pane, CursorPosition::new(0, 11), CursorPosition::new(0, 7))
            .unwrap();

        let engine = InsertionEngine::new(None);
        engine
            .insert(&host, &tracked(&host), "#FF0000")
            .unwrap();

        assert_eq!(host.text(pane).unwrap(), "color: #FF0000;");
        assert_eq!(host.cursor(pane).unwrap(), CursorPosition::new(0, 14));
    }

    #[test]
    fn test_undo_restores_text_and_cursor() {
        let host = InMemoryWorkspace::new();
        let pane = host.open_document("a.md", "ab");
        host.set_cursor(pane, CursorPosition::new(0, 1)).unwrap();

        let engine = InsertionEngine::new(None);
        engine
            .insert(&host, &tracked(&host), "XYZ")
            .unwrap();
        assert!(host.undo(pane));

        assert_eq!(host.text(pane).unwrap(), "ab");
        assert_eq!(host.cursor(pane).unwrap(), CursorPosition::new(0, 1));
    }

    #[test]
    fn test_no_editor_shows_notice_and_does_nothing() {
        let host = InMemoryWorkspace::new();
        let sidebar = host.add_panel("my-custom-sidebar-tab");
        host.activate(sidebar);

        let engine = InsertionEngine::new(None);
        let err = engine
            .insert(&host, &tracked(&host), "x")
            .unwrap_err();

        assert_eq!(err, InsertError::NoActiveEditor);
        assert_eq!(host.notices(), vec![NO_ACTIVE_EDITOR_NOTICE.to_string()]);
    }

    #[test]
    fn test_focus_is_deferred_to_scheduler() {
        let host = InMemoryWorkspace::new();
        let pane = host.open_document("a.md", "");
        let scheduler = Arc::new(RecordingScheduler::default());

        let engine = InsertionEngine::new(Some(scheduler.clone() as FocusSchedulerRef));
        let result = engine
            .insert(&host, &tracked(&host), "x")
            .unwrap();

        assert!(result.focus_deferred);
        assert_eq!(host.focused(), None);
        assert_eq!(*scheduler.scheduled.lock().unwrap(), vec![pane]);
    }

    #[test]
    fn test_multi_line_value_moves_cursor_down() {
        let host = InMemoryWorkspace::new();
        let pane = host.open_document("a.md", "");

        let engine = InsertionEngine::new(None);
        let result = engine
            .insert(&host, &tracked(&host), "---\ntags: x\n")
            .unwrap();

        assert_eq!(result.cursor, CursorPosition::new(2, 0));
        assert_eq!(host.cursor(pane).unwrap(), CursorPosition::new(2, 0));
    }
}
