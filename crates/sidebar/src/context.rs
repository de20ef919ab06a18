//! The sidebar's explicit context object.

use crate::events::{Inserted, ItemsChanged, ItemsChangedReason, WorkspaceEvent};
use crate::queue::{DeferredFocus, EventQueue};
use crate::VIEW_TYPE;
use chrono::{DateTime, Local};
use easypaste_config::{ConfigStoreRef, SidebarConfig};
use easypaste_context::{
    ActiveTargetTracker, FileInfo, HostError, HostRef, HostWorkspace, PaneFilter, PaneId,
};
use easypaste_events::{event_names, EventBusExt, EventBusRef, ListenerId};
use easypaste_input::{
    render_items, FocusSchedulerRef, InsertError, InsertResult, InsertionEngine, RenderContext,
    SidebarItem,
};
use easypaste_view_mode::{ApplyReport, ModeIndicator, ReadingModeController, ReadingModeState, Transition};
use std::sync::Arc;

/// Resolved target pane and the file behind it.
type TargetKey = Option<(PaneId, Option<FileInfo>)>;

fn target_key(tracker: &ActiveTargetTracker, host: &dyn HostWorkspace) -> TargetKey {
    tracker.resolve(host).map(|pane| (pane.id, pane.file))
}

#[derive(Debug, Clone, Copy)]
enum Subscription {
    Host(ListenerId),
    Config(ListenerId),
}

/// Everything the sidebar needs, owned in one place.
///
/// Built with [`SidebarContext::attach`], which registers host and store
/// listeners. Those listeners only enqueue; call [`SidebarContext::pump`]
/// from the UI loop to handle them. [`SidebarContext::shutdown`] (or drop)
/// removes every listener again.
pub struct SidebarContext {
    host: HostRef,
    config: ConfigStoreRef,
    bus: EventBusRef,
    tracker: ActiveTargetTracker,
    target: TargetKey,
    engine: InsertionEngine,
    reading_mode: ReadingModeController,
    queue: EventQueue,
    deferred: Arc<DeferredFocus>,
    subscriptions: Vec<Subscription>,
    shut_down: bool,
}

impl SidebarContext {
    /// Subscribe to the host and the store and seed the target from the
    /// host's current focus.
    pub fn attach(host: HostRef, config: ConfigStoreRef, bus: EventBusRef) -> Self {
        let show_indicator = match config.load() {
            Ok(loaded) => loaded.show_reading_mode_icon,
            Err(e) => {
                tracing::warn!(error = %e, "configuration unavailable at attach");
                SidebarConfig::default().show_reading_mode_icon
            }
        };

        let queue = EventQueue::new();
        let deferred = Arc::new(DeferredFocus::new());
        let mut subscriptions = Vec::with_capacity(3);

        let producer = queue.clone();
        subscriptions.push(Subscription::Host(host.on_focus_changed(Arc::new(
            move |event: &easypaste_context::FocusChanged| {
                producer.push(WorkspaceEvent::FocusChanged(event.clone()));
            },
        ))));

        let producer = queue.clone();
        subscriptions.push(Subscription::Host(host.on_file_opened(Arc::new(
            move |event: &easypaste_context::FileOpened| {
                producer.push(WorkspaceEvent::FileOpened(event.clone()));
            },
        ))));

        let producer = queue.clone();
        subscriptions.push(Subscription::Config(config.on_config_changed(Arc::new(
            move |updated: &SidebarConfig| {
                producer.push(WorkspaceEvent::ConfigChanged(updated.clone()));
            },
        ))));

        let mut tracker = ActiveTargetTracker::new();
        tracker.on_focus_changed(&*host);
        let target = target_key(&tracker, &*host);

        tracing::info!(
            listeners = subscriptions.len(),
            target = ?tracker.tracked(),
            "sidebar attached"
        );

        Self {
            engine: InsertionEngine::new(Some(deferred.clone() as FocusSchedulerRef)),
            reading_mode: ReadingModeController::new(bus.clone(), show_indicator),
            host,
            config,
            bus,
            tracker,
            target,
            queue,
            deferred,
            subscriptions,
            shut_down: false,
        }
    }

    /// Handle queued events in arrival order, then run deferred focus
    /// restoration. Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        if self.shut_down {
            return 0;
        }

        let events = self.queue.drain();
        let handled = events.len();
        for event in events {
            self.dispatch(event);
        }
        self.run_deferred();
        handled
    }

    fn dispatch(&mut self, event: WorkspaceEvent) {
        tracing::trace!(kind = event.kind(), "dispatching workspace event");
        match event {
            WorkspaceEvent::FocusChanged(focus) => {
                let retracked = self.tracker.on_pane_focused(&*self.host, focus.pane);
                self.reading_mode.on_focus_changed(&*self.host, focus.pane);
                self.refresh_target(retracked);
            }
            WorkspaceEvent::FileOpened(opened) => {
                let retracked = self.tracker.on_file_opened(&*self.host, opened.pane);
                let forced = self.reading_mode.on_file_opened(&*self.host, opened.pane);
                tracing::trace!(pane = %opened.pane, forced, "file opened");
                self.refresh_target(retracked);
            }
            WorkspaceEvent::ConfigChanged(updated) => {
                self.reading_mode
                    .set_indicator_visible(updated.show_reading_mode_icon);
                self.publish_items(ItemsChangedReason::Config);
            }
        }
    }

    /// Republish items when the resolved target moved since the last event.
    /// Closing the tracked editor moves it without retracking.
    fn refresh_target(&mut self, retracked: bool) {
        let current = target_key(&self.tracker, &*self.host);
        if retracked || current != self.target {
            self.target = current;
            self.publish_items(ItemsChangedReason::Target);
        }
    }

    fn run_deferred(&self) {
        for pane in self.deferred.take() {
            if self.host.pane(pane).is_none() {
                tracing::debug!(%pane, "editor closed before focus could be restored");
                continue;
            }
            if let Err(e) = self.host.focus(pane) {
                tracing::debug!(%pane, error = %e, "failed to restore focus");
            }
        }
    }

    /// Controls to show right now.
    pub fn items(&self) -> Vec<SidebarItem> {
        self.items_at(Local::now())
    }

    /// Controls as they would render at `now`.
    ///
    /// An unavailable configuration renders nothing.
    pub fn items_at(&self, now: DateTime<Local>) -> Vec<SidebarItem> {
        let config = match self.config.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "configuration unavailable, rendering no items");
                return Vec::new();
            }
        };

        let target = self.tracker.resolve(&*self.host);
        let active_file = target.as_ref().and_then(|pane| pane.file.as_ref());
        render_items(&config, &RenderContext::new(now, active_file))
    }

    /// Insert a control's value into the target editor.
    pub fn press(&self, item: &SidebarItem) -> Result<InsertResult, InsertError> {
        self.insert(&item.value)
    }

    /// Insert `value` at the cursor of the target editor.
    ///
    /// Focus goes back to the editor on the next [`SidebarContext::pump`].
    pub fn insert(&self, value: &str) -> Result<InsertResult, InsertError> {
        let result = self
            .engine
            .insert(&*self.host, &self.tracker, value)?;
        self.bus.publish(
            event_names::INSERTED,
            &Inserted {
                pane: result.pane,
                chars: result.chars_inserted,
                cursor: result.cursor,
            },
        );
        Ok(result)
    }

    /// The reading-mode toggle button was pressed.
    pub fn cycle_view_mode(&mut self) -> (Transition, ApplyReport) {
        self.reading_mode.cycle(&*self.host)
    }

    pub fn view_mode_state(&self) -> ReadingModeState {
        self.reading_mode.state()
    }

    pub fn indicator(&self) -> ModeIndicator {
        self.reading_mode.indicator()
    }

    /// Collapse or expand the panel holding the sidebar.
    pub fn toggle_panel(&self) {
        tracing::debug!("toggling sidebar panel");
        self.host.toggle_panel_collapsed();
    }

    /// Bring the sidebar pane into view. Returns `false` when no sidebar
    /// pane is open.
    pub fn reveal_panel(&self) -> Result<bool, HostError> {
        let Some(pane) = self.sidebar_pane() else {
            tracing::debug!("no sidebar pane to reveal");
            return Ok(false);
        };
        self.host.reveal_pane(pane)?;
        Ok(true)
    }

    fn sidebar_pane(&self) -> Option<PaneId> {
        self.host
            .open_panes(PaneFilter::All)
            .into_iter()
            .find(|pane| pane.kind.view_type() == VIEW_TYPE)
            .map(|pane| pane.id)
    }

    /// Editor the next insertion would currently target.
    pub fn target(&self) -> Option<PaneId> {
        self.tracker.resolve(&*self.host).map(|pane| pane.id)
    }

    /// Events waiting for the next pump.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Remove every listener and drop queued work. Safe to call twice.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        let mut removed = 0;
        for subscription in self.subscriptions.drain(..) {
            let ok = match subscription {
                Subscription::Host(id) => self.host.unsubscribe(id),
                Subscription::Config(id) => self.config.unsubscribe(id),
            };
            if ok {
                removed += 1;
            } else {
                tracing::debug!(?subscription, "listener was already gone");
            }
        }
        self.queue.clear();
        self.deferred.clear();
        self.tracker.clear();

        tracing::info!(removed, "sidebar detached");
    }

    fn publish_items(&self, reason: ItemsChangedReason) {
        let items = self.items();
        tracing::debug!(?reason, count = items.len(), "sidebar items changed");
        self.bus
            .publish(event_names::ITEMS_CHANGED, &ItemsChanged { reason, items });
    }
}

impl Drop for SidebarContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for SidebarContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidebarContext")
            .field("tracker", &self.tracker)
            .field("reading_mode", &self.reading_mode)
            .field("pending_events", &self.queue.len())
            .field("subscriptions", &self.subscriptions.len())
            .field("shut_down", &self.shut_down)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easypaste_config::{InMemoryConfigStore, ListItem};
    use easypaste_context::{CursorPosition, HostWorkspace, InMemoryWorkspace};
    use easypaste_events::InMemoryEventBus;

    struct Fixture {
        host: Arc<InMemoryWorkspace>,
        store: Arc<InMemoryConfigStore>,
        bus: Arc<InMemoryEventBus>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                host: Arc::new(InMemoryWorkspace::new()),
                store: Arc::new(InMemoryConfigStore::new()),
                bus: Arc::new(InMemoryEventBus::new()),
            }
        }

        fn attach(&self) -> SidebarContext {
            SidebarContext::attach(
                self.host.clone() as HostRef,
                self.store.clone() as ConfigStoreRef,
                self.bus.clone() as EventBusRef,
            )
        }
    }

    fn list_config(value: &str) -> SidebarConfig {
        SidebarConfig {
            list_items: vec![ListItem {
                title: "Snippet".into(),
                description: String::new(),
                value: value.into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_callbacks_only_enqueue() {
        let fx = Fixture::new();
        let mut sidebar = fx.attach();

        let pane = fx.host.open_document("a.md", "");
        assert_eq!(sidebar.pending_events(), 2);
        assert_eq!(sidebar.tracker.tracked(), None);

        assert_eq!(sidebar.pump(), 2);
        assert_eq!(sidebar.tracker.tracked(), Some(pane));
        assert_eq!(sidebar.pending_events(), 0);
    }

    #[test]
    fn test_target_survives_focus_on_sidebar() {
        let fx = Fixture::new();
        let panel = fx.host.add_panel(VIEW_TYPE);
        let mut sidebar = fx.attach();

        let pane = fx.host.open_document("a.md", "x");
        fx.host.activate(panel);
        sidebar.pump();

        assert_eq!(sidebar.target(), Some(pane));
    }

    #[test]
    fn test_insert_defers_focus_to_next_pump() {
        let fx = Fixture::new();
        let mut sidebar = fx.attach();
        let pane = fx.host.open_document("a.md", "");
        sidebar.pump();

        sidebar.insert("hello").unwrap();
        assert_eq!(fx.host.focused(), None);
        assert_eq!(fx.host.text(pane).unwrap(), "hello");

        sidebar.pump();
        assert_eq!(fx.host.focused(), Some(pane));

        let inserted = fx.bus.last_for(event_names::INSERTED).unwrap();
        assert_eq!(inserted["chars"], 5);
    }

    #[test]
    fn test_deferred_focus_skips_closed_editor() {
        let fx = Fixture::new();
        let mut sidebar = fx.attach();
        let pane = fx.host.open_document("a.md", "");
        sidebar.pump();

        sidebar.insert("x").unwrap();
        fx.host.close(pane);
        sidebar.pump();

        assert_eq!(fx.host.focused(), None);
    }

    #[test]
    fn test_config_change_publishes_items() {
        let fx = Fixture::new();
        let mut sidebar = fx.attach();

        fx.store.set(list_config("#todo"));
        sidebar.pump();

        let payload = fx.bus.last_for(event_names::ITEMS_CHANGED).unwrap();
        assert_eq!(payload["reason"], "config");
        assert_eq!(payload["items"][0]["value"], "#todo");
    }

    #[test]
    fn test_unavailable_config_renders_nothing() {
        let fx = Fixture::new();
        fx.store.set(list_config("x"));
        let sidebar = fx.attach();

        fx.store.set_unavailable(true);
        assert!(sidebar.items().is_empty());
    }

    #[test]
    fn test_hidden_icon_follows_config() {
        let fx = Fixture::new();
        let mut sidebar = fx.attach();
        assert!(sidebar.indicator().visible);

        fx.store.set(SidebarConfig {
            show_reading_mode_icon: false,
            ..Default::default()
        });
        sidebar.pump();

        assert!(!sidebar.indicator().visible);
    }

    #[test]
    fn test_reveal_and_toggle_panel() {
        let fx = Fixture::new();
        let sidebar = fx.attach();
        assert!(!sidebar.reveal_panel().unwrap());

        let panel = fx.host.add_panel(VIEW_TYPE);
        sidebar.toggle_panel();
        assert!(fx.host.is_panel_collapsed());

        assert!(sidebar.reveal_panel().unwrap());
        assert_eq!(fx.host.revealed(), vec![panel]);
        assert!(!fx.host.is_panel_collapsed());
    }

    #[test]
    fn test_shutdown_is_idempotent_and_runs_on_drop() {
        let fx = Fixture::new();
        let mut sidebar = fx.attach();
        assert_eq!(fx.host.listener_count(), 2);

        sidebar.shutdown();
        sidebar.shutdown();
        assert!(sidebar.is_shut_down());
        assert_eq!(fx.host.listener_count(), 0);

        fx.host.open_document("a.md", "");
        assert_eq!(sidebar.pending_events(), 0);
        assert_eq!(sidebar.pump(), 0);

        let second = fx.attach();
        assert_eq!(fx.host.listener_count(), 2);
        drop(second);
        assert_eq!(fx.host.listener_count(), 0);
    }

    #[test]
    fn test_insert_lands_in_tracked_editor_not_most_recent() {
        let fx = Fixture::new();
        let mut sidebar = fx.attach();
        let first = fx.host.open_document("a.md", "");
        let second = fx.host.add_document("b.md", "");
        sidebar.pump();

        fx.host.set_cursor(second, CursorPosition::new(0, 0)).unwrap();
        sidebar.insert("x").unwrap();

        assert_eq!(fx.host.text(first).unwrap(), "x");
        assert_eq!(fx.host.text(second).unwrap(), "");
    }
}
