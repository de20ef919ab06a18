//! Outbound notifications to whatever draws the sidebar.
//!
//! The sidebar never talks to a concrete UI toolkit. The panel renderer
//! implements [`EventBus`] and reacts to the topics in
//! [`crate::event_names`].

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Sink for UI-facing notifications.
pub trait EventBus: Send + Sync {
    /// Deliver `payload` under `topic` (e.g., "sidebar:items_changed").
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Type alias for shared event bus reference.
pub type EventBusRef = Arc<dyn EventBus>;

/// Typed publishing on top of [`EventBus::emit`].
pub trait EventBusExt {
    /// Serialize `payload` and emit it. A payload that fails to serialize
    /// is logged and dropped; notifications never fail the caller.
    fn publish<T: Serialize + ?Sized>(&self, topic: &str, payload: &T);
}

impl<B: EventBus + ?Sized> EventBusExt for B {
    fn publish<T: Serialize + ?Sized>(&self, topic: &str, payload: &T) {
        match serde_json::to_value(payload) {
            Ok(value) => self.emit(topic, value),
            Err(e) => tracing::warn!(topic, error = %e, "dropping unserializable event payload"),
        }
    }
}

/// One notification captured by [`InMemoryEventBus`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Records every notification, for tests and the demo.
#[derive(Default)]
pub struct InMemoryEventBus {
    log: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn log(&self) -> MutexGuard<'_, Vec<EmittedEvent>> {
        self.log.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Everything emitted so far, oldest first.
    pub fn events(&self) -> Vec<EmittedEvent> {
        self.log().clone()
    }

    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.log()
            .iter()
            .filter(|event| event.topic == topic)
            .cloned()
            .collect()
    }

    /// Payload of the newest event on `topic`.
    pub fn last_for(&self, topic: &str) -> Option<serde_json::Value> {
        self.log()
            .iter()
            .rev()
            .find(|event| event.topic == topic)
            .map(|event| event.payload.clone())
    }

    pub fn clear(&self) {
        self.log().clear();
    }

    pub fn len(&self) -> usize {
        self.log().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        tracing::trace!(topic, "captured event");
        self.log().push(EmittedEvent {
            topic: topic.to_owned(),
            payload,
        });
    }
}

/// Drops every notification. For hosts without a visible panel.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, topic: &str, _payload: serde_json::Value) {
        tracing::trace!(topic, "no panel attached, dropping event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Indicator {
        icon: &'static str,
        visible: bool,
    }

    #[test]
    fn test_events_are_grouped_by_topic() {
        let bus = InMemoryEventBus::new();

        bus.emit("sidebar:items_changed", json!({}));
        bus.emit("view_mode:indicator", json!({"icon": "eye"}));
        bus.emit("sidebar:items_changed", json!({}));

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.events_for("sidebar:items_changed").len(), 2);
        assert_eq!(bus.events_for("view_mode:indicator").len(), 1);
        assert!(bus.events_for("sidebar:inserted").is_empty());
    }

    #[test]
    fn test_last_for_returns_latest_payload() {
        let bus = InMemoryEventBus::new();

        bus.emit("view_mode:indicator", json!({"icon": "eye"}));
        bus.emit("view_mode:indicator", json!({"icon": "pencil"}));

        assert_eq!(bus.last_for("view_mode:indicator"), Some(json!({"icon": "pencil"})));
        assert_eq!(bus.last_for("sidebar:inserted"), None);
    }

    #[test]
    fn test_publish_serializes_payload() {
        let bus = InMemoryEventBus::new();

        bus.publish(
            "view_mode:indicator",
            &Indicator {
                icon: "book-open",
                visible: false,
            },
        );

        assert_eq!(
            bus.events(),
            vec![EmittedEvent {
                topic: "view_mode:indicator".into(),
                payload: json!({"icon": "book-open", "visible": false}),
            }]
        );
    }

    #[test]
    fn test_publish_through_shared_ref() {
        let recorder = Arc::new(InMemoryEventBus::new());
        let bus: EventBusRef = recorder.clone();

        bus.publish("sidebar:inserted", &json!({"chars": 3}));
        recorder.clear();
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_null_bus_accepts_anything() {
        NullEventBus.publish("sidebar:items_changed", &vec![1, 2, 3]);
    }
}
