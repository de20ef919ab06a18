//! In-memory configuration store for tests and demos.

use crate::types::SidebarConfig;
use crate::{ConfigError, ConfigStore, Result};
use easypaste_events::{Callback, ListenerId, Listeners};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    config: SidebarConfig,
    unavailable: bool,
}

/// Holds the configuration in memory and notifies synchronously on `set`.
#[derive(Default)]
pub struct InMemoryConfigStore {
    state: Mutex<State>,
    listeners: Listeners<SidebarConfig>,
}

impl InMemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SidebarConfig) -> Self {
        let store = Self::default();
        store.lock().config = config;
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the configuration and notify subscribers.
    pub fn set(&self, config: SidebarConfig) {
        self.lock().config = config.clone();
        self.listeners.emit(&config);
    }

    /// Make subsequent `load` calls fail, as a broken backend would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load(&self) -> Result<SidebarConfig> {
        let state = self.lock();
        if state.unavailable {
            return Err(ConfigError::Unavailable("store marked unavailable".into()));
        }
        Ok(state.config.clone())
    }

    fn on_config_changed(&self, callback: Callback<SidebarConfig>) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
