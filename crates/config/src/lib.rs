//! Sidebar configuration for easy-paste.
//!
//! The sidebar only ever reads configuration. Writers (the settings UI,
//! imports) go through a concrete store, which persists first and then
//! notifies every `on_config_changed` subscriber.

mod memory;
mod sqlite;
mod types;

use easypaste_events::{Callback, ListenerId};
use std::sync::Arc;

pub use memory::InMemoryConfigStore;
pub use sqlite::{SqliteConfigStore, SETTINGS_KEY};
pub use types::{ColorItem, DateItem, DateKeyword, DateSet, ListItem, SidebarConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Stored configuration could not be read or parsed.
    #[error("configuration unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("no data directory on this platform")]
    NoDataDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persistence task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Read side of the configuration, as the sidebar consumes it.
pub trait ConfigStore: Send + Sync {
    /// Current configuration.
    fn load(&self) -> Result<SidebarConfig>;

    /// Called after every persisted change with the new configuration.
    fn on_config_changed(&self, callback: Callback<SidebarConfig>) -> ListenerId;

    fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// Type alias for a shared store reference.
pub type ConfigStoreRef = Arc<dyn ConfigStore>;
