//! SQLite-backed configuration store.

use crate::types::SidebarConfig;
use crate::{ConfigError, ConfigStore, Result};
use easypaste_events::{Callback, ListenerId, Listeners};
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Row key holding the serialized [`SidebarConfig`].
pub const SETTINGS_KEY: &str = "sidebar";

const APP_DIR: &str = "easy-paste";
const DB_FILE: &str = "settings.db";

/// Persists the whole configuration as one JSON value in a `settings` table.
pub struct SqliteConfigStore {
    conn: Arc<Mutex<Connection>>,
    listeners: Listeners<SidebarConfig>,
}

fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|e| e.into_inner())
}

impl SqliteConfigStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Open the store in the platform data directory, creating it if needed.
    pub fn open_default() -> Result<Self> {
        let path = Self::default_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!(path = %path.display(), "opening configuration store");
        Self::open(&path)
    }

    pub fn default_path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join(DB_FILE))
            .ok_or(ConfigError::NoDataDir)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            listeners: Listeners::new(),
        })
    }

    /// Persist `config` and notify subscribers.
    ///
    /// The write runs on the blocking pool so the caller's event loop keeps
    /// rendering. Subscribers are only notified once the row is committed.
    pub async fn save(&self, config: SidebarConfig) -> Result<()> {
        let json = serde_json::to_string(&config)?;
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || -> Result<()> {
            lock(&conn).execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                (SETTINGS_KEY, json),
            )?;
            Ok(())
        })
        .await
        .map_err(|e| ConfigError::Task(e.to_string()))??;

        tracing::debug!(items = config.item_count(), "configuration saved");
        self.listeners.emit(&config);
        Ok(())
    }

    /// Load, mutate and save in one step. Returns the saved configuration.
    pub async fn update<F>(&self, mutate: F) -> Result<SidebarConfig>
    where
        F: FnOnce(&mut SidebarConfig),
    {
        let mut config = self.load()?;
        mutate(&mut config);
        self.save(config.clone()).await?;
        Ok(config)
    }

    /// Overwrite the stored value with raw text. Used to recover from, and
    /// test, hand-edited databases.
    pub fn write_raw(&self, value: &str) -> Result<()> {
        lock(&self.conn).execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            (SETTINGS_KEY, value),
        )?;
        Ok(())
    }
}

impl ConfigStore for SqliteConfigStore {
    fn load(&self) -> Result<SidebarConfig> {
        let stored: Option<String> = lock(&self.conn)
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [SETTINGS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            None => Ok(SidebarConfig::default()),
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                tracing::warn!(error = %e, "stored configuration is corrupt");
                ConfigError::Unavailable(e.to_string())
            }),
        }
    }

    fn on_config_changed(&self, callback: Callback<SidebarConfig>) -> ListenerId {
        self.listeners.subscribe(callback)
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
