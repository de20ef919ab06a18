//! Integration tests for the config crate.
//!
//! Uses in-memory SQLite for fast, isolated tests and a temp dir where the
//! file on disk matters.

use easypaste_config::{
    ColorItem, ConfigError, ConfigStore, DateItem, DateSet, ListItem, SidebarConfig,
    SqliteConfigStore,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn create_test_config() -> SidebarConfig {
    SidebarConfig {
        date_sets: vec![DateSet {
            title: "today".to_string(),
            description: "Today".to_string(),
            items: vec![
                DateItem {
                    format: "YYYY-MM-DD".to_string(),
                    prefix: String::new(),
                    suffix: String::new(),
                },
                DateItem {
                    format: "hh:mm".to_string(),
                    prefix: "(".to_string(),
                    suffix: ")".to_string(),
                },
            ],
        }],
        list_items: vec![ListItem {
            title: "Status".to_string(),
            description: "Draft marker".to_string(),
            value: "status: draft".to_string(),
        }],
        color_items: vec![ColorItem {
            color: "#1E90FF".to_string(),
            title: "Blue".to_string(),
            description: "Links".to_string(),
        }],
        show_reading_mode_icon: false,
    }
}

// =============================================================================
// Store Initialization Tests
// =============================================================================

mod initialization {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_in_memory() {
        let store = SqliteConfigStore::open_in_memory();
        assert!(store.is_ok(), "Should create in-memory store");
    }

    #[test]
    fn test_open_file_store() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("settings.db");

        let store = SqliteConfigStore::open(&db_path);
        assert!(store.is_ok(), "Should create file-based store");
        assert!(db_path.exists(), "Database file should exist");
    }

    #[tokio::test]
    async fn test_reopen_existing_store() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("settings.db");

        {
            let store = SqliteConfigStore::open(&db_path).unwrap();
            store.save(create_test_config()).await.unwrap();
        }

        {
            let store = SqliteConfigStore::open(&db_path).unwrap();
            let config = store.load().unwrap();
            assert_eq!(config, create_test_config(), "Config should persist after reopen");
        }
    }
}

// =============================================================================
// Persistence Tests
// =============================================================================

mod persistence {
    use super::*;

    #[tokio::test]
    async fn test_save_preserves_order() {
        let store = SqliteConfigStore::open_in_memory().unwrap();
        store.save(create_test_config()).await.unwrap();

        let config = store.load().unwrap();
        let formats: Vec<_> = config.date_sets[0]
            .items
            .iter()
            .map(|item| item.format.as_str())
            .collect();
        assert_eq!(formats, vec!["YYYY-MM-DD", "hh:mm"]);
    }

    #[tokio::test]
    async fn test_update_applies_mutation() {
        let store = SqliteConfigStore::open_in_memory().unwrap();
        store.save(create_test_config()).await.unwrap();

        let updated = store
            .update(|config| config.list_items.clear())
            .await
            .unwrap();

        assert!(updated.list_items.is_empty());
        assert!(store.load().unwrap().list_items.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_row_then_save_recovers() {
        let store = SqliteConfigStore::open_in_memory().unwrap();
        store.write_raw("[]garbage").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Unavailable(_))));

        store.save(SidebarConfig::default()).await.unwrap();
        assert_eq!(store.load().unwrap(), SidebarConfig::default());
    }
}

// =============================================================================
// Change Notification Tests
// =============================================================================

mod notifications {
    use super::*;

    #[tokio::test]
    async fn test_save_notifies_subscribers_after_write() {
        let store = Arc::new(SqliteConfigStore::open_in_memory().unwrap());
        let observed = Arc::new(Mutex::new(None));

        let reader = Arc::clone(&store);
        let slot = Arc::clone(&observed);
        store.on_config_changed(Arc::new(move |config: &SidebarConfig| {
            // The row is already committed when listeners run.
            let persisted = reader.load().unwrap();
            *slot.lock().unwrap() = Some(persisted == *config);
        }));

        store.save(create_test_config()).await.unwrap();

        assert_eq!(*observed.lock().unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_unsubscribed_listener_is_not_called() {
        let store = SqliteConfigStore::open_in_memory().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let id = store.on_config_changed(Arc::new(move |_: &SidebarConfig| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        store.save(SidebarConfig::default()).await.unwrap();
        assert!(store.unsubscribe(id));
        store.save(create_test_config()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
