//! Example: Drive the sidebar against a scripted workspace.
//!
//! Run with: cargo run -p easypaste-sidebar --example sidebar_session
//!
//! Settings are kept in a throwaway SQLite file; pass a path as the first
//! argument to keep them between runs.

use easypaste_config::{
    ColorItem, ConfigStoreRef, DateItem, DateSet, ListItem, SidebarConfig, SqliteConfigStore,
};
use easypaste_context::{CursorPosition, HostRef, HostWorkspace, InMemoryWorkspace};
use easypaste_events::{EventBusRef, InMemoryEventBus};
use easypaste_sidebar::{SidebarContext, VIEW_TYPE};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn demo_config() -> SidebarConfig {
    SidebarConfig {
        date_sets: vec![
            DateSet {
                title: "today".to_string(),
                description: "Today".to_string(),
                items: vec![DateItem {
                    format: "YYYY-MM-DD".to_string(),
                    prefix: String::new(),
                    suffix: String::new(),
                }],
            },
            DateSet {
                title: "file_created_at".to_string(),
                description: "Created".to_string(),
                items: vec![DateItem {
                    format: "YYYY-MM-DD hh:mm".to_string(),
                    prefix: "created: ".to_string(),
                    suffix: String::new(),
                }],
            },
        ],
        list_items: vec![ListItem {
            title: "Status".to_string(),
            description: "Front matter status".to_string(),
            value: "status: draft".to_string(),
        }],
        color_items: vec![ColorItem {
            color: "#1E90FF".to_string(),
            title: "Link blue".to_string(),
            description: "Brand accent".to_string(),
        }],
        show_reading_mode_icon: true,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,easypaste=debug")),
        )
        .init();

    let scratch = tempfile::tempdir()?;
    let db_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| scratch.path().join("settings.db"));

    println!("=== Easy Paste Sidebar Example ===");
    println!("Settings: {}\n", db_path.display());

    let store = Arc::new(SqliteConfigStore::open(&db_path)?);
    let host = Arc::new(InMemoryWorkspace::new());
    let bus = Arc::new(InMemoryEventBus::new());

    let mut sidebar = SidebarContext::attach(
        host.clone() as HostRef,
        store.clone() as ConfigStoreRef,
        bus.clone() as EventBusRef,
    );

    store.save(demo_config()).await?;
    sidebar.pump();

    // The user opens a note, then clicks into the sidebar.
    let panel = host.add_panel(VIEW_TYPE);
    let note = host.open_document("journal.md", "# Journal\n\n");
    host.set_cursor(note, CursorPosition::new(2, 0))?;
    host.activate(panel);
    sidebar.pump();

    println!("Items:");
    let items = sidebar.items();
    for item in &items {
        println!("  {:40} -> {:?}", item.title, item.value);
    }

    if let Some(status) = items.iter().find(|item| item.value.starts_with("status")) {
        let result = sidebar.press(status)?;
        sidebar.pump();
        println!("\nInserted {} chars, cursor now at {}", result.chars_inserted, result.cursor);
    }
    println!("Document:\n{}", host.text(note).unwrap_or_default());

    println!("\nReading mode:");
    for _ in 0..3 {
        let (transition, report) = sidebar.cycle_view_mode();
        println!(
            "  {:7} -> {:7} | icon: {:9} | applied to {} pane(s)",
            transition.from.to_string(),
            transition.to.to_string(),
            sidebar.indicator().icon,
            report.applied.len()
        );
    }

    println!("\nEvents emitted: {}", bus.len());
    sidebar.shutdown();
    println!("Done.");
    Ok(())
}
