//! Turns configuration entries into sidebar controls.
//!
//! Rendering is per item: a broken entry is logged and skipped, its
//! siblings still render.

use crate::color::{Foreground, Rgb};
use crate::format::format_date;
use easypaste_config::{ColorItem, DateItem, DateKeyword, DateSet, ListItem, SidebarConfig};
use easypaste_context::FileInfo;
use chrono::{DateTime, Local};
use serde::Serialize;

/// What kind of control an item is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Date { keyword: DateKeyword },
    List,
    Color { background: String, foreground: Foreground },
}

/// A renderable, pressable sidebar control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Button label.
    pub title: String,
    /// Hover text.
    pub tooltip: String,
    /// Text inserted on press.
    pub value: String,
    pub kind: ItemKind,
}

/// Inputs that vary between renders.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub now: DateTime<Local>,
    /// File of the resolved target editor, if any.
    pub active_file: Option<&'a FileInfo>,
}

impl<'a> RenderContext<'a> {
    pub fn new(now: DateTime<Local>, active_file: Option<&'a FileInfo>) -> Self {
        Self { now, active_file }
    }
}

/// Render every configured item in display order: date sets, list items,
/// then colors.
pub fn render_items(config: &SidebarConfig, ctx: &RenderContext<'_>) -> Vec<SidebarItem> {
    let mut items = Vec::with_capacity(config.item_count());

    for set in &config.date_sets {
        items.extend(render_date_set(set, ctx));
    }
    items.extend(config.list_items.iter().filter_map(render_list_item));
    for color in &config.color_items {
        match render_color_item(color) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!(title = %color.title, error = %e, "skipping color item"),
        }
    }

    tracing::trace!(rendered = items.len(), configured = config.item_count(), "rendered sidebar items");
    items
}

fn render_date_set(set: &DateSet, ctx: &RenderContext<'_>) -> Vec<SidebarItem> {
    let Some(keyword) = set.keyword() else {
        tracing::warn!(title = %set.title, "skipping date set with unknown keyword");
        return Vec::new();
    };

    let when = match keyword {
        DateKeyword::Today => ctx.now,
        DateKeyword::FileCreatedAt => match ctx.active_file {
            Some(file) => file.created_at,
            // Suppressed entirely until a file is active.
            None => return Vec::new(),
        },
    };

    set.items
        .iter()
        .filter_map(|item| render_date_item(keyword, &set.description, item, &when))
        .collect()
}

fn render_date_item(
    keyword: DateKeyword,
    description: &str,
    item: &DateItem,
    when: &DateTime<Local>,
) -> Option<SidebarItem> {
    let value = format!("{}{}{}", item.prefix, format_date(&item.format, when), item.suffix);
    if value.is_empty() {
        return None;
    }
    Some(SidebarItem {
        title: format!("{description} {value}"),
        tooltip: value.clone(),
        value,
        kind: ItemKind::Date { keyword },
    })
}

fn render_list_item(item: &ListItem) -> Option<SidebarItem> {
    if item.value.is_empty() {
        return None;
    }
    Some(SidebarItem {
        title: format!("{}: {}", item.title, item.value),
        tooltip: item.description.clone(),
        value: item.value.clone(),
        kind: ItemKind::List,
    })
}

fn render_color_item(item: &ColorItem) -> Result<SidebarItem, crate::error::RenderError> {
    let rgb = Rgb::parse_hex(&item.color)?;
    Ok(SidebarItem {
        title: item.title.clone(),
        tooltip: item.description.clone(),
        value: item.color.clone(),
        kind: ItemKind::Color {
            background: item.color.clone(),
            foreground: rgb.foreground(),
        },
    })
}
