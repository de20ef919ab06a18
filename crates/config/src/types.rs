//! Core types for sidebar item definitions.
//!
//! Field names mirror the persisted JSON (camelCase), so a configuration
//! written by older versions loads unchanged.

use serde::{Deserialize, Serialize};

/// Which timestamp a date set formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateKeyword {
    /// The current local time, always available.
    Today,
    /// Creation time of the file in the active editor.
    FileCreatedAt,
}

impl DateKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateKeyword::Today => "today",
            DateKeyword::FileCreatedAt => "file_created_at",
        }
    }

    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "today" => Some(DateKeyword::Today),
            "file_created_at" => Some(DateKeyword::FileCreatedAt),
            _ => None,
        }
    }
}

impl std::fmt::Display for DateKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One date rendering inside a [`DateSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateItem {
    /// Token format, e.g. "YYYY-MM-DD".
    pub format: String,
    pub prefix: String,
    pub suffix: String,
}

/// A group of date items sharing one timestamp source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSet {
    /// Keyword as typed in the settings; see [`DateSet::keyword`].
    pub title: String,

    pub description: String,

    #[serde(rename = "dateList")]
    pub items: Vec<DateItem>,
}

impl DateSet {
    /// Parsed keyword. `None` for anything the sidebar does not understand,
    /// which hides the whole set rather than failing the configuration.
    pub fn keyword(&self) -> Option<DateKeyword> {
        DateKeyword::parse(&self.title)
    }
}

/// A static snippet inserted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListItem {
    pub title: String,
    pub description: String,
    pub value: String,
}

/// A color swatch inserting its hex code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorItem {
    /// Hex color, "#RRGGBB".
    pub color: String,
    pub title: String,
    pub description: String,
}

/// Everything the sidebar renders, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarConfig {
    pub date_sets: Vec<DateSet>,
    pub list_items: Vec<ListItem>,
    pub color_items: Vec<ColorItem>,

    /// Whether the reading-mode indicator is shown.
    pub show_reading_mode_icon: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            date_sets: Vec::new(),
            list_items: Vec::new(),
            color_items: Vec::new(),
            show_reading_mode_icon: true,
        }
    }
}

impl SidebarConfig {
    /// Total number of configured entries across all sequences.
    pub fn item_count(&self) -> usize {
        self.date_sets.iter().map(|set| set.items.len()).sum::<usize>()
            + self.list_items.len()
            + self.color_items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_persisted_shape() {
        let json = r##"{
            "dateSets": [
                {"title": "today", "description": "Today", "dateList": [
                    {"format": "YYYY-MM-DD", "prefix": "[", "suffix": "]"}
                ]}
            ],
            "listItems": [{"title": "Sig", "description": "Signature", "value": "-- me"}],
            "colorItems": [{"color": "#FF0000", "title": "Red", "description": "Alert"}]
        }"##;

        let config: SidebarConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.date_sets[0].keyword(), Some(DateKeyword::Today));
        assert_eq!(config.date_sets[0].items[0].prefix, "[");
        assert_eq!(config.list_items[0].value, "-- me");
        assert_eq!(config.color_items[0].color, "#FF0000");
        assert!(config.show_reading_mode_icon);
        assert_eq!(config.item_count(), 3);
    }

    #[test]
    fn test_missing_fields_default() {
        let config: SidebarConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SidebarConfig::default());

        let set: DateSet = serde_json::from_str(r#"{"title": "today"}"#).unwrap();
        assert!(set.items.is_empty());
    }

    #[test]
    fn test_unknown_keyword_is_not_an_error() {
        let set: DateSet = serde_json::from_str(r#"{"title": "tomorrow"}"#).unwrap();
        assert_eq!(set.keyword(), None);
    }

    #[test]
    fn test_keyword_round_trips_through_str() {
        for keyword in [DateKeyword::Today, DateKeyword::FileCreatedAt] {
            assert_eq!(DateKeyword::parse(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(SidebarConfig::default()).unwrap();
        assert!(value.get("showReadingModeIcon").is_some());
        assert!(value.get("dateSets").is_some());
    }
}
