//! Reading-mode states and their indicator.

use easypaste_context::ViewMode;
use serde::{Deserialize, Serialize};

/// Hover text of the toggle button.
pub const INDICATOR_TOOLTIP: &str = "Reading Mode Toggle";

/// What the toggle is currently forcing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingModeState {
    /// Panes keep whatever mode they are in.
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "read")]
    ForceRead,
    #[serde(rename = "edit")]
    ForceEdit,
}

impl ReadingModeState {
    /// Next state in the fixed cycle.
    pub fn next(self) -> Self {
        match self {
            ReadingModeState::Default => ReadingModeState::ForceRead,
            ReadingModeState::ForceRead => ReadingModeState::ForceEdit,
            ReadingModeState::ForceEdit => ReadingModeState::Default,
        }
    }

    /// Mode every document should be in, `None` when nothing is forced.
    pub fn forced_mode(self) -> Option<ViewMode> {
        match self {
            ReadingModeState::Default => None,
            ReadingModeState::ForceRead => Some(ViewMode::Previewing),
            ReadingModeState::ForceEdit => Some(ViewMode::Editing),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ReadingModeState::Default => "eye",
            ReadingModeState::ForceRead => "book-open",
            ReadingModeState::ForceEdit => "pencil",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReadingModeState::Default => "default",
            ReadingModeState::ForceRead => "read",
            ReadingModeState::ForceEdit => "edit",
        }
    }
}

impl std::fmt::Display for ReadingModeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual state of the toggle button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeIndicator {
    pub state: ReadingModeState,
    pub icon: String,
    pub tooltip: String,
    /// Hidden when the user turned the icon off in settings.
    pub visible: bool,
}

impl ModeIndicator {
    pub fn new(state: ReadingModeState, visible: bool) -> Self {
        Self {
            state,
            icon: state.icon().to_string(),
            tooltip: INDICATOR_TOOLTIP.to_string(),
            visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        let mut state = ReadingModeState::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            state = state.next();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                ReadingModeState::ForceRead,
                ReadingModeState::ForceEdit,
                ReadingModeState::Default,
            ]
        );
    }

    #[test]
    fn test_forced_modes() {
        assert_eq!(ReadingModeState::Default.forced_mode(), None);
        assert_eq!(ReadingModeState::ForceRead.forced_mode(), Some(ViewMode::Previewing));
        assert_eq!(ReadingModeState::ForceEdit.forced_mode(), Some(ViewMode::Editing));
    }

    #[test]
    fn test_indicator_icons() {
        assert_eq!(ModeIndicator::new(ReadingModeState::Default, true).icon, "eye");
        assert_eq!(ModeIndicator::new(ReadingModeState::ForceRead, true).icon, "book-open");
        assert_eq!(ModeIndicator::new(ReadingModeState::ForceEdit, true).icon, "pencil");
        assert_eq!(ModeIndicator::new(ReadingModeState::Default, false).tooltip, INDICATOR_TOOLTIP);
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&ReadingModeState::ForceRead).unwrap();
        assert_eq!(json, "\"read\"");
        let parsed: ReadingModeState = serde_json::from_str("\"edit\"").unwrap();
        assert_eq!(parsed, ReadingModeState::ForceEdit);
    }
}
