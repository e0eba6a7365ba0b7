use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    NextPane,

    // Single-column analysis
    Confirm,
    CycleWeight,

    // Rankings
    RankArtists,
    RankSongs,
    LoadMore,

    // Export
    ExportCsv,
    ExportXlsx,

    // View
    ToggleTheme,
    ToggleHelp,

    // Application
    Reset,
    Quit,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveUp => "Move cursor up",
            Action::MoveDown => "Move cursor down",
            Action::PageUp => "Page up",
            Action::PageDown => "Page down",
            Action::GoToTop => "Go to first row",
            Action::GoToBottom => "Go to last row",
            Action::NextPane => "Focus next pane",
            Action::Confirm => "Analyze highlighted column",
            Action::CycleWeight => "Cycle weighting column",
            Action::RankArtists => "Analyze top artists",
            Action::RankSongs => "Analyze top songs",
            Action::LoadMore => "Load more ranking rows",
            Action::ExportCsv => "Export ranking as CSV",
            Action::ExportXlsx => "Export ranking as XLSX",
            Action::ToggleTheme => "Toggle light/dark theme",
            Action::ToggleHelp => "Toggle help screen",
            Action::Reset => "Reset session",
            Action::Quit => "Quit application",
            Action::Cancel => "Dismiss / cancel",
        }
    }

    /// Get category for grouping in help screen
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MoveUp
            | Action::MoveDown
            | Action::PageUp
            | Action::PageDown
            | Action::GoToTop
            | Action::GoToBottom
            | Action::NextPane => ActionCategory::Navigation,

            Action::Confirm | Action::CycleWeight => ActionCategory::Analysis,

            Action::RankArtists | Action::RankSongs | Action::LoadMore => {
                ActionCategory::Rankings
            }

            Action::ExportCsv | Action::ExportXlsx => ActionCategory::Export,

            Action::ToggleTheme | Action::ToggleHelp => ActionCategory::View,

            Action::Reset | Action::Quit | Action::Cancel => ActionCategory::Application,
        }
    }

    /// Get all possible actions (for validation)
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveUp,
            Action::MoveDown,
            Action::PageUp,
            Action::PageDown,
            Action::GoToTop,
            Action::GoToBottom,
            Action::NextPane,
            Action::Confirm,
            Action::CycleWeight,
            Action::RankArtists,
            Action::RankSongs,
            Action::LoadMore,
            Action::ExportCsv,
            Action::ExportXlsx,
            Action::ToggleTheme,
            Action::ToggleHelp,
            Action::Reset,
            Action::Quit,
            Action::Cancel,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Analysis,
    Rankings,
    Export,
    View,
    Application,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Navigation => write!(f, "Navigation"),
            ActionCategory::Analysis => write!(f, "Analysis"),
            ActionCategory::Rankings => write!(f, "Rankings"),
            ActionCategory::Export => write!(f, "Export"),
            ActionCategory::View => write!(f, "View"),
            ActionCategory::Application => write!(f, "Application"),
        }
    }
}
