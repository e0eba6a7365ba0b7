use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Process-wide light/dark preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// A theme defines the color scheme for the TUI.
///
/// Chart styling (bars, axes, labels) is read from here on every draw, so a
/// theme swap restyles all charts without touching their bound data.
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    pub name: String,

    // General UI colors
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Table colors
    pub header_fg: Color,
    pub header_bg: Color,
    pub selected_fg: Color,
    pub selected_bg: Color,
    pub row_alt_bg: Color, // For zebra striping

    // Chart colors
    pub chart_bar: Color,
    pub chart_true: Color,
    pub chart_false: Color,
    pub chart_label: Color,

    // Status/feedback colors
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    /// Dark theme
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            name: "Dark".to_string(),
            background: Color::Reset,
            foreground: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            header_fg: Color::Cyan,
            header_bg: Color::Reset,
            selected_fg: Color::Black,
            selected_bg: Color::Cyan,
            row_alt_bg: Color::Rgb(25, 25, 35),
            chart_bar: Color::LightBlue,
            chart_true: Color::Green,
            chart_false: Color::Red,
            chart_label: Color::Gray,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Blue,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            name: "Light".to_string(),
            background: Color::White,
            foreground: Color::Black,
            border: Color::Gray,
            border_focused: Color::Blue,
            header_fg: Color::Blue,
            header_bg: Color::Rgb(240, 240, 240),
            selected_fg: Color::White,
            selected_bg: Color::Blue,
            row_alt_bg: Color::Rgb(250, 250, 250),
            chart_bar: Color::Blue,
            chart_true: Color::Green,
            chart_false: Color::Red,
            chart_label: Color::DarkGray,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Rgb(200, 150, 0),
            info: Color::Blue,
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn alt_row_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.row_alt_bg)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn chart_bar_style(&self) -> Style {
        Style::default().fg(self.chart_bar)
    }

    pub fn chart_label_style(&self) -> Style {
        Style::default().fg(self.chart_label)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: ThemeMode,
}

/// Durable client-local theme preference.
///
/// Precedence at startup: persisted choice > platform-reported preference
/// (the COLORFGBG terminal convention) > light.
#[derive(Debug, Clone)]
pub struct ThemePreference {
    path: PathBuf,
}

impl ThemePreference {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location under the platform config dir
    pub fn resolve(path_override: Option<PathBuf>) -> Self {
        let path = path_override.unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "trackdash")
                .map(|dirs| dirs.config_dir().join("theme.json"))
                .unwrap_or_else(|| PathBuf::from(".trackdash-theme.json"))
        });
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mode to start with, per the precedence rules
    pub fn initial_mode(&self) -> ThemeMode {
        if let Some(stored) = self.load() {
            debug!("using persisted theme preference: {stored:?}");
            return stored;
        }
        if let Some(platform) = Self::platform_preference() {
            return platform;
        }
        ThemeMode::Light
    }

    fn load(&self) -> Option<ThemeMode> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str::<ThemeFile>(&content)
            .ok()
            .map(|f| f.theme)
    }

    /// Written on every toggle
    pub fn persist(&self, mode: ThemeMode) {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(&ThemeFile { theme: mode })?;
            std::fs::write(&self.path, content)
        };
        if let Err(e) = write() {
            tracing::warn!("failed to persist theme preference: {e}");
        }
    }

    /// COLORFGBG is "fg;bg" with bg 0-6 or 8 meaning a dark background
    fn platform_preference() -> Option<ThemeMode> {
        let value = std::env::var("COLORFGBG").ok()?;
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(if bg <= 8 && bg != 7 {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mode_flip() {
        assert_eq!(ThemeMode::Light.flipped(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.flipped(), ThemeMode::Light);
    }

    #[test]
    fn test_themes_differ_only_in_style() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_eq!(light.mode, ThemeMode::Light);
        assert_eq!(dark.mode, ThemeMode::Dark);
        assert_ne!(light.background, dark.background);
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = TempDir::new().unwrap();
        let pref = ThemePreference::new(dir.path().join("nested").join("theme.json"));

        pref.persist(ThemeMode::Dark);
        assert_eq!(pref.initial_mode(), ThemeMode::Dark);

        pref.persist(ThemeMode::Light);
        assert_eq!(pref.initial_mode(), ThemeMode::Light);
    }

    #[test]
    fn test_header_style_is_bold() {
        let theme = Theme::dark();
        assert!(theme.header_style().add_modifier.contains(Modifier::BOLD));
    }
}
