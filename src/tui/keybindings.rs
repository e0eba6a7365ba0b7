use crate::tui::action::Action;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Maps KeyEvents to Actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(rename = "bindings")]
    bindings_list: Vec<KeyBinding>,

    #[serde(skip)]
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings_list = vec![
            // Navigation
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            KeyBinding::new("PageUp", Action::PageUp),
            KeyBinding::new("PageDown", Action::PageDown),
            KeyBinding::new("Ctrl+u", Action::PageUp),
            KeyBinding::new("Ctrl+d", Action::PageDown),
            KeyBinding::new("g", Action::GoToTop),
            KeyBinding::new("G", Action::GoToBottom),
            KeyBinding::new("Tab", Action::NextPane),
            // Analysis
            KeyBinding::new("Enter", Action::Confirm),
            KeyBinding::new("w", Action::CycleWeight),
            // Rankings
            KeyBinding::new("a", Action::RankArtists),
            KeyBinding::new("s", Action::RankSongs),
            KeyBinding::new("m", Action::LoadMore),
            // Export
            KeyBinding::new("e", Action::ExportCsv),
            KeyBinding::new("E", Action::ExportXlsx),
            // View
            KeyBinding::new("t", Action::ToggleTheme),
            KeyBinding::new("?", Action::ToggleHelp),
            KeyBinding::new("F1", Action::ToggleHelp),
            // Application
            KeyBinding::new("r", Action::Reset),
            KeyBinding::new("q", Action::Quit),
            KeyBinding::new("Esc", Action::Cancel),
        ];

        let bindings_map = Self::build_map(&bindings_list);

        Self {
            bindings_list,
            bindings_map,
        }
    }
}

impl KeyBindings {
    /// Build hashmap from bindings list
    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| {
                KeyPattern::from_string(&b.key)
                    .ok()
                    .map(|pattern| (pattern, b.action))
            })
            .collect()
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        let pattern = KeyPattern::from_event(key);
        self.bindings_map.get(&pattern).copied()
    }

    /// Load from JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut bindings: KeyBindings = serde_json::from_str(&content)?;
        bindings.bindings_map = Self::build_map(&bindings.bindings_list);
        Ok(bindings)
    }

    /// Save to JSON config file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get all bindings for an action (for help display)
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .map(|b| b.key.clone())
            .collect()
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Parse from string (e.g., "Ctrl+d", "Shift+?", "a")
    pub fn from_string(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split('+').collect();

        let mut modifiers = KeyModifiers::empty();
        let key_part = if parts.len() > 1 {
            for part in &parts[..parts.len() - 1] {
                match part.to_lowercase().as_str() {
                    "ctrl" => modifiers |= KeyModifiers::CONTROL,
                    "alt" => modifiers |= KeyModifiers::ALT,
                    "shift" => modifiers |= KeyModifiers::SHIFT,
                    _ => return Err(format!("Unknown modifier: {}", part)),
                }
            }
            parts[parts.len() - 1]
        } else {
            // Bare uppercase letters and shifted symbols imply Shift
            if s.len() == 1 {
                let ch = s.chars().next().unwrap();
                if ch.is_uppercase() || "!@#$%^&*()_+{}|:\"<>?".contains(ch) {
                    modifiers |= KeyModifiers::SHIFT;
                }
            }
            parts[0]
        };

        // Single characters keep their case: crossterm reports Shift+letter
        // as the uppercase char, so "E" must map to Char('E'), not Char('e').
        let code = if key_part.chars().count() == 1 {
            KeyCode::Char(key_part.chars().next().unwrap())
        } else {
            match key_part.to_lowercase().as_str() {
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "pageup" | "pgup" => KeyCode::PageUp,
                "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "tab" => KeyCode::Tab,
                "backtab" => KeyCode::BackTab,
                "enter" | "return" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "space" => KeyCode::Char(' '),

                s if s.starts_with('f') && s.len() >= 2 && s.len() <= 3 => {
                    match s[1..].parse::<u8>() {
                        Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
                        _ => return Err(format!("Invalid function key: {}", s)),
                    }
                }

                _ => return Err(format!("Unknown key: {}", key_part)),
            }
        };

        // "Shift+e" and "E" are the same binding; store the form crossterm
        // delivers.
        let code = match code {
            KeyCode::Char(c)
                if modifiers.contains(KeyModifiers::SHIFT) && c.is_ascii_alphabetic() =>
            {
                KeyCode::Char(c.to_ascii_uppercase())
            }
            other => other,
        };

        Ok(Self { code, modifiers })
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        parts.push(match self.code {
            KeyCode::Char(c) => c.to_string(),
            other => format!("{:?}", other),
        });
        write!(f, "{}", parts.join("+"))
    }
}
