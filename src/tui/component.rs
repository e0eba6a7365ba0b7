use crate::tui::action::Action;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{layout::Rect, Frame};

/// Base trait for all TUI components
///
/// Interactive panes implement this to get consistent action routing and
/// rendering. Rendering takes the active theme so a toggle restyles every
/// component on the next frame without touching its data.
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was handled and consumed.
    /// Returns Ok(false) if the action was not handled and should propagate.
    fn handle_action(&mut self, action: Action) -> Result<bool>;

    /// Render the component within the given area
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Component name for debugging/logging
    fn name(&self) -> &str;
}

/// Components that can receive keyboard focus
pub trait Focusable: Component {
    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPane {
        name: String,
        focused: bool,
    }

    impl Component for MockPane {
        fn handle_action(&mut self, action: Action) -> Result<bool> {
            Ok(matches!(action, Action::MoveUp | Action::MoveDown))
        }

        fn render(&mut self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}

        fn name(&self) -> &str {
            &self.name
        }
    }

    impl Focusable for MockPane {
        fn is_focused(&self) -> bool {
            self.focused
        }

        fn set_focused(&mut self, focused: bool) {
            self.focused = focused;
        }
    }

    #[test]
    fn test_action_consumption() {
        let mut pane = MockPane {
            name: "mock".to_string(),
            focused: false,
        };
        assert!(pane.handle_action(Action::MoveUp).unwrap());
        assert!(!pane.handle_action(Action::Quit).unwrap());
    }

    #[test]
    fn test_focus_toggling() {
        let mut pane = MockPane {
            name: "mock".to_string(),
            focused: false,
        };
        assert!(!pane.is_focused());
        pane.set_focused(true);
        assert!(pane.is_focused());
        assert_eq!(pane.name(), "mock");
    }
}
