use crate::core::types::{ColumnDescriptor, ColumnType};
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

const PAGE_JUMP: usize = 10;

/// Navigable catalog of the uploaded dataset's columns.
///
/// Moving the cursor never triggers analysis; only a confirm action on the
/// highlighted entry does. The committed column keeps a marker independent
/// of where the cursor currently sits.
pub struct ColumnList {
    columns: Vec<ColumnDescriptor>,
    committed: Option<String>,
    state: ListState,
    focused: bool,
}

impl Default for ColumnList {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnList {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            committed: None,
            state: ListState::default(),
            focused: false,
        }
    }

    /// Replace the catalog; cursor returns to the top
    pub fn set_columns(&mut self, columns: Vec<ColumnDescriptor>) {
        self.state = ListState::default();
        if !columns.is_empty() {
            self.state.select(Some(0));
        }
        self.columns = columns;
        self.committed = None;
    }

    pub fn set_committed(&mut self, committed: Option<String>) {
        self.committed = committed;
    }

    pub fn clear(&mut self) {
        self.columns.clear();
        self.committed = None;
        self.state = ListState::default();
    }

    /// Column under the cursor, if any
    pub fn highlighted(&self) -> Option<&ColumnDescriptor> {
        self.state.selected().and_then(|i| self.columns.get(i))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.columns.is_empty() {
            return;
        }
        let last = self.columns.len() - 1;
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, last as isize) as usize;
        self.state.select(Some(next));
    }

    fn item_line(committed: Option<&str>, column: &ColumnDescriptor) -> Line<'static> {
        let marker = if committed == Some(column.name.as_str()) {
            "● "
        } else {
            "  "
        };
        let type_tag = match column.column_type {
            ColumnType::Numeric => " [num]",
            ColumnType::Boolean => " [bool]",
            ColumnType::Other => "",
        };
        Line::from(vec![
            Span::raw(marker),
            Span::raw(column.name.clone()),
            Span::raw(type_tag),
        ])
    }
}

impl Component for ColumnList {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-(PAGE_JUMP as isize)),
            Action::PageDown => self.move_cursor(PAGE_JUMP as isize),
            Action::GoToTop => {
                if !self.columns.is_empty() {
                    self.state.select(Some(0));
                }
            }
            Action::GoToBottom => {
                if !self.columns.is_empty() {
                    self.state.select(Some(self.columns.len() - 1));
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_style = if self.focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        };
        let block = Block::default()
            .title("Columns")
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.columns.is_empty() {
            let placeholder = List::new(vec![ListItem::new("No dataset loaded")])
                .block(block)
                .style(theme.normal_style());
            frame.render_widget(placeholder, area);
            return;
        }

        let committed = self.committed.as_deref();
        let items: Vec<ListItem> = self
            .columns
            .iter()
            .map(|c| ListItem::new(Self::item_line(committed, c)))
            .collect();

        let list = List::new(items)
            .block(block)
            .style(theme.normal_style())
            .highlight_style(theme.selected_style());

        frame.render_stateful_widget(list, area, &mut self.state);
    }

    fn name(&self) -> &str {
        "column_list"
    }
}

impl Focusable for ColumnList {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
