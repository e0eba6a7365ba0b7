use crate::core::view_state::{NumericStats, ViewState};
use crate::tui::action::Action;
use crate::tui::component::Component;
use crate::tui::components::format_number;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Summary-statistics panel for the single-column analysis surface.
///
/// Shows the nine-stat grid for numeric results; in the other view states it
/// renders the state's placeholder or the server-provided message instead.
#[derive(Default)]
pub struct StatsPanel {
    title: String,
    view: ViewState,
    stats: Option<NumericStats>,
    message: Option<String>,
}

impl StatsPanel {
    pub fn new() -> Self {
        Self {
            title: "Single Column Analysis".to_string(),
            ..Self::default()
        }
    }

    pub fn update(
        &mut self,
        title: &str,
        view: ViewState,
        stats: Option<&NumericStats>,
        message: Option<&str>,
    ) {
        self.title = title.to_string();
        self.view = view;
        self.stats = stats.cloned();
        self.message = message.map(str::to_string);
    }

    fn stat_lines(stats: &NumericStats) -> Vec<Line<'static>> {
        let rows = [
            ("Count", stats.count, 0),
            ("Mean", stats.mean, 2),
            ("Std Dev", stats.std, 2),
            ("Variance", stats.variance, 2),
            ("Min", stats.min, 2),
            ("Q1", stats.q1, 2),
            ("Median", stats.median, 2),
            ("Q3", stats.q3, 2),
            ("Max", stats.max, 2),
        ];
        rows.iter()
            .map(|(label, value, decimals)| {
                Line::from(vec![
                    Span::raw(format!("{label:>9}: ")),
                    Span::raw(format_number(*value, *decimals)),
                ])
            })
            .collect()
    }
}

impl Component for StatsPanel {
    fn handle_action(&mut self, _action: Action) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .border_style(theme.border_style());

        let lines = match (&self.view, &self.stats) {
            (ViewState::Numeric, Some(stats)) => Self::stat_lines(stats),
            (ViewState::Boolean, _) => Vec::new(),
            _ => {
                let text = self
                    .message
                    .clone()
                    .or_else(|| self.view.placeholder().map(str::to_string))
                    .unwrap_or_default();
                vec![Line::from(text)]
            }
        };

        let style = if self.view == ViewState::Error {
            theme.error_style()
        } else {
            theme.normal_style()
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(style)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn name(&self) -> &str {
        "stats_panel"
    }
}
