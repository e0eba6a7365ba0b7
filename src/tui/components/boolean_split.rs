use crate::core::charts::BooleanSplitChart;
use crate::tui::action::Action;
use crate::tui::component::Component;
use crate::tui::components::format_number;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Gauge rendering of a bound [`BooleanSplitChart`]: the true/false split
/// as a filled ratio plus the underlying tallies.
#[derive(Default)]
pub struct BooleanSplitView {
    chart: BooleanSplitChart,
}

impl BooleanSplitView {
    pub fn new() -> Self {
        let mut chart = BooleanSplitChart::default();
        chart.reset();
        Self { chart }
    }

    pub fn update(&mut self, chart: &BooleanSplitChart) {
        self.chart = chart.clone();
    }
}

impl Component for BooleanSplitView {
    fn handle_action(&mut self, _action: Action) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = format!("{} ({})", self.chart.title, self.chart.value_label());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.border_style());

        if self.chart.total() <= 0.0 {
            let placeholder = Paragraph::new("No boolean data")
                .block(block)
                .style(theme.chart_label_style());
            frame.render_widget(placeholder, area);
            return;
        }

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let ratio = self.chart.true_ratio().clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(theme.chart_bar_style().fg(theme.chart_true))
            .ratio(ratio)
            .label(format!("{:.1}% true", ratio * 100.0));
        frame.render_widget(gauge, chunks[0]);

        let tallies = Line::from(vec![
            Span::styled(
                format!("True: {}", format_number(Some(self.chart.true_count), 2)),
                theme.chart_bar_style().fg(theme.chart_true),
            ),
            Span::raw("  "),
            Span::styled(
                format!("False: {}", format_number(Some(self.chart.false_count), 2)),
                theme.chart_bar_style().fg(theme.chart_false),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(tallies).style(theme.normal_style()),
            chunks[1],
        );
    }

    fn name(&self) -> &str {
        "boolean_split"
    }
}
