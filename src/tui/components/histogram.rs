use crate::core::charts::HistogramChart;
use crate::tui::action::Action;
use crate::tui::component::Component;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    layout::Rect,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Bar-chart rendering of a bound [`HistogramChart`].
///
/// Purely presentational; the data it draws was committed by the
/// coordinator and is restyled (not refetched) on theme changes.
#[derive(Default)]
pub struct HistogramView {
    chart: HistogramChart,
}

impl HistogramView {
    pub fn new() -> Self {
        let mut chart = HistogramChart::default();
        chart.reset();
        Self { chart }
    }

    pub fn update(&mut self, chart: &HistogramChart) {
        self.chart = chart.clone();
    }

    fn bar_width(&self, area: Rect) -> u16 {
        let bars = self.chart.labels.len().max(1) as u16;
        // One cell of gap per bar; floor of 3 keeps labels legible.
        (area.width.saturating_sub(2) / bars).saturating_sub(1).max(3)
    }
}

impl Component for HistogramView {
    fn handle_action(&mut self, _action: Action) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = format!("{} ({})", self.chart.title, self.chart.value_label());
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(theme.border_style());

        if self.chart.is_empty() {
            let placeholder = Paragraph::new("No histogram data")
                .block(block)
                .style(theme.chart_label_style());
            frame.render_widget(placeholder, area);
            return;
        }

        let bars: Vec<Bar> = self
            .chart
            .labels
            .iter()
            .zip(self.chart.values.iter())
            .map(|(label, value)| {
                Bar::default()
                    .label(label.clone().into())
                    .value(value.round().max(0.0) as u64)
                    .style(theme.chart_bar_style())
                    .value_style(theme.chart_label_style())
            })
            .collect();

        let widget = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(self.bar_width(area))
            .bar_gap(1)
            .label_style(theme.chart_label_style());

        frame.render_widget(widget, area);
    }

    fn name(&self) -> &str {
        "histogram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view_state::Histogram;

    #[test]
    fn test_update_rebinds_chart() {
        let mut view = HistogramView::new();
        assert!(view.chart.is_empty());

        let mut chart = HistogramChart::default();
        chart.update(
            "age",
            &Histogram {
                labels: vec!["0-10".to_string()],
                values: vec![4.0],
            },
            None,
        );
        view.update(&chart);
        assert!(!view.chart.is_empty());
        assert_eq!(view.chart.title, "Histogram for \"age\"");
    }

    #[test]
    fn test_bar_width_never_zero() {
        let mut view = HistogramView::new();
        let mut chart = HistogramChart::default();
        chart.update(
            "age",
            &Histogram {
                labels: (0..50).map(|i| i.to_string()).collect(),
                values: vec![1.0; 50],
            },
            None,
        );
        view.update(&chart);
        assert!(view.bar_width(Rect::new(0, 0, 20, 10)) >= 3);
    }
}
