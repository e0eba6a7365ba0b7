use crate::core::ranking::RankingContext;
use crate::core::types::RankingKind;
use crate::services::coordinator::RankingRows;
use crate::services::api::{ArtistRow, SongRow};
use crate::tui::action::Action;
use crate::tui::component::{Component, Focusable};
use crate::tui::components::format_number;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const PAGE_JUMP: usize = 10;

/// The shared ranking surface: one table, owned by whichever kind was
/// requested last.
///
/// Alternating-row styling comes from each row's global position, so
/// appended pages continue the stripe pattern instead of restarting it.
pub struct RankingTable {
    title: String,
    rows: Option<RankingRows>,
    total: usize,
    more_available: bool,
    state: TableState,
    focused: bool,
}

impl Default for RankingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingTable {
    pub fn new() -> Self {
        Self {
            title: "Rankings".to_string(),
            rows: None,
            total: 0,
            more_available: false,
            state: TableState::default(),
            focused: false,
        }
    }

    /// Full replace: new owner kind, cursor back to the top
    pub fn replace(&mut self, kind: RankingKind, rows: RankingRows, ctx: &RankingContext) {
        self.title = kind.title().to_string();
        self.state = TableState::default();
        if !rows.is_empty() {
            self.state.select(Some(0));
        }
        self.rows = Some(rows);
        self.total = ctx.total_count;
        self.more_available = ctx.can_load_more();
    }

    /// Append render: rows grow in place, cursor and scroll stay put
    pub fn extend(&mut self, rows: RankingRows, ctx: &RankingContext) {
        self.rows = Some(rows);
        self.total = ctx.total_count;
        self.more_available = ctx.can_load_more();
        if self.state.selected().is_none() && self.rows.as_ref().is_some_and(|r| !r.is_empty()) {
            self.state.select(Some(0));
        }
    }

    pub fn clear(&mut self) {
        self.rows = None;
        self.total = 0;
        self.more_available = false;
        self.state = TableState::default();
        self.title = "Rankings".to_string();
    }

    pub fn loaded(&self) -> usize {
        self.rows.as_ref().map_or(0, RankingRows::len)
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.loaded();
        if len == 0 {
            return;
        }
        let current = self.state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.state.select(Some(next));
    }

    fn header(&self) -> Row<'static> {
        let titles: &[&str] = match self.rows {
            Some(RankingRows::Songs(_)) => &[
                "Rank",
                "Title",
                "Artist(s) (Top 50 Rank)",
                "Album",
                "Popularity",
                "Loudness",
                "Score",
            ],
            _ => &[
                "Rank",
                "Artist",
                "Top 50 Songs (Rank)",
                "Avg Popularity",
                "Avg Loudness",
                "Score",
            ],
        };
        Row::new(titles.iter().map(|t| Cell::from(*t)).collect::<Vec<_>>())
    }

    fn widths(&self) -> Vec<Constraint> {
        match self.rows {
            Some(RankingRows::Songs(_)) => vec![
                Constraint::Length(5),
                Constraint::Min(18),
                Constraint::Min(20),
                Constraint::Min(14),
                Constraint::Length(10),
                Constraint::Length(9),
                Constraint::Length(8),
            ],
            _ => vec![
                Constraint::Length(5),
                Constraint::Min(18),
                Constraint::Min(24),
                Constraint::Length(14),
                Constraint::Length(12),
                Constraint::Length(8),
            ],
        }
    }

    fn artist_cells(row: &ArtistRow) -> Vec<Cell<'static>> {
        vec![
            Cell::from(row.rank.to_string()),
            Cell::from(row.artist.clone().unwrap_or_else(|| "N/A".to_string())),
            Cell::from(row.top_songs_info.clone().unwrap_or_else(|| "N/A".to_string())),
            Cell::from(format_number(row.avg_popularity, 1)),
            Cell::from(format_number(row.avg_loudness, 1)),
            Cell::from(format_number(row.score, 3)),
        ]
    }

    fn song_cells(row: &SongRow) -> Vec<Cell<'static>> {
        vec![
            Cell::from(row.rank.to_string()),
            Cell::from(row.name.clone().unwrap_or_else(|| "N/A".to_string())),
            Cell::from(
                row.artist_ranks_info
                    .clone()
                    .or_else(|| row.artists.clone())
                    .unwrap_or_else(|| "N/A".to_string()),
            ),
            Cell::from(row.album.clone().unwrap_or_else(|| "N/A".to_string())),
            Cell::from(format_number(row.popularity, 1)),
            Cell::from(format_number(row.loudness, 1)),
            Cell::from(format_number(row.score, 3)),
        ]
    }

    fn body_rows(&self, theme: &Theme) -> Vec<Row<'static>> {
        let style_for = |global: usize| {
            if RankingContext::is_striped_row(global) {
                theme.alt_row_style()
            } else {
                theme.normal_style()
            }
        };
        match &self.rows {
            Some(RankingRows::Artists(rows)) => rows
                .iter()
                .enumerate()
                .map(|(i, r)| Row::new(Self::artist_cells(r)).style(style_for(i)))
                .collect(),
            Some(RankingRows::Songs(rows)) => rows
                .iter()
                .enumerate()
                .map(|(i, r)| Row::new(Self::song_cells(r)).style(style_for(i)))
                .collect(),
            None => Vec::new(),
        }
    }

    fn footer_text(&self) -> String {
        if self.more_available {
            format!(
                "{} of {} loaded (m to load more)",
                self.loaded(),
                self.total
            )
        } else if self.total > 0 {
            format!("All {} loaded", self.total)
        } else {
            String::new()
        }
    }
}

impl Component for RankingTable {
    fn handle_action(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::MoveUp => self.move_cursor(-1),
            Action::MoveDown => self.move_cursor(1),
            Action::PageUp => self.move_cursor(-(PAGE_JUMP as isize)),
            Action::PageDown => self.move_cursor(PAGE_JUMP as isize),
            Action::GoToTop => {
                if self.loaded() > 0 {
                    self.state.select(Some(0));
                }
            }
            Action::GoToBottom => {
                let len = self.loaded();
                if len > 0 {
                    self.state.select(Some(len - 1));
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
            .title(self.title.clone())
            .title_bottom(self.footer_text())
            .borders(Borders::ALL)
            .border_style(border_style);

        if self.rows.is_none() {
            let placeholder =
                Paragraph::new("Press a for top artists, s for top songs")
                    .block(block)
                    .style(theme.normal_style());
            frame.render_widget(placeholder, area);
            return;
        }

        let table = Table::new(self.body_rows(theme), self.widths())
            .header(self.header().style(theme.header_style()))
            .block(block)
            .row_highlight_style(theme.selected_style());

        frame.render_stateful_widget(table, area, &mut self.state);
    }

    fn name(&self) -> &str {
        "ranking_table"
    }
}

impl Focusable for RankingTable {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
