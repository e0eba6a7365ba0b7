use crate::core::types::{ExportFormat, RankingKind};
use crate::core::view_state::ViewState;
use crate::services::api::AnalysisApi;
use crate::services::coordinator::{Coordinator, NoticeLevel};
use crate::tui::components::{
    BooleanSplitView, ColumnList, HistogramView, RankingTable, StatsPanel,
};
use crate::tui::theme::ThemePreference;
use crate::tui::{Action, ActionCategory, Component, Focusable, KeyBindings, Theme};
use color_eyre::Result;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Which pane currently receives navigation actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusPane {
    Columns,
    Rankings,
}

/// Application shell: owns the coordinator and the panes, routes key events,
/// and mirrors coordinator state into the presentational components after
/// every mutation.
pub struct App<A: AnalysisApi> {
    coordinator: Coordinator<A>,

    column_list: ColumnList,
    stats_panel: StatsPanel,
    histogram_view: HistogramView,
    boolean_split_view: BooleanSplitView,
    ranking_table: RankingTable,

    keybindings: KeyBindings,
    theme: Theme,
    theme_pref: ThemePreference,

    focus: FocusPane,
    /// Index into the numeric weight candidates; None means unweighted
    weight_index: Option<usize>,
    /// Identity of the components' current mirrors, used to tell a surface
    /// replace apart from an append
    last_dataset: Option<String>,
    last_ranking: Option<(RankingKind, usize)>,

    show_help: bool,
    should_quit: bool,
    /// Directory export downloads are written into
    export_dir: PathBuf,
}

impl<A: AnalysisApi> App<A> {
    pub fn new(api: A, theme_pref: ThemePreference, export_dir: PathBuf) -> Self {
        let theme = Theme::for_mode(theme_pref.initial_mode());
        let mut column_list = ColumnList::new();
        column_list.set_focused(true);

        Self {
            coordinator: Coordinator::new(api),
            column_list,
            stats_panel: StatsPanel::new(),
            histogram_view: HistogramView::new(),
            boolean_split_view: BooleanSplitView::new(),
            ranking_table: RankingTable::new(),
            keybindings: KeyBindings::default(),
            theme,
            theme_pref,
            focus: FocusPane::Columns,
            weight_index: None,
            last_dataset: None,
            last_ranking: None,
            show_help: false,
            should_quit: false,
            export_dir,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn set_keybindings(&mut self, keybindings: KeyBindings) {
        self.keybindings = keybindings;
    }

    pub fn coordinator(&self) -> &Coordinator<A> {
        &self.coordinator
    }

    /// Upload a dataset file (startup positional or a future file picker)
    pub fn upload(&mut self, path: &Path) {
        self.coordinator.upload(path);
        self.weight_index = None;
        self.sync_components();
    }

    /// Called on every tick of the event loop
    pub fn update(&mut self) {
        self.coordinator.expire_notices(NOTICE_TTL);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        // The help overlay swallows everything except dismissal and quit.
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ToggleHelp | Action::Cancel => self.show_help = false,
                _ => {}
            }
            return Ok(());
        }

        match action {
            Action::Quit => {
                self.should_quit = true;
                return Ok(());
            }
            Action::ToggleHelp => {
                self.show_help = true;
                return Ok(());
            }
            Action::ToggleTheme => {
                let mode = self.theme.mode.flipped();
                self.theme = Theme::for_mode(mode);
                self.theme_pref.persist(mode);
                return Ok(());
            }
            Action::Reset => {
                self.coordinator.reset();
                self.weight_index = None;
                self.sync_components();
                return Ok(());
            }
            Action::NextPane => {
                self.focus = match self.focus {
                    FocusPane::Columns => FocusPane::Rankings,
                    FocusPane::Rankings => FocusPane::Columns,
                };
                self.column_list
                    .set_focused(self.focus == FocusPane::Columns);
                self.ranking_table
                    .set_focused(self.focus == FocusPane::Rankings);
                return Ok(());
            }
            Action::Confirm => {
                if self.focus == FocusPane::Columns {
                    if let Some(column) = self.column_list.highlighted().cloned() {
                        let weight = self.current_weight();
                        self.coordinator.analyze_column(&column.name, weight);
                        self.sync_components();
                    }
                }
                return Ok(());
            }
            Action::CycleWeight => {
                self.cycle_weight();
                return Ok(());
            }
            Action::RankArtists => {
                self.coordinator.start_ranking(RankingKind::Artists);
                self.sync_components();
                return Ok(());
            }
            Action::RankSongs => {
                self.coordinator.start_ranking(RankingKind::Songs);
                self.sync_components();
                return Ok(());
            }
            Action::LoadMore => {
                self.coordinator.load_more();
                self.sync_components();
                return Ok(());
            }
            Action::ExportCsv => {
                self.export(ExportFormat::Csv);
                return Ok(());
            }
            Action::ExportXlsx => {
                self.export(ExportFormat::Xlsx);
                return Ok(());
            }
            Action::Cancel => return Ok(()),
            _ => {}
        }

        // Navigation goes to the focused pane.
        match self.focus {
            FocusPane::Columns => self.column_list.handle_action(action)?,
            FocusPane::Rankings => self.ranking_table.handle_action(action)?,
        };
        Ok(())
    }

    /// Name of the active weighting column, if any
    fn current_weight(&self) -> Option<String> {
        let candidates = self.coordinator.session().weight_candidates();
        self.weight_index
            .and_then(|i| candidates.get(i))
            .map(|c| c.name.clone())
    }

    /// Advance the weight choice: unweighted -> first numeric column -> ...
    /// -> last numeric column -> unweighted. A committed selection is
    /// re-analyzed under the new weight.
    fn cycle_weight(&mut self) {
        let count = self.coordinator.session().weight_candidates().len();
        if count == 0 {
            return;
        }
        self.weight_index = match self.weight_index {
            None => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
        };
        let weight = self.current_weight();
        self.coordinator.set_weight_column(weight);
        self.sync_components();
    }

    fn export(&mut self, format: ExportFormat) {
        let Some((filename, bytes)) = self.coordinator.export_ranking(format) else {
            return;
        };
        let path = self.export_dir.join(&filename);
        match std::fs::write(&path, bytes) {
            Ok(()) => {
                info!("export written to {}", path.display());
                self.coordinator
                    .push_notice(format!("Saved {filename}"), NoticeLevel::Success);
            }
            Err(e) => {
                error!("export write failed: {e}");
                self.coordinator
                    .push_notice(format!("Failed to save {filename}: {e}"), NoticeLevel::Error);
            }
        }
    }

    /// Mirror coordinator state into the presentational components.
    ///
    /// Runs after every coordinator mutation; render itself never reaches
    /// back into the coordinator.
    fn sync_components(&mut self) {
        let session = self.coordinator.session();

        // Column catalog: rebuild only when the dataset identity changed.
        let dataset = session.dataset().map(|d| d.as_str().to_string());
        if dataset != self.last_dataset {
            match session.dataset() {
                Some(_) => self.column_list.set_columns(session.columns().to_vec()),
                None => self.column_list.clear(),
            }
            self.last_dataset = dataset;
        }
        self.column_list
            .set_committed(session.selection().map(|s| s.column.name.clone()));

        self.stats_panel.update(
            self.coordinator.analysis_title(),
            self.coordinator.view(),
            self.coordinator.stats(),
            self.coordinator.view_message(),
        );
        self.histogram_view.update(self.coordinator.histogram());
        self.boolean_split_view
            .update(self.coordinator.boolean_split());

        // Ranking surface: a shrink or kind change is a replace, growth is
        // an append (cursor and stripes continue in place).
        match (self.coordinator.ranking_rows(), session.ranking()) {
            (Some(rows), Some(ctx)) => {
                let loaded = rows.len();
                let replace = match self.last_ranking {
                    Some((kind, prev)) => kind != ctx.kind || loaded < prev,
                    None => true,
                };
                if replace {
                    self.ranking_table.replace(ctx.kind, rows.clone(), ctx);
                } else {
                    self.ranking_table.extend(rows.clone(), ctx);
                }
                self.last_ranking = Some((ctx.kind, loaded));
            }
            _ => {
                self.ranking_table.clear();
                self.last_ranking = None;
            }
        }
    }

    // --- Rendering --------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
            .split(rows[0]);

        self.column_list.render(frame, columns[0], &self.theme);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(12),
                Constraint::Percentage(40),
                Constraint::Min(8),
            ])
            .split(columns[1]);

        self.stats_panel.render(frame, right[0], &self.theme);
        match self.coordinator.view() {
            ViewState::Boolean => {
                self.boolean_split_view.render(frame, right[1], &self.theme)
            }
            _ => self.histogram_view.render(frame, right[1], &self.theme),
        }
        self.ranking_table.render(frame, right[2], &self.theme);

        self.render_status_line(frame, rows[1]);

        if self.show_help {
            self.render_help(frame, area);
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let line = if self.coordinator.session().is_loading() {
            Line::from(Span::styled("Working...", self.theme.info_style()))
        } else if let Some(notice) = self.coordinator.notices().last() {
            let style = match notice.level {
                NoticeLevel::Success => self.theme.success_style(),
                NoticeLevel::Info => self.theme.info_style(),
                NoticeLevel::Error => self.theme.error_style(),
            };
            Line::from(Span::styled(notice.text.clone(), style))
        } else {
            let weight = self
                .current_weight()
                .unwrap_or_else(|| "none".to_string());
            Line::from(Span::styled(
                format!("Weight: {weight}  |  ? for help"),
                self.theme.normal_style(),
            ))
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let popup = Self::centered_rect(56, 80, area);
        frame.render_widget(Clear, popup);

        let mut lines: Vec<Line> = Vec::new();
        for category in [
            ActionCategory::Navigation,
            ActionCategory::Analysis,
            ActionCategory::Rankings,
            ActionCategory::Export,
            ActionCategory::View,
            ActionCategory::Application,
        ] {
            lines.push(Line::from(Span::styled(
                category.to_string(),
                self.theme.header_style(),
            )));
            for action in Action::all()
                .into_iter()
                .filter(|a| a.category() == category)
            {
                let keys = self.keybindings.get_keys_for_action(action).join(", ");
                lines.push(Line::from(vec![
                    Span::raw(format!("  {keys:<14}")),
                    Span::raw(action.description()),
                ]));
            }
            lines.push(Line::from(""));
        }

        let help = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_style(self.theme.focused_border_style()),
            )
            .style(self.theme.normal_style());
        frame.render_widget(help, popup);
    }

    fn centered_rect(percent_w: u16, percent_h: u16, area: Rect) -> Rect {
        let width = (area.width * percent_w) / 100;
        let height = (area.height * percent_h) / 100;
        Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DatasetHandle;
    use crate::core::view_state::{AnalysisOutcome, Histogram, NumericStats};
    use crate::core::DashError;
    use crate::services::api::{
        AnalysisApi, ArtistPage, ArtistRow, SongPage, UploadResponse,
    };
    use crossterm::event::{KeyCode, KeyModifiers};
    use tempfile::TempDir;

    struct StubApi;

    impl AnalysisApi for StubApi {
        fn upload(&self, _path: &Path) -> Result<UploadResponse, DashError> {
            Ok(serde_json::from_str(
                r#"{"filename":"tracks.csv","columns":[
                    {"name":"age","type":"int"},
                    {"name":"popularity","type":"float"},
                    {"name":"active","type":"bool"}
                ]}"#,
            )
            .unwrap())
        }

        fn analyze_column(
            &self,
            _dataset: &DatasetHandle,
            _column: &str,
            _weight: Option<&str>,
        ) -> Result<AnalysisOutcome, DashError> {
            Ok(AnalysisOutcome::Numeric {
                stats: NumericStats {
                    mean: Some(30.0),
                    ..Default::default()
                },
                histogram: Histogram {
                    labels: vec!["0-10".to_string()],
                    values: vec![4.0],
                },
                weighted_by: None,
            })
        }

        fn artist_page(
            &self,
            _dataset: &DatasetHandle,
            page: u32,
            page_size: u32,
        ) -> Result<ArtistPage, DashError> {
            let start = (page - 1) * page_size;
            let artists = (start..(start + page_size).min(25))
                .map(|i| ArtistRow {
                    rank: i + 1,
                    artist: Some(format!("Artist {}", i + 1)),
                    top_songs_info: None,
                    avg_popularity: Some(80.0),
                    avg_loudness: Some(-5.0),
                    score: Some(0.9),
                })
                .collect();
            Ok(ArtistPage {
                artists,
                total_artists: 25,
            })
        }

        fn song_page(
            &self,
            _dataset: &DatasetHandle,
            _page: u32,
            _page_size: u32,
        ) -> Result<SongPage, DashError> {
            Ok(SongPage {
                songs: Vec::new(),
                total_songs: 0,
            })
        }

        fn export_ranking(
            &self,
            _dataset: &DatasetHandle,
            _kind: RankingKind,
            _format: ExportFormat,
        ) -> Result<Vec<u8>, DashError> {
            Ok(b"rank,artist\n".to_vec())
        }
    }

    fn test_app() -> (App<StubApi>, TempDir) {
        let dir = TempDir::new().unwrap();
        let pref = ThemePreference::new(dir.path().join("theme.json"));
        let app = App::new(StubApi, pref, dir.path().to_path_buf());
        (app, dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_key() {
        let (mut app, _dir) = test_app();
        assert!(!app.should_quit());
        app.handle_key_event(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_upload_populates_column_list() {
        let (mut app, _dir) = test_app();
        app.upload(Path::new("tracks.csv"));

        assert_eq!(app.coordinator().session().columns().len(), 3);
        assert_eq!(app.column_list.highlighted().unwrap().name, "age");
    }

    #[test]
    fn test_confirm_analyzes_highlighted_column() {
        let (mut app, _dir) = test_app();
        app.upload(Path::new("tracks.csv"));

        app.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.coordinator().view(), ViewState::Numeric);
        assert_eq!(
            app.coordinator()
                .session()
                .selection()
                .unwrap()
                .column
                .name,
            "age"
        );
    }

    #[test]
    fn test_weight_cycle_wraps_to_unweighted() {
        let (mut app, _dir) = test_app();
        app.upload(Path::new("tracks.csv"));

        // Two numeric candidates: age, popularity.
        app.cycle_weight();
        assert_eq!(app.current_weight().as_deref(), Some("age"));
        app.cycle_weight();
        assert_eq!(app.current_weight().as_deref(), Some("popularity"));
        app.cycle_weight();
        assert_eq!(app.current_weight(), None);
    }

    #[test]
    fn test_ranking_append_grows_table() {
        let (mut app, _dir) = test_app();
        app.upload(Path::new("tracks.csv"));

        app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ranking_table.loaded(), 10);

        app.handle_key_event(key(KeyCode::Char('m'))).unwrap();
        assert_eq!(app.ranking_table.loaded(), 20);
    }

    #[test]
    fn test_export_writes_file() {
        let (mut app, dir) = test_app();
        app.upload(Path::new("tracks.csv"));
        app.handle_key_event(key(KeyCode::Char('a'))).unwrap();

        app.export(ExportFormat::Csv);

        let path = dir.path().join("artists_ranking.csv");
        assert_eq!(std::fs::read(path).unwrap(), b"rank,artist\n");
    }

    #[test]
    fn test_theme_toggle_persists() {
        let (mut app, dir) = test_app();
        let initial = app.theme().mode;
        app.handle_key_event(key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.theme().mode, initial.flipped());

        let pref = ThemePreference::new(dir.path().join("theme.json"));
        assert_eq!(pref.initial_mode(), initial.flipped());
    }

    #[test]
    fn test_help_overlay_swallows_actions() {
        let (mut app, _dir) = test_app();
        app.upload(Path::new("tracks.csv"));
        app.handle_key_event(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT))
            .unwrap();
        assert!(app.show_help);

        // Ranking keys are inert while help is open.
        app.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert!(app.coordinator().ranking_rows().is_none());

        app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(!app.show_help);
    }
}
