use crate::core::charts::{BooleanSplitChart, HistogramChart};
use crate::core::ranking::{RankingContext, RenderMode};
use crate::core::session::SessionState;
use crate::core::types::{DatasetHandle, ExportFormat, RankingKind, Selection};
use crate::core::view_state::{AnalysisOutcome, NumericStats, ViewState};
use crate::core::DashError;
use crate::services::api::{AnalysisApi, ArtistRow, SongRow};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Severity of a transient user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient, auto-dismissing user notification
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    pub raised_at: Instant,
}

/// Rows currently owning the shared ranking surface.
///
/// Ownership transfers atomically on a full replace only; append pushes into
/// the arm that already owns the surface, so rows of the two kinds can never
/// interleave.
#[derive(Debug, Clone, PartialEq)]
pub enum RankingRows {
    Artists(Vec<ArtistRow>),
    Songs(Vec<SongRow>),
}

impl RankingRows {
    pub fn len(&self) -> usize {
        match self {
            Self::Artists(rows) => rows.len(),
            Self::Songs(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Orchestration layer tying user actions to the remote collaborators.
///
/// Owns the session context, the single-column view state machine, the two
/// chart binders, and the ranking surface. Every remote-call failure is
/// absorbed into a notice; nothing here halts the session.
pub struct Coordinator<A: AnalysisApi> {
    api: A,
    session: SessionState,
    view: ViewState,
    analysis_title: String,
    stats: Option<NumericStats>,
    view_message: Option<String>,
    histogram: HistogramChart,
    boolean_split: BooleanSplitChart,
    rows: Option<RankingRows>,
    notices: Vec<Notice>,
}

const DEFAULT_ANALYSIS_TITLE: &str = "Single Column Analysis";

impl<A: AnalysisApi> Coordinator<A> {
    pub fn new(api: A) -> Self {
        let mut histogram = HistogramChart::default();
        histogram.reset();
        let mut boolean_split = BooleanSplitChart::default();
        boolean_split.reset();

        Self {
            api,
            session: SessionState::new(),
            view: ViewState::Initial,
            analysis_title: DEFAULT_ANALYSIS_TITLE.to_string(),
            stats: None,
            view_message: None,
            histogram,
            boolean_split,
            rows: None,
            notices: Vec::new(),
        }
    }

    // --- Accessors -------------------------------------------------------

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn analysis_title(&self) -> &str {
        &self.analysis_title
    }

    pub fn stats(&self) -> Option<&NumericStats> {
        self.stats.as_ref()
    }

    /// Explanatory message for the Empty/Error views
    pub fn view_message(&self) -> Option<&str> {
        self.view_message.as_deref()
    }

    pub fn histogram(&self) -> &HistogramChart {
        &self.histogram
    }

    pub fn boolean_split(&self) -> &BooleanSplitChart {
        &self.boolean_split
    }

    pub fn ranking_rows(&self) -> Option<&RankingRows> {
        self.rows.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drop notices older than `ttl`; called from the app tick
    pub fn expire_notices(&mut self, ttl: Duration) {
        self.notices.retain(|n| n.raised_at.elapsed() < ttl);
    }

    /// Raise a notice from outside the coordinator (e.g. the export file
    /// write, which the frontend owns)
    pub fn push_notice<S: Into<String>>(&mut self, text: S, level: NoticeLevel) {
        self.notify(text, level);
    }

    fn notify<S: Into<String>>(&mut self, text: S, level: NoticeLevel) {
        self.notices.push(Notice {
            text: text.into(),
            level,
            raised_at: Instant::now(),
        });
    }

    fn notify_error(&mut self, err: &DashError) {
        self.notify(err.to_string(), NoticeLevel::Error);
    }

    // --- Dispatch discipline ---------------------------------------------

    /// Route every outbound call through here so the loading flag is
    /// released on every exit path.
    fn dispatch<T>(&mut self, call: impl FnOnce(&A) -> Result<T, DashError>) -> Result<T, DashError> {
        self.session.set_loading(true);
        let result = call(&self.api);
        self.session.set_loading(false);
        result
    }

    // --- Session lifecycle -----------------------------------------------

    /// Back to the initial state unconditionally
    pub fn reset(&mut self) {
        self.session.reset();
        self.view = ViewState::Initial;
        self.analysis_title = DEFAULT_ANALYSIS_TITLE.to_string();
        self.stats = None;
        self.view_message = None;
        self.histogram.reset();
        self.boolean_split.reset();
        self.rows = None;
    }

    /// Upload a dataset file. Failure triggers a full session reset.
    pub fn upload(&mut self, path: &Path) {
        if self.session.is_loading() {
            let err = DashError::busy();
            self.notify_error(&err);
            return;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !matches!(ext.as_str(), "csv" | "xlsx" | "xls") {
            let err = DashError::Upload(format!(
                "Unsupported file type: .{ext}. Please upload .xlsx, .xls, or .csv"
            ));
            self.notify_error(&err);
            return;
        }

        self.reset();
        let result = self.dispatch(|api| api.upload(path));
        match result {
            Ok(response) => {
                let (handle, columns) = response.into_catalog();
                debug!("uploaded {handle}, {} columns", columns.len());
                self.session.install_dataset(handle, columns);
                self.notify(
                    "File uploaded successfully. Select a column or analyze rankings.",
                    NoticeLevel::Success,
                );
            }
            Err(err) => {
                self.reset();
                self.notify_error(&err);
            }
        }
    }

    // --- Single-column analysis ------------------------------------------

    /// Analyze one column, optionally weighted.
    ///
    /// No-op while loading; skipped entirely when `{column, weight}` equals
    /// the committed selection, so no redundant remote call is issued.
    pub fn analyze_column(&mut self, column_name: &str, weight_column: Option<String>) {
        if self.session.is_loading() {
            return;
        }
        if self.session.dataset().is_none() {
            let err = DashError::no_dataset();
            self.notify_error(&err);
            return;
        }
        let Some(column) = self.session.column(column_name).cloned() else {
            let err = DashError::Precondition(format!(
                "Column \"{column_name}\" is not part of the current dataset."
            ));
            self.notify_error(&err);
            return;
        };

        let target = Selection::new(column, weight_column);
        if self.session.selection() == Some(&target) {
            debug!("selection unchanged, skipping analysis for {}", target.column.name);
            return;
        }

        // Provisional: the UI shows the in-progress label and highlight; the
        // previous committed selection is the rollback point.
        let previous = self.session.selection().cloned();
        self.analysis_title = target.in_progress_label();
        self.view = ViewState::Initial;
        self.view_message = None;

        let dataset = self
            .session
            .dataset()
            .cloned()
            .expect("dataset checked above");
        let epoch = self.session.epoch();
        let column_name = target.column.name.clone();
        let weight = target.weight_column.clone();

        let result = self.dispatch(|api| {
            api.analyze_column(&dataset, &column_name, weight.as_deref())
        });

        if self.session.epoch() != epoch {
            warn!("discarding stale analysis response for {column_name}");
            return;
        }

        match result {
            Ok(outcome) => self.apply_outcome(target, previous, outcome),
            Err(err) => {
                self.fail_analysis(previous, err.to_string());
                self.notify_error(&err);
            }
        }
    }

    /// A changed weight re-analyzes the committed column under the same
    /// idempotence guard.
    pub fn set_weight_column(&mut self, weight_column: Option<String>) {
        let Some(selection) = self.session.selection().cloned() else {
            return;
        };
        if selection.weight_column == weight_column {
            return;
        }
        debug!("weight changed, re-analyzing {}", selection.column.name);
        self.analyze_column(&selection.column.name, weight_column);
    }

    fn apply_outcome(
        &mut self,
        target: Selection,
        previous: Option<Selection>,
        outcome: AnalysisOutcome,
    ) {
        self.view = ViewState::next(&outcome);
        match outcome {
            AnalysisOutcome::Numeric {
                stats,
                histogram,
                weighted_by,
            } => {
                self.session.commit_selection(target.clone());
                self.analysis_title = Self::committed_title(&target, weighted_by.as_deref());
                self.stats = Some(stats);
                self.view_message = None;
                self.histogram
                    .update(&target.column.name, &histogram, weighted_by.as_deref());
                self.boolean_split.reset();
            }
            AnalysisOutcome::Boolean {
                counts,
                weighted_by,
            } => {
                self.session.commit_selection(target.clone());
                self.analysis_title = Self::committed_title(&target, weighted_by.as_deref());
                self.stats = None;
                self.view_message = None;
                self.boolean_split
                    .update(&target.column.name, &counts, weighted_by.as_deref());
                self.histogram.reset();
            }
            AnalysisOutcome::Empty { message } => {
                // The column is committed; there is just nothing to chart.
                self.session.commit_selection(target.clone());
                self.analysis_title = Self::committed_title(&target, None);
                self.stats = None;
                self.histogram.reset();
                self.boolean_split.reset();
                let empty = DashError::EmptyResult(message);
                self.view_message = Some(empty.to_string());
                self.notify(empty.to_string(), NoticeLevel::Info);
            }
            AnalysisOutcome::Failure { message } => {
                self.fail_analysis(previous, message.clone());
                self.notify(
                    format!(
                        "Failed to load data for \"{}\": {message}",
                        target.column.name
                    ),
                    NoticeLevel::Error,
                );
            }
        }
    }

    /// Roll the selection back to its pre-attempt value and enter Error
    fn fail_analysis(&mut self, previous: Option<Selection>, message: String) {
        self.session.rollback_selection(previous);
        self.view = ViewState::Error;
        self.view_message = Some(message);
        self.analysis_title = DEFAULT_ANALYSIS_TITLE.to_string();
        self.stats = None;
        self.histogram.reset();
        self.boolean_split.reset();
    }

    fn committed_title(selection: &Selection, weighted_by: Option<&str>) -> String {
        let base = format!("Single Column Analysis for \"{}\"", selection.column.name);
        match weighted_by {
            Some(w) => format!("{base} (Weighted by {w})"),
            None => base,
        }
    }

    // --- Ranking pagination ----------------------------------------------

    /// Begin (or restart) a ranking. Always a full replace of the surface.
    pub fn start_ranking(&mut self, kind: RankingKind) {
        if self.session.is_loading() {
            return;
        }
        if self.session.dataset().is_none() {
            let err = DashError::no_dataset();
            self.notify_error(&err);
            return;
        }

        // Kind switch invalidates any in-flight response for the old kind.
        if self.session.ranking().map(|c| c.kind) != Some(kind) {
            self.session.bump_epoch();
        }

        let mut ctx = RankingContext::new(kind);
        self.session.set_ranking(ctx.clone());

        let dataset = self
            .session
            .dataset()
            .cloned()
            .expect("dataset checked above");
        let result = self.fetch_page(&dataset, kind, ctx.page_cursor, ctx.page_size);

        match result {
            Ok((rows, total)) => {
                ctx.absorb_page(rows.len(), total);
                self.session.set_ranking(ctx.clone());
                self.rows = Some(rows);
                self.after_page(&ctx, RenderMode::Replace);
            }
            Err(err) => {
                self.session.clear_ranking();
                self.rows = None;
                self.notify_error(&err);
            }
        }
    }

    /// Fetch the next page and append. Quiet no-op when not offerable.
    pub fn load_more(&mut self) {
        if self.session.is_loading() {
            return;
        }
        let Some(ctx) = self.session.ranking().cloned() else {
            return;
        };
        if !ctx.can_load_more() {
            return;
        }

        let dataset = self
            .session
            .dataset()
            .cloned()
            .expect("ranking context implies a dataset");
        let result = self.fetch_page(&dataset, ctx.kind, ctx.page_cursor, ctx.page_size);

        match result {
            Ok((rows, total)) => {
                let mut ctx = ctx;
                ctx.absorb_page(rows.len(), total);
                self.session.set_ranking(ctx.clone());
                self.append_rows(rows);
                self.after_page(&ctx, RenderMode::Append);
            }
            Err(err) => self.notify_error(&err),
        }
    }

    /// Pages are requested in strictly increasing cursor order per kind;
    /// the loading flag serializes overlapping invocations.
    fn fetch_page(
        &mut self,
        dataset: &DatasetHandle,
        kind: RankingKind,
        page: u32,
        page_size: u32,
    ) -> Result<(RankingRows, usize), DashError> {
        match kind {
            RankingKind::Artists => self
                .dispatch(|api| api.artist_page(dataset, page, page_size))
                .map(|p| (RankingRows::Artists(p.artists), p.total_artists)),
            RankingKind::Songs => self
                .dispatch(|api| api.song_page(dataset, page, page_size))
                .map(|p| (RankingRows::Songs(p.songs), p.total_songs)),
        }
    }

    fn append_rows(&mut self, batch: RankingRows) {
        match (&mut self.rows, batch) {
            (Some(RankingRows::Artists(rows)), RankingRows::Artists(batch)) => {
                rows.extend(batch);
            }
            (Some(RankingRows::Songs(rows)), RankingRows::Songs(batch)) => {
                rows.extend(batch);
            }
            // Surface owned by the other kind (or nothing rendered): the
            // append degenerates to a replace.
            (slot, batch) => *slot = Some(batch),
        }
    }

    fn after_page(&mut self, ctx: &RankingContext, mode: RenderMode) {
        if ctx.total_count == 0 {
            let empty = DashError::EmptyResult(format!("No {} ranking data found.", ctx.kind));
            self.notify(empty.to_string(), NoticeLevel::Info);
            return;
        }
        if ctx.is_complete() {
            self.notify(format!("All {} loaded.", ctx.kind), NoticeLevel::Success);
        }
        if mode == RenderMode::Replace {
            self.notify(
                format!("Top {} analysis complete.", ctx.kind),
                NoticeLevel::Success,
            );
        }
    }

    // --- Export -----------------------------------------------------------

    /// Request a ranking export. Returns the suggested download filename and
    /// the binary stream; the caller handles it as a file write, not data.
    pub fn export_ranking(&mut self, format: ExportFormat) -> Option<(String, Vec<u8>)> {
        if self.session.is_loading() {
            let err = DashError::busy();
            self.notify_error(&err);
            return None;
        }
        if self.session.dataset().is_none() {
            let err = DashError::no_dataset();
            self.notify_error(&err);
            return None;
        }
        let Some(ctx) = self.session.ranking().cloned() else {
            let err =
                DashError::Precondition("No ranking data available to export.".to_string());
            self.notify_error(&err);
            return None;
        };

        let dataset = self
            .session
            .dataset()
            .cloned()
            .expect("dataset checked above");
        let result =
            self.dispatch(|api| api.export_ranking(&dataset, ctx.kind, format));

        match result {
            Ok(bytes) => {
                self.notify(
                    format!("Exporting {} as {}...", ctx.kind, format.extension().to_uppercase()),
                    NoticeLevel::Info,
                );
                Some((
                    format!("{}_ranking.{}", ctx.kind, format.extension()),
                    bytes,
                ))
            }
            Err(err) => {
                self.notify_error(&err);
                None
            }
        }
    }
}
