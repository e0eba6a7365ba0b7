//! End-to-end coordinator flows against a recording mock API.

use std::cell::RefCell;
use std::path::Path;

use pretty_assertions::assert_eq;
use trackdash::core::view_state::{AnalysisOutcome, BoolCounts, Histogram, NumericStats};
use trackdash::core::{DashError, DatasetHandle, ExportFormat, RankingKind, ViewState};
use trackdash::services::api::{
    AnalysisApi, ArtistPage, ArtistRow, SongPage, SongRow, UploadResponse,
};
use trackdash::services::{Coordinator, NoticeLevel, RankingRows};

const TOTAL_ARTISTS: usize = 25;
const TOTAL_SONGS: usize = 7;

/// Records every outbound call; serves a 25-artist and 7-song catalog.
struct RecordingApi {
    calls: RefCell<Vec<String>>,
    fail_analysis: bool,
}

impl RecordingApi {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_analysis: false,
        }
    }

    fn failing_analysis() -> Self {
        Self {
            fail_analysis: true,
            ..Self::new()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl AnalysisApi for RecordingApi {
    fn upload(&self, path: &Path) -> Result<UploadResponse, DashError> {
        self.record(format!("upload:{}", path.display()));
        Ok(serde_json::from_str(
            r#"{"filename":"tracks.csv","columns":[
                {"name":"age","type":"int"},
                {"name":"popularity","type":"float"},
                {"name":"explicit","type":"bool"},
                {"name":"album","type":"object"}
            ]}"#,
        )
        .unwrap())
    }

    fn analyze_column(
        &self,
        dataset: &DatasetHandle,
        column: &str,
        weight: Option<&str>,
    ) -> Result<AnalysisOutcome, DashError> {
        self.record(format!(
            "analyze:{}:{}:{}",
            dataset.as_str(),
            column,
            weight.unwrap_or("-")
        ));
        if self.fail_analysis {
            return Ok(AnalysisOutcome::Failure {
                message: "Column could not be analyzed".to_string(),
            });
        }
        match column {
            "explicit" => Ok(AnalysisOutcome::Boolean {
                counts: BoolCounts {
                    true_count: 4.0,
                    false_count: 6.0,
                },
                weighted_by: weight.map(str::to_string),
            }),
            "album" => Ok(AnalysisOutcome::Empty {
                message: "No analyzable data found.".to_string(),
            }),
            _ => Ok(AnalysisOutcome::Numeric {
                stats: NumericStats {
                    mean: Some(30.0),
                    count: Some(100.0),
                    ..Default::default()
                },
                histogram: Histogram {
                    labels: vec!["0-10".to_string(), "10-20".to_string()],
                    values: vec![2.0, 5.0],
                },
                weighted_by: weight.map(str::to_string),
            }),
        }
    }

    fn artist_page(
        &self,
        dataset: &DatasetHandle,
        page: u32,
        page_size: u32,
    ) -> Result<ArtistPage, DashError> {
        self.record(format!("artists:{}:{page}:{page_size}", dataset.as_str()));
        let start = ((page - 1) * page_size) as usize;
        let end = (start + page_size as usize).min(TOTAL_ARTISTS);
        let artists = (start..end)
            .map(|i| ArtistRow {
                rank: (i + 1) as u32,
                artist: Some(format!("Artist {}", i + 1)),
                top_songs_info: Some(format!("Song A (#{})", i + 1)),
                avg_popularity: Some(90.0 - i as f64),
                avg_loudness: Some(-4.0),
                score: Some(1.0 - i as f64 / 100.0),
            })
            .collect();
        Ok(ArtistPage {
            artists,
            total_artists: TOTAL_ARTISTS,
        })
    }

    fn song_page(
        &self,
        dataset: &DatasetHandle,
        page: u32,
        page_size: u32,
    ) -> Result<SongPage, DashError> {
        self.record(format!("songs:{}:{page}:{page_size}", dataset.as_str()));
        let start = ((page - 1) * page_size) as usize;
        let end = (start + page_size as usize).min(TOTAL_SONGS);
        let songs = (start..end)
            .map(|i| SongRow {
                rank: (i + 1) as u32,
                name: Some(format!("Song {}", i + 1)),
                artist_ranks_info: Some("Artist 1 (#1)".to_string()),
                artists: Some("Artist 1".to_string()),
                album: Some("Album".to_string()),
                popularity: Some(88.0),
                loudness: Some(-5.0),
                score: Some(0.97),
            })
            .collect();
        Ok(SongPage {
            songs,
            total_songs: TOTAL_SONGS,
        })
    }

    fn export_ranking(
        &self,
        dataset: &DatasetHandle,
        kind: RankingKind,
        format: ExportFormat,
    ) -> Result<Vec<u8>, DashError> {
        self.record(format!(
            "export:{}:{}:{}",
            dataset.as_str(),
            kind.as_query_str(),
            format.extension()
        ));
        Ok(b"rank,name\n".to_vec())
    }
}

fn uploaded() -> Coordinator<RecordingApi> {
    let mut coordinator = Coordinator::new(RecordingApi::new());
    coordinator.upload(Path::new("tracks.csv"));
    coordinator
}

fn analyze_calls(coordinator: &Coordinator<RecordingApi>) -> usize {
    coordinator
        .api_calls()
        .iter()
        .filter(|c| c.starts_with("analyze:"))
        .count()
}

/// Call-log view over the mock behind `Coordinator::api()`.
trait ApiCalls {
    fn api_calls(&self) -> Vec<String>;
}

impl ApiCalls for Coordinator<RecordingApi> {
    fn api_calls(&self) -> Vec<String> {
        self.api().calls()
    }
}

#[test]
fn upload_then_numeric_analysis() {
    let mut coordinator = uploaded();
    assert_eq!(
        coordinator.session().dataset().unwrap().as_str(),
        "tracks.csv"
    );
    assert_eq!(coordinator.session().columns().len(), 4);

    coordinator.analyze_column("age", None);

    assert_eq!(coordinator.view(), ViewState::Numeric);
    assert_eq!(coordinator.stats().unwrap().mean, Some(30.0));
    assert!(!coordinator.histogram().is_empty());
    assert_eq!(
        coordinator.analysis_title(),
        "Single Column Analysis for \"age\""
    );
}

#[test]
fn repeated_selection_issues_one_call() {
    let mut coordinator = uploaded();

    coordinator.analyze_column("age", None);
    coordinator.analyze_column("age", None);
    coordinator.analyze_column("age", None);

    assert_eq!(analyze_calls(&coordinator), 1);
}

#[test]
fn weight_change_reanalyzes_exactly_once() {
    let mut coordinator = uploaded();
    coordinator.analyze_column("age", None);

    coordinator.set_weight_column(Some("popularity".to_string()));
    // Same weight again is a no-op.
    coordinator.set_weight_column(Some("popularity".to_string()));

    assert_eq!(analyze_calls(&coordinator), 2);
    assert_eq!(
        coordinator.analysis_title(),
        "Single Column Analysis for \"age\" (Weighted by popularity)"
    );
}

#[test]
fn boolean_column_binds_split_chart() {
    let mut coordinator = uploaded();
    coordinator.analyze_column("explicit", None);

    assert_eq!(coordinator.view(), ViewState::Boolean);
    assert_eq!(coordinator.boolean_split().true_count, 4.0);
    assert!(coordinator.histogram().is_empty());
    assert!(coordinator.stats().is_none());
}

#[test]
fn empty_column_commits_selection_with_message() {
    let mut coordinator = uploaded();
    coordinator.analyze_column("album", None);

    assert_eq!(coordinator.view(), ViewState::Empty);
    assert_eq!(
        coordinator.session().selection().unwrap().column.name,
        "album"
    );
    assert_eq!(
        coordinator.view_message(),
        Some("No analyzable data found.")
    );
}

#[test]
fn failed_analysis_rolls_back_selection() {
    let mut coordinator = Coordinator::new(RecordingApi::failing_analysis());
    coordinator.upload(Path::new("tracks.csv"));

    coordinator.analyze_column("age", None);

    assert_eq!(coordinator.view(), ViewState::Error);
    assert!(coordinator.session().selection().is_none());
    assert!(coordinator
        .notices()
        .iter()
        .any(|n| n.level == NoticeLevel::Error && n.text.contains("age")));
    assert!(!coordinator.session().is_loading());
}

#[test]
fn failed_analysis_preserves_previous_committed_selection() {
    // First call succeeds, then the API starts failing.
    let mut coordinator = uploaded();
    coordinator.analyze_column("age", None);
    assert_eq!(
        coordinator.session().selection().unwrap().column.name,
        "age"
    );

    // Unknown column fails the membership precondition before any call;
    // the committed selection survives.
    coordinator.analyze_column("no_such_column", None);
    assert_eq!(
        coordinator.session().selection().unwrap().column.name,
        "age"
    );
    assert_eq!(analyze_calls(&coordinator), 1);
}

#[test]
fn artist_pagination_accumulates_to_completion() {
    let mut coordinator = uploaded();

    coordinator.start_ranking(RankingKind::Artists);
    assert_eq!(coordinator.ranking_rows().unwrap().len(), 10);
    assert!(coordinator.session().ranking().unwrap().can_load_more());

    coordinator.load_more();
    assert_eq!(coordinator.ranking_rows().unwrap().len(), 20);

    coordinator.load_more();
    assert_eq!(coordinator.ranking_rows().unwrap().len(), 25);
    assert!(coordinator.session().ranking().unwrap().is_complete());
    assert!(coordinator
        .notices()
        .iter()
        .any(|n| n.text == "All artists loaded."));

    // Fully loaded: further load-more is a quiet no-op.
    coordinator.load_more();
    assert_eq!(coordinator.ranking_rows().unwrap().len(), 25);

    let pages: Vec<String> = coordinator
        .api_calls()
        .iter()
        .filter(|c| c.starts_with("artists:"))
        .cloned()
        .collect();
    assert_eq!(
        pages,
        vec![
            "artists:tracks.csv:1:10",
            "artists:tracks.csv:2:10",
            "artists:tracks.csv:3:10"
        ]
    );
}

#[test]
fn kind_switch_rebuilds_surface() {
    let mut coordinator = uploaded();

    coordinator.start_ranking(RankingKind::Artists);
    coordinator.load_more();
    assert_eq!(coordinator.ranking_rows().unwrap().len(), 20);

    coordinator.start_ranking(RankingKind::Songs);
    match coordinator.ranking_rows().unwrap() {
        RankingRows::Songs(rows) => assert_eq!(rows.len(), TOTAL_SONGS),
        other => panic!("expected songs surface, got {other:?}"),
    }
    // 7 of 7 fit in one page.
    assert!(coordinator.session().ranking().unwrap().is_complete());

    // Switching back restarts from page 1, not where artists left off.
    coordinator.start_ranking(RankingKind::Artists);
    assert_eq!(coordinator.ranking_rows().unwrap().len(), 10);
}

#[test]
fn ranking_restart_same_kind_replaces() {
    let mut coordinator = uploaded();

    coordinator.start_ranking(RankingKind::Artists);
    coordinator.load_more();
    coordinator.start_ranking(RankingKind::Artists);

    assert_eq!(coordinator.ranking_rows().unwrap().len(), 10);
    assert_eq!(
        coordinator.session().ranking().unwrap().accumulated_count,
        10
    );
}

#[test]
fn export_requires_ranking_context() {
    let mut coordinator = uploaded();

    assert!(coordinator.export_ranking(ExportFormat::Csv).is_none());
    assert!(coordinator
        .notices()
        .iter()
        .any(|n| n.text.contains("No ranking data")));
    // The precondition failure never reached the API.
    assert!(!coordinator
        .api_calls()
        .iter()
        .any(|c| c.starts_with("export:")));
}

#[test]
fn export_names_file_after_kind_and_format() {
    let mut coordinator = uploaded();
    coordinator.start_ranking(RankingKind::Songs);

    let (filename, bytes) = coordinator.export_ranking(ExportFormat::Xlsx).unwrap();
    assert_eq!(filename, "songs_ranking.xlsx");
    assert_eq!(bytes, b"rank,name\n");
    assert!(coordinator
        .api_calls()
        .contains(&"export:tracks.csv:songs:xlsx".to_string()));
}

#[test]
fn new_upload_clears_prior_analysis_state() {
    let mut coordinator = uploaded();
    coordinator.analyze_column("age", None);
    coordinator.start_ranking(RankingKind::Artists);

    coordinator.upload(Path::new("other.csv"));

    assert_eq!(coordinator.view(), ViewState::Initial);
    assert!(coordinator.session().selection().is_none());
    assert!(coordinator.session().ranking().is_none());
    assert!(coordinator.ranking_rows().is_none());
    assert!(coordinator.histogram().is_empty());
}
