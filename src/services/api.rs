use crate::core::types::{ColumnDescriptor, ColumnType, DatasetHandle, ExportFormat, RankingKind};
use crate::core::view_state::{AnalysisOutcome, BoolCounts, Histogram, NumericStats};
use crate::core::DashError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Successful upload: the dataset handle plus its column catalog
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl UploadResponse {
    pub fn into_catalog(self) -> (DatasetHandle, Vec<ColumnDescriptor>) {
        let columns = self
            .columns
            .into_iter()
            .map(|c| ColumnDescriptor::new(c.name, ColumnType::from_server(&c.type_name)))
            .collect();
        (DatasetHandle::new(self.filename), columns)
    }
}

/// Raw single-column analysis response, duck-typed as the server sends it.
///
/// Shape is validated in [`AnalysisResponse::into_outcome`] before anything
/// is admitted into session state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub stats: Option<NumericStats>,
    pub histogram: Option<Histogram>,
    pub counts: Option<BoolCounts>,
    pub weighted_by: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Shape the duck-typed payload into the tagged result union.
    ///
    /// A server-reported `{error}` is part of the union (`Failure`); a
    /// payload missing the fields its own tag promises is a validation
    /// rejection and never reaches the session.
    pub fn into_outcome(self) -> Result<AnalysisOutcome, DashError> {
        if let Some(message) = self.error {
            return Ok(AnalysisOutcome::Failure { message });
        }

        match self.kind.as_deref() {
            Some("numeric") => {
                let stats = self
                    .stats
                    .ok_or_else(|| DashError::Validation("numeric result without stats".to_string()))?;
                let histogram = self.histogram.ok_or_else(|| {
                    DashError::Validation("numeric result without histogram".to_string())
                })?;
                Ok(AnalysisOutcome::Numeric {
                    stats,
                    histogram,
                    weighted_by: self.weighted_by,
                })
            }
            Some("boolean") => {
                let counts = self.counts.ok_or_else(|| {
                    DashError::Validation("boolean result without counts".to_string())
                })?;
                Ok(AnalysisOutcome::Boolean {
                    counts,
                    weighted_by: self.weighted_by,
                })
            }
            Some("empty") => Ok(AnalysisOutcome::Empty {
                message: self
                    .message
                    .unwrap_or_else(|| "No analyzable data found.".to_string()),
            }),
            Some(other) => Err(DashError::Validation(format!(
                "unknown analysis result type \"{other}\""
            ))),
            None => Err(DashError::Validation(
                "response missing result type".to_string(),
            )),
        }
    }
}

/// One row of the artist ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRow {
    pub rank: u32,
    pub artist: Option<String>,
    pub top_songs_info: Option<String>,
    pub avg_popularity: Option<f64>,
    pub avg_loudness: Option<f64>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistPage {
    pub artists: Vec<ArtistRow>,
    pub total_artists: usize,
}

/// One row of the song ranking, with artist cross-references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRow {
    pub rank: u32,
    pub name: Option<String>,
    pub artist_ranks_info: Option<String>,
    pub artists: Option<String>,
    pub album: Option<String>,
    pub popularity: Option<f64>,
    pub loudness: Option<f64>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SongPage {
    pub songs: Vec<SongRow>,
    pub total_songs: usize,
}

/// Seam to the remote analysis/export collaborators.
///
/// The coordinator is generic over this trait; tests substitute a recording
/// mock, production uses [`crate::services::HttpAnalysisClient`].
pub trait AnalysisApi {
    /// Upload a dataset file; returns handle + column catalog source
    fn upload(&self, path: &Path) -> Result<UploadResponse, DashError>;

    /// Single-column analysis, already validated into the result union
    fn analyze_column(
        &self,
        dataset: &DatasetHandle,
        column: &str,
        weight_column: Option<&str>,
    ) -> Result<AnalysisOutcome, DashError>;

    fn artist_page(
        &self,
        dataset: &DatasetHandle,
        page: u32,
        page_size: u32,
    ) -> Result<ArtistPage, DashError>;

    fn song_page(
        &self,
        dataset: &DatasetHandle,
        page: u32,
        page_size: u32,
    ) -> Result<SongPage, DashError>;

    /// Ranking export; the response is an opaque byte stream saved as a
    /// download, never parsed
    fn export_ranking(
        &self,
        dataset: &DatasetHandle,
        kind: RankingKind,
        format: ExportFormat,
    ) -> Result<Vec<u8>, DashError>;
}
