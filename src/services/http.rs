use crate::core::types::{DatasetHandle, ExportFormat, RankingKind};
use crate::core::view_state::AnalysisOutcome;
use crate::core::DashError;
use crate::services::api::{AnalysisApi, AnalysisResponse, ArtistPage, SongPage, UploadResponse};
use reqwest::blocking::{multipart, Client as HttpClient};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Blocking HTTP implementation of the analysis/export collaborators.
///
/// All calls suspend the cooperative loop until the response arrives; the
/// coordinator's loading flag guards against re-entry for that duration.
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    base_url: String,
    http: HttpClient,
}

impl HttpAnalysisClient {
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self, DashError> {
        let http = HttpClient::builder()
            .user_agent(concat!("trackdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Read a JSON body, surfacing `{error}` payloads and non-JSON bodies
    fn read_json(response: reqwest::blocking::Response) -> Result<Value, DashError> {
        let status = response.status();
        let text = response.text()?;
        let value: Value = serde_json::from_str(&text).map_err(|_| {
            DashError::Transport(format!(
                "Server returned non-JSON response (status {status})"
            ))
        })?;
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(DashError::Transport(message.to_string()));
        }
        if !status.is_success() {
            return Err(DashError::Transport(format!("HTTP error, status {status}")));
        }
        Ok(value)
    }
}

impl AnalysisApi for HttpAnalysisClient {
    fn upload(&self, path: &Path) -> Result<UploadResponse, DashError> {
        let form = multipart::Form::new()
            .file("file", path)
            .map_err(|e| DashError::Upload(e.to_string()))?;

        debug!("uploading {} to {}", path.display(), self.url("/upload"));
        let response = self.http.post(self.url("/upload")).multipart(form).send()?;
        let value = Self::read_json(response).map_err(|e| match e {
            DashError::Transport(msg) => DashError::Upload(msg),
            other => other,
        })?;

        let parsed: UploadResponse = serde_json::from_value(value)?;
        if parsed.columns.is_empty() {
            return Err(DashError::Upload(
                "No analyzable columns found.".to_string(),
            ));
        }
        Ok(parsed)
    }

    fn analyze_column(
        &self,
        dataset: &DatasetHandle,
        column: &str,
        weight_column: Option<&str>,
    ) -> Result<AnalysisOutcome, DashError> {
        let mut query: Vec<(&str, &str)> = vec![("file", dataset.as_str()), ("col", column)];
        if let Some(weight) = weight_column {
            query.push(("weight_col", weight));
        }

        let response = self
            .http
            .get(self.url("/analyze/data"))
            .query(&query)
            .send()?;
        // Analysis errors come back as `{error}` JSON; keep them in the
        // result union rather than the transport path.
        let status = response.status();
        let text = response.text()?;
        let parsed: AnalysisResponse = serde_json::from_str(&text).map_err(|_| {
            DashError::Transport(format!(
                "Server returned non-JSON response (status {status})"
            ))
        })?;
        parsed.into_outcome()
    }

    fn artist_page(
        &self,
        dataset: &DatasetHandle,
        page: u32,
        page_size: u32,
    ) -> Result<ArtistPage, DashError> {
        let response = self
            .http
            .get(self.url("/analyze/top_artists"))
            .query(&[
                ("file", dataset.as_str()),
                ("page", &page.to_string()),
                ("page_size", &page_size.to_string()),
            ])
            .send()?;
        let value = Self::read_json(response)?;
        Ok(serde_json::from_value(value)?)
    }

    fn song_page(
        &self,
        dataset: &DatasetHandle,
        page: u32,
        page_size: u32,
    ) -> Result<SongPage, DashError> {
        let response = self
            .http
            .get(self.url("/analyze/top_songs"))
            .query(&[
                ("file", dataset.as_str()),
                ("page", &page.to_string()),
                ("page_size", &page_size.to_string()),
            ])
            .send()?;
        let value = Self::read_json(response)?;
        Ok(serde_json::from_value(value)?)
    }

    fn export_ranking(
        &self,
        dataset: &DatasetHandle,
        kind: RankingKind,
        format: ExportFormat,
    ) -> Result<Vec<u8>, DashError> {
        let response = self
            .http
            .get(self.url("/analyze/export/ranking"))
            .query(&[
                ("file", dataset.as_str()),
                ("type", kind.as_query_str()),
                ("format", format.extension()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
                .unwrap_or_else(|| format!("HTTP error, status {status}"));
            return Err(DashError::Transport(message));
        }
        Ok(response.bytes()?.to_vec())
    }
}
