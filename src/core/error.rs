use thiserror::Error;

/// Failure taxonomy at the collaborator/coordinator boundary.
///
/// Every remote-call failure is caught here and surfaced as a transient
/// user notification; it never halts the session.
#[derive(Debug, Error)]
pub enum DashError {
    /// Malformed or rejected upload payload
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Network failure or a non-structured response body
    #[error("Request failed: {0}")]
    Transport(String),

    /// Structured response missing required fields
    #[error("Invalid response from server: {0}")]
    Validation(String),

    /// Analysis produced no analyzable data
    #[error("{0}")]
    EmptyResult(String),

    /// Action attempted without the required prior state
    #[error("{0}")]
    Precondition(String),
}

impl DashError {
    pub fn no_dataset() -> Self {
        Self::Precondition("Please upload a file first.".to_string())
    }

    pub fn busy() -> Self {
        Self::Precondition("Please wait for the current operation to finish.".to_string())
    }
}

impl From<reqwest::Error> for DashError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}
