use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-side identifier for an uploaded dataset, opaque to the client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHandle(String);

impl DatasetHandle {
    pub fn new<S: Into<String>>(handle: S) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic classification of one dataset column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Boolean,
    Other,
}

impl ColumnType {
    /// Classify the server's free-form type strings.
    ///
    /// The upload endpoint reports pandas-flavored names (`int`, `float`,
    /// `bool`, ...); anything unrecognized is navigable but not chartable.
    pub fn from_server(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "int" | "integer" | "float" | "numeric" | "number" => Self::Numeric,
            "bool" | "boolean" => Self::Boolean,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Name + semantic type of one dataset column.
///
/// The catalog order is the source order and is immutable for the lifetime
/// of a [`DatasetHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    pub fn new<S: Into<String>>(name: S, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// The column currently under single-column analysis, plus the optional
/// weighting column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub column: ColumnDescriptor,
    pub weight_column: Option<String>,
}

impl Selection {
    pub fn new(column: ColumnDescriptor, weight_column: Option<String>) -> Self {
        Self {
            column,
            weight_column,
        }
    }

    /// Label shown while the analysis request is in flight
    pub fn in_progress_label(&self) -> String {
        match &self.weight_column {
            Some(w) => format!("Loading analysis for \"{}\" (weighted by {w})...", self.column.name),
            None => format!("Loading analysis for \"{}\"...", self.column.name),
        }
    }
}

/// Which of the two ranked collections is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum RankingKind {
    #[strum(serialize = "artists")]
    Artists,
    #[strum(serialize = "songs")]
    Songs,
}

impl RankingKind {
    /// Value expected by the export and ranking endpoints
    pub fn as_query_str(&self) -> &'static str {
        match self {
            Self::Artists => "artists",
            Self::Songs => "songs",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Artists => "Top Artists (Weighted by Rank)",
            Self::Songs => "Top Songs (Weighted by Rank)",
        }
    }
}

/// Formats the export collaborator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ExportFormat {
    #[strum(serialize = "csv")]
    Csv,
    #[strum(serialize = "xlsx")]
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(format!("Unknown export format: {other}")),
        }
    }
}
