use serde::{Deserialize, Serialize};

/// Summary statistics reported for a numeric column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub variance: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub count: Option<f64>,
}

/// Bucketed value distribution for a numeric column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// True/false tallies (or weighted sums) for a boolean column
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoolCounts {
    #[serde(rename = "true")]
    pub true_count: f64,
    #[serde(rename = "false")]
    pub false_count: f64,
}

/// Validated outcome of one single-column analysis call.
///
/// The duck-typed server response is shaped into this union at the service
/// boundary; anything that fails validation arrives here as `Failure`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Numeric {
        stats: NumericStats,
        histogram: Histogram,
        weighted_by: Option<String>,
    },
    Boolean {
        counts: BoolCounts,
        weighted_by: Option<String>,
    },
    Empty {
        message: String,
    },
    Failure {
        message: String,
    },
}

/// Display mode of the single-column analysis surface.
///
/// Exactly one value is active; transitions happen only as a function of
/// the last analysis outcome, plus the unconditional reset to `Initial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Initial,
    Numeric,
    Boolean,
    Empty,
    Error,
}

impl ViewState {
    /// Pure transition function: outcome -> next state.
    ///
    /// Side effects (chart binding, message surfacing, selection rollback)
    /// belong to the coordinator.
    pub fn next(outcome: &AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Numeric { .. } => Self::Numeric,
            AnalysisOutcome::Boolean { .. } => Self::Boolean,
            AnalysisOutcome::Empty { .. } => Self::Empty,
            AnalysisOutcome::Failure { .. } => Self::Error,
        }
    }

    /// Placeholder text for states that render no chart
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Initial => Some("Select a column for analysis."),
            Self::Empty => Some("No data available."),
            Self::Error => Some("An error occurred during analysis."),
            Self::Numeric | Self::Boolean => None,
        }
    }
}
