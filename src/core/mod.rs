pub mod charts;
pub mod error;
pub mod ranking;
pub mod session;
pub mod types;
pub mod view_state;

pub use charts::{BooleanSplitChart, HistogramChart};
pub use error::DashError;
pub use ranking::{RankingContext, RenderMode};
pub use session::SessionState;
pub use types::{
    ColumnDescriptor, ColumnType, DatasetHandle, ExportFormat, RankingKind, Selection,
};
pub use view_state::{AnalysisOutcome, BoolCounts, Histogram, NumericStats, ViewState};
