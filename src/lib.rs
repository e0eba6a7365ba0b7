pub mod core;
pub mod logging;
pub mod services;
pub mod tui;

// Re-export commonly used types
pub use core::{
    AnalysisOutcome, ColumnDescriptor, ColumnType, DashError, DatasetHandle, ExportFormat,
    RankingContext, RankingKind, SessionState, ViewState,
};
pub use services::{AnalysisApi, Coordinator, HttpAnalysisClient};
pub use tui::{Action, ActionCategory, App};
