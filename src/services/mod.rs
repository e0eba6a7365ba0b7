pub mod api;
pub mod coordinator;
pub mod http;

pub use api::{AnalysisApi, ArtistPage, ArtistRow, SongPage, SongRow, UploadResponse};
pub use coordinator::{Coordinator, Notice, NoticeLevel, RankingRows};
pub use http::HttpAnalysisClient;
