use async_trait::async_trait;
use thiserror::Error;

use crate::domain::board::BoardType;
use crate::domain::ratio::{Ratio, RatioError};
use crate::domain::throughput::ResolvedInterval;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("resource not found")]
    NotFound,
    #[error("connection error")]
    Connection,
    #[error("parse error")]
    Parse,
    #[error("unauthorized")]
    Unauthorized,
    #[error("unsupported board type [{board_type}] for board [{board_id}]")]
    UnsupportedBoard { board_type: String, board_id: String },
    #[error("invalid ratio: {0}")]
    Ratio(#[from] RatioError),
    #[error("{0}")]
    Other(String),
}

/// Issue tracker queries needed to run a forecast.
///
/// Board ordering differs between board types, but `issues_for_board` always
/// returns one list of issue keys in priority order.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn board_type(&self, board_id: &str) -> Result<BoardType, DataSourceError>;

    /// All in progress or to do issues on the board, highest priority first.
    async fn issues_for_board(&self, board_id: &str) -> Result<Vec<String>, DataSourceError>;

    /// Resolved issues per time interval, most recent interval first.
    async fn resolved_per_interval(
        &self,
        project_ids: &[String],
        interval_days: u64,
        history_days: u64,
    ) -> Result<Vec<ResolvedInterval>, DataSourceError>;

    /// "1 bug every X other tickets" over the history window.
    async fn bug_ratio(&self, project_ids: &[String], history_days: u64) -> Result<Ratio, DataSourceError>;

    /// "1 new ticket created every X tickets resolved" over the history window.
    async fn discovery_ratio(
        &self,
        project_ids: &[String],
        history_days: u64,
    ) -> Result<Ratio, DataSourceError>;

    async fn comment_issue(&self, issue_key: &str, body: &str) -> Result<(), DataSourceError>;

    /// Keys of all issues carrying `label`, newest first.
    async fn labelled_issues(&self, label: &str) -> Result<Vec<String>, DataSourceError>;

    /// Boards of the issue's project that show the issue.
    async fn boards_containing(&self, issue_key: &str) -> Result<Vec<String>, DataSourceError>;
}
