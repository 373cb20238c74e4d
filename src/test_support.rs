use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::board::BoardType;
use crate::domain::interval::{IntervalLength, TimeUnit};
use crate::domain::ratio::Ratio;
use crate::domain::throughput::ResolvedInterval;
use crate::services::data_source::{DataSourceError, IssueTracker};
use crate::services::forecast_config::ForecastSettings;
use crate::services::index_sampler::IndexSampler;

// Replays a fixed list of indices and panics once it runs out.
pub struct ScriptedSampler {
    indices: VecDeque<usize>,
}

impl ScriptedSampler {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices: indices.into(),
        }
    }
}

impl IndexSampler for ScriptedSampler {
    fn next_index(&mut self, len: usize) -> usize {
        let index = self.indices.pop_front().expect("scripted sampler ran out of indices");
        assert!(index < len, "scripted index {index} out of range for {len} samples");
        index
    }
}

pub fn settings_with_defaults() -> ForecastSettings {
    ForecastSettings {
        project_ids: vec![],
        num_days_of_history: 70,
        confidence_percentage_threshold: 80.0,
        num_simulations: 100,
        interval: IntervalLength::new(2, TimeUnit::Weeks),
        user_supplied_ticket_target: 60,
        bug_ratio_override: None,
        discovery_ratio_override: None,
    }
}

pub struct MockTracker {
    board: Vec<String>,
    resolved: Vec<u64>,
    bug_ratio: Ratio,
    discovery_ratio: Ratio,
    labelled: Vec<(String, Vec<String>)>,
    resolved_requests: Mutex<Vec<Vec<String>>>,
    comments: Mutex<Vec<(String, String)>>,
}

impl MockTracker {
    pub fn new(board: &[&str], resolved: Vec<u64>, bug_ratio: Ratio, discovery_ratio: Ratio) -> Self {
        Self {
            board: board.iter().map(|key| key.to_string()).collect(),
            resolved,
            bug_ratio,
            discovery_ratio,
            labelled: Vec::new(),
            resolved_requests: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
        }
    }

    /// Labelled issue keys, each with the boards it sits on.
    pub fn with_labelled(mut self, labelled: &[(&str, Vec<&str>)]) -> Self {
        self.labelled = labelled
            .iter()
            .map(|(key, boards)| {
                (
                    key.to_string(),
                    boards.iter().map(|board| board.to_string()).collect(),
                )
            })
            .collect();
        self
    }

    pub fn resolved_requests(&self) -> Vec<Vec<String>> {
        self.resolved_requests.lock().unwrap().clone()
    }

    pub fn comments(&self) -> Vec<(String, String)> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn board_type(&self, _board_id: &str) -> Result<BoardType, DataSourceError> {
        Ok(BoardType::Kanban)
    }

    async fn issues_for_board(&self, _board_id: &str) -> Result<Vec<String>, DataSourceError> {
        Ok(self.board.clone())
    }

    async fn resolved_per_interval(
        &self,
        project_ids: &[String],
        _interval_days: u64,
        _history_days: u64,
    ) -> Result<Vec<ResolvedInterval>, DataSourceError> {
        self.resolved_requests
            .lock()
            .unwrap()
            .push(project_ids.to_vec());
        Ok(self
            .resolved
            .iter()
            .enumerate()
            .map(|(index, resolved)| ResolvedInterval::new(index + 1, *resolved, vec![]))
            .collect())
    }

    async fn bug_ratio(&self, _project_ids: &[String], _history_days: u64) -> Result<Ratio, DataSourceError> {
        Ok(self.bug_ratio)
    }

    async fn discovery_ratio(
        &self,
        _project_ids: &[String],
        _history_days: u64,
    ) -> Result<Ratio, DataSourceError> {
        Ok(self.discovery_ratio)
    }

    async fn comment_issue(&self, issue_key: &str, body: &str) -> Result<(), DataSourceError> {
        self.comments
            .lock()
            .unwrap()
            .push((issue_key.to_string(), body.to_string()));
        Ok(())
    }

    async fn labelled_issues(&self, _label: &str) -> Result<Vec<String>, DataSourceError> {
        Ok(self.labelled.iter().map(|(key, _)| key.clone()).collect())
    }

    async fn boards_containing(&self, issue_key: &str) -> Result<Vec<String>, DataSourceError> {
        Ok(self
            .labelled
            .iter()
            .find(|(key, _)| key == issue_key)
            .map(|(_, boards)| boards.clone())
            .unwrap_or_default())
    }
}
