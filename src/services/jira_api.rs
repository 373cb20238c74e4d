use std::collections::HashMap;
use std::env;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::board::BoardType;
use crate::domain::issue::project_key;
use crate::domain::ratio::Ratio;
use crate::domain::throughput::ResolvedInterval;
use crate::services::data_source::{DataSourceError, IssueTracker};

const PAGE_SIZE: u64 = 1000;
const STANDARD_ISSUES: &str = "issuetype in standardIssueTypes() AND issuetype != Epic";
const IN_PROGRESS: &str = "In Progress";
const TO_DO: &str = "To Do";

#[derive(Debug, Clone)]
pub struct AuthData {
    pub username: String,
    pub api_token: String,
}

impl AuthData {
    pub fn from_env() -> Result<Self, DataSourceError> {
        let username = env::var("JIRA_USERNAME").ok();
        let api_token = env::var("JIRA_API_TOKEN").ok();
        match (username, api_token) {
            (Some(username), Some(api_token)) => Ok(Self {
                username,
                api_token,
            }),
            _ => Err(DataSourceError::Unauthorized),
        }
    }
}

pub struct JiraApiClient {
    base_url: String,
    bug_issue_type: String,
    auth: AuthData,
    client: Client,
}

impl JiraApiClient {
    pub fn new(base_url: &str, bug_issue_type: &str, auth: AuthData) -> Result<Self, DataSourceError> {
        if base_url.is_empty() {
            return Err(DataSourceError::Other(
                "jira config is missing base_url".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bug_issue_type: bug_issue_type.to_string(),
            auth,
            client: Client::new(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(
            self.auth.username.clone(),
            Some(self.auth.api_token.clone()),
        )
    }

    async fn fetch_json(
        &self,
        url: &str,
        params: &HashMap<&str, String>,
    ) -> Result<Value, DataSourceError> {
        let response = self
            .authorized(self.client.get(url).query(params))
            .send()
            .await
            .map_err(|_| DataSourceError::Connection)?;

        check_status(response.status())?;
        response
            .json::<Value>()
            .await
            .map_err(|_| DataSourceError::Parse)
    }

    /// Collects issue keys from a paginated `issues` endpoint, in response order.
    async fn fetch_issue_keys(
        &self,
        url: &str,
        jql: &str,
    ) -> Result<Vec<String>, DataSourceError> {
        let mut params = HashMap::new();
        params.insert("jql", jql.to_string());
        params.insert("fields", "key".to_string());
        params.insert("maxResults", PAGE_SIZE.to_string());

        let mut keys = Vec::new();
        loop {
            debug!(url, jql, "fetching issues");
            let payload = self.fetch_json(url, &params).await?;
            let issues = payload
                .get("issues")
                .and_then(|value| value.as_array())
                .ok_or(DataSourceError::Parse)?;

            for issue in issues {
                let key = issue
                    .get("key")
                    .and_then(|value| value.as_str())
                    .ok_or(DataSourceError::Parse)?;
                keys.push(key.to_string());
            }

            match next_start_at(&payload, issues.len()) {
                Some(start_at) => {
                    params.insert("startAt", start_at.to_string());
                }
                None => break,
            }
        }

        Ok(keys)
    }

    async fn count_issues(&self, jql: &str) -> Result<u64, DataSourceError> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        self.count_issues_at(&url, jql).await
    }

    async fn count_issues_at(&self, url: &str, jql: &str) -> Result<u64, DataSourceError> {
        let mut params = HashMap::new();
        params.insert("jql", jql.to_string());
        // Only the total from the response metadata is needed.
        params.insert("maxResults", "0".to_string());

        debug!(url, jql, "counting issues");
        let payload = self.fetch_json(url, &params).await?;
        payload
            .get("total")
            .and_then(|value| value.as_u64())
            .ok_or(DataSourceError::Parse)
    }

    async fn search_issue_keys(&self, jql: &str) -> Result<Vec<String>, DataSourceError> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        self.fetch_issue_keys(&url, jql).await
    }

    async fn kanban_issues(&self, board_id: &str) -> Result<Vec<String>, DataSourceError> {
        let url = format!("{}/rest/agile/1.0/board/{board_id}/issue", self.base_url);
        let mut keys = self
            .fetch_issue_keys(&url, &board_status_jql(&[IN_PROGRESS]))
            .await?;
        keys.extend(
            self.fetch_issue_keys(&url, &board_status_jql(&[TO_DO]))
                .await?,
        );
        Ok(keys)
    }

    async fn scrum_issues(&self, board_id: &str) -> Result<Vec<String>, DataSourceError> {
        let jql = format!("{} ORDER BY Rank ASC", board_status_jql(&[IN_PROGRESS, TO_DO]));
        let mut keys = Vec::new();

        for sprint_id in self.open_sprints(board_id).await? {
            let url = format!(
                "{}/rest/agile/1.0/board/{board_id}/sprint/{sprint_id}/issue",
                self.base_url
            );
            keys.extend(self.fetch_issue_keys(&url, &jql).await?);
        }

        let backlog_url = format!("{}/rest/agile/1.0/board/{board_id}/backlog", self.base_url);
        keys.extend(self.fetch_issue_keys(&backlog_url, &jql).await?);
        Ok(keys)
    }

    /// Active sprints first, then future sprints, in board order.
    async fn open_sprints(&self, board_id: &str) -> Result<Vec<u64>, DataSourceError> {
        let url = format!("{}/rest/agile/1.0/board/{board_id}/sprint", self.base_url);
        let mut active = Vec::new();
        let mut future = Vec::new();
        let mut params = HashMap::new();
        params.insert("state", "active,future".to_string());

        loop {
            let payload = self.fetch_json(&url, &params).await?;
            let sprints = payload
                .get("values")
                .and_then(|value| value.as_array())
                .ok_or(DataSourceError::Parse)?;

            for sprint in sprints {
                let id = sprint
                    .get("id")
                    .and_then(|value| value.as_u64())
                    .ok_or(DataSourceError::Parse)?;
                match sprint.get("state").and_then(|value| value.as_str()) {
                    Some("active") => active.push(id),
                    _ => future.push(id),
                }
            }

            match next_start_at(&payload, sprints.len()) {
                Some(start_at) => {
                    params.insert("startAt", start_at.to_string());
                }
                None => break,
            }
        }

        active.extend(future);
        Ok(active)
    }

    /// Ids of every board that belongs to `project`.
    async fn project_boards(&self, project: &str) -> Result<Vec<String>, DataSourceError> {
        let url = format!("{}/rest/agile/1.0/board", self.base_url);
        let mut params = HashMap::new();
        params.insert("projectKeyOrId", project.to_string());

        let mut board_ids = Vec::new();
        loop {
            let payload = self.fetch_json(&url, &params).await?;
            let boards = payload
                .get("values")
                .and_then(|value| value.as_array())
                .ok_or(DataSourceError::Parse)?;

            for board in boards {
                let id = match board.get("id") {
                    Some(Value::Number(id)) => id.to_string(),
                    Some(Value::String(id)) => id.clone(),
                    _ => return Err(DataSourceError::Parse),
                };
                board_ids.push(id);
            }

            match next_start_at(&payload, boards.len()) {
                Some(start_at) => {
                    params.insert("startAt", start_at.to_string());
                }
                None => break,
            }
        }

        Ok(board_ids)
    }

    fn non_bug_created_jql(&self, project_ids: &[String], history_days: u64) -> String {
        format!(
            "{} AND {STANDARD_ISSUES} AND issuetype != \"{}\" AND created >= -{history_days}d",
            projects_clause(project_ids),
            self.bug_issue_type
        )
    }
}

#[async_trait]
impl IssueTracker for JiraApiClient {
    async fn board_type(&self, board_id: &str) -> Result<BoardType, DataSourceError> {
        let url = format!("{}/rest/agile/1.0/board/{board_id}", self.base_url);
        let payload = self.fetch_json(&url, &HashMap::new()).await?;
        let board_type = payload
            .get("type")
            .and_then(|value| value.as_str())
            .ok_or(DataSourceError::Parse)?;

        BoardType::parse(board_type).ok_or_else(|| DataSourceError::UnsupportedBoard {
            board_type: board_type.to_string(),
            board_id: board_id.to_string(),
        })
    }

    async fn issues_for_board(&self, board_id: &str) -> Result<Vec<String>, DataSourceError> {
        let board_type = self.board_type(board_id).await?;
        debug!(board_id, %board_type, "listing board issues");
        match board_type {
            BoardType::Kanban => self.kanban_issues(board_id).await,
            BoardType::Scrum => {
                warn!(board_id, "scrum board backlog order is taken from sprint order, then backlog rank");
                self.scrum_issues(board_id).await
            }
        }
    }

    async fn resolved_per_interval(
        &self,
        project_ids: &[String],
        interval_days: u64,
        history_days: u64,
    ) -> Result<Vec<ResolvedInterval>, DataSourceError> {
        let mut intervals = Vec::new();
        for (index, (start, end)) in interval_windows(interval_days, history_days)
            .into_iter()
            .enumerate()
        {
            let jql = format!(
                "{} AND {STANDARD_ISSUES} AND resolved >= -{start}d AND resolved <= -{end}d",
                projects_clause(project_ids)
            );
            let issues = self.search_issue_keys(&jql).await?;
            intervals.push(ResolvedInterval::new(index + 1, issues.len() as u64, issues));
        }
        Ok(intervals)
    }

    async fn bug_ratio(&self, project_ids: &[String], history_days: u64) -> Result<Ratio, DataSourceError> {
        let bugs_jql = format!(
            "{} AND issuetype = \"{}\" AND created >= -{history_days}d",
            projects_clause(project_ids),
            self.bug_issue_type
        );
        let bug_count = self.count_issues(&bugs_jql).await?;
        let other_count = self
            .count_issues(&self.non_bug_created_jql(project_ids, history_days))
            .await?;

        debug!(bug_count, other_count, "bug ratio counts");
        Ok(Ratio::from_counts(other_count, bug_count)?)
    }

    async fn discovery_ratio(
        &self,
        project_ids: &[String],
        history_days: u64,
    ) -> Result<Ratio, DataSourceError> {
        let created_count = self
            .count_issues(&self.non_bug_created_jql(project_ids, history_days))
            .await?;
        let resolved_jql = format!(
            "{} AND {STANDARD_ISSUES} AND resolved >= -{history_days}d",
            projects_clause(project_ids)
        );
        let resolved_count = self.count_issues(&resolved_jql).await?;

        debug!(created_count, resolved_count, "discovery ratio counts");
        Ok(Ratio::from_counts(resolved_count, created_count)?)
    }

    async fn comment_issue(&self, issue_key: &str, body: &str) -> Result<(), DataSourceError> {
        let url = format!("{}/rest/api/2/issue/{issue_key}/comment", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .map_err(|_| DataSourceError::Connection)?;

        check_status(response.status())
    }

    async fn labelled_issues(&self, label: &str) -> Result<Vec<String>, DataSourceError> {
        self.search_issue_keys(&format!("labels = {label} ORDER BY created DESC"))
            .await
    }

    async fn boards_containing(&self, issue_key: &str) -> Result<Vec<String>, DataSourceError> {
        let project = project_key(issue_key)
            .ok_or_else(|| DataSourceError::Other(format!("invalid issue key [{issue_key}]")))?;

        let mut containing = Vec::new();
        for board_id in self.project_boards(project).await? {
            let url = format!("{}/rest/agile/1.0/board/{board_id}/issue", self.base_url);
            let matches = self
                .count_issues_at(&url, &format!("issue = {issue_key}"))
                .await?;
            debug!(issue_key, %board_id, matches, "checked board for issue");
            if matches == 1 {
                containing.push(board_id);
            }
        }
        Ok(containing)
    }
}

fn check_status(status: StatusCode) -> Result<(), DataSourceError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(DataSourceError::Unauthorized);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(DataSourceError::NotFound);
    }
    if !status.is_success() {
        return Err(DataSourceError::Connection);
    }
    Ok(())
}

/// Start offset of the next page, if the response says there is one.
fn next_start_at(payload: &Value, page_len: usize) -> Option<u64> {
    if payload
        .get("isLast")
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
        || page_len == 0
    {
        return None;
    }

    let start_at = payload.get("startAt").and_then(|value| value.as_u64())?;
    let next_start_at = start_at.saturating_add(page_len as u64);
    match payload.get("total").and_then(|value| value.as_u64()) {
        Some(total) if next_start_at < total => Some(next_start_at),
        Some(_) => None,
        // Sprint listings carry `isLast` instead of a total.
        None if payload.get("isLast").is_some() => Some(next_start_at),
        None => None,
    }
}

fn projects_clause(project_ids: &[String]) -> String {
    format!("project in ({})", project_ids.join(", "))
}

fn board_status_jql(status_categories: &[&str]) -> String {
    let categories: Vec<String> = status_categories
        .iter()
        .map(|category| format!("\"{category}\""))
        .collect();
    format!(
        "{STANDARD_ISSUES} AND statusCategory in ({})",
        categories.join(", ")
    )
}

/// `(start, end)` day offsets of each history interval, most recent first.
fn interval_windows(interval_days: u64, history_days: u64) -> Vec<(u64, u64)> {
    let mut windows = Vec::new();
    if interval_days == 0 {
        return windows;
    }
    let mut start = interval_days;
    let mut end = 0;
    while start <= history_days {
        windows.push((start, end));
        start += interval_days;
        end += interval_days;
    }
    windows
}
