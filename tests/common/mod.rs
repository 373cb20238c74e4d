#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use assert_fs::prelude::*;
use serde_json::{Value, json};
use warp::Filter;

/// Comments posted to the mock Jira, as `(issue key, body)`.
pub type PostedComments = Arc<Mutex<Vec<(String, String)>>>;

const KANBAN_IN_PROGRESS: &[&str] = &["ABC-1"];
const KANBAN_TO_DO: &[&str] = &["ABC-2", "ABC-3"];

/// Starts a Jira stand-in.
///
/// - Kanban board 74 holds ABC-1 (in progress), ABC-2 and ABC-3 (to do).
///   Project ABC also owns board 75, which is empty.
/// - Scrum board 9 lists future sprints 5 and 6, then active sprint 7, over two
///   pages. Each sprint holds `S-<sprint>`, and the backlog holds B-1 and B-2
///   on two pages.
/// - 2 bugs and 8 other tickets were created and 16 resolved over the history
///   window. Each history interval resolved 3 tickets.
/// - ABC-3 and ABC-50 carry the `forecast` label. ABC-50 is on no board.
pub fn start_mock_jira() -> (SocketAddr, PostedComments) {
    let comments: PostedComments = Arc::new(Mutex::new(Vec::new()));

    let boards = warp::path!("rest" / "agile" / "1.0" / "board")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|query: HashMap<String, String>| {
            let project = query.get("projectKeyOrId").cloned().unwrap_or_default();
            let page = match (project.as_str(), start_at(&query)) {
                ("ABC", 0) => json!({ "startAt": 0, "maxResults": 1, "isLast": false, "values": [{ "id": 74 }] }),
                ("ABC", _) => json!({ "startAt": 1, "maxResults": 1, "isLast": true, "values": [{ "id": 75 }] }),
                _ => json!({ "startAt": 0, "maxResults": 50, "isLast": true, "values": [] }),
            };
            warp::reply::json(&page)
        });

    let board = warp::path!("rest" / "agile" / "1.0" / "board" / String)
        .and(warp::get())
        .map(|board_id: String| {
            let board_type = if board_id == "9" { "scrum" } else { "kanban" };
            warp::reply::json(&json!({ "id": board_id, "type": board_type }))
        });

    let board_issues = warp::path!("rest" / "agile" / "1.0" / "board" / String / "issue")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|board_id: String, query: HashMap<String, String>| {
            let jql = query.get("jql").cloned().unwrap_or_default();
            if let Some(issue_key) = jql.strip_prefix("issue = ") {
                let on_board = board_id == "74"
                    && KANBAN_IN_PROGRESS
                        .iter()
                        .chain(KANBAN_TO_DO)
                        .any(|key| *key == issue_key);
                let total = if on_board { 1 } else { 0 };
                return warp::reply::json(&json!({ "startAt": 0, "maxResults": 0, "total": total, "issues": [] }));
            }
            let keys: &[&str] = if board_id != "74" {
                &[]
            } else if jql.contains("\"In Progress\"") {
                KANBAN_IN_PROGRESS
            } else {
                KANBAN_TO_DO
            };
            warp::reply::json(&issue_page(keys))
        });

    let sprints = warp::path!("rest" / "agile" / "1.0" / "board" / String / "sprint")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|_board_id: String, query: HashMap<String, String>| {
            let page = if start_at(&query) == 0 {
                json!({
                    "startAt": 0,
                    "maxResults": 2,
                    "isLast": false,
                    "values": [{ "id": 5, "state": "future" }, { "id": 6, "state": "future" }],
                })
            } else {
                json!({
                    "startAt": 2,
                    "maxResults": 2,
                    "isLast": true,
                    "values": [{ "id": 7, "state": "active" }],
                })
            };
            warp::reply::json(&page)
        });

    let sprint_issues = warp::path!("rest" / "agile" / "1.0" / "board" / String / "sprint" / u64 / "issue")
        .and(warp::get())
        .map(|_board_id: String, sprint_id: u64| {
            warp::reply::json(&issue_page(&[format!("S-{sprint_id}").as_str()]))
        });

    let backlog = warp::path!("rest" / "agile" / "1.0" / "board" / String / "backlog")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|_board_id: String, query: HashMap<String, String>| {
            let start = start_at(&query);
            let key = if start == 0 { "B-1" } else { "B-2" };
            warp::reply::json(&json!({
                "startAt": start,
                "maxResults": 1,
                "total": 2,
                "issues": [{ "key": key }],
            }))
        });

    let search = warp::path!("rest" / "api" / "2" / "search")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|query: HashMap<String, String>| {
            let jql = query.get("jql").cloned().unwrap_or_default();
            if query.get("maxResults").map(|value| value.as_str()) == Some("0") {
                let total = if jql.contains("issuetype = \"Bug\"") {
                    2
                } else if jql.contains("issuetype != \"Bug\"") {
                    8
                } else {
                    16
                };
                return warp::reply::json(&json!({ "startAt": 0, "maxResults": 0, "total": total, "issues": [] }));
            }
            let keys: &[&str] = if jql.starts_with("labels = forecast") {
                &["ABC-3", "ABC-50"]
            } else if jql.starts_with("labels = ") {
                &[]
            } else if jql.contains("resolved >= -14d") {
                &["ABC-10", "ABC-11", "ABC-12"]
            } else {
                &["ABC-20", "ABC-21", "ABC-22"]
            };
            warp::reply::json(&issue_page(keys))
        });

    let posted = comments.clone();
    let comment = warp::path!("rest" / "api" / "2" / "issue" / String / "comment")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |issue_key: String, body: Value| {
            let text = body
                .get("body")
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string();
            posted.lock().unwrap().push((issue_key, text));
            warp::reply::json(&json!({ "id": "10000" }))
        });

    let routes = boards
        .or(board)
        .or(board_issues)
        .or(sprints)
        .or(sprint_issues)
        .or(backlog)
        .or(search)
        .or(comment);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, comments)
}

fn start_at(query: &HashMap<String, String>) -> u64 {
    query
        .get("startAt")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

fn issue_page(keys: &[&str]) -> Value {
    let issues: Vec<Value> = keys.iter().map(|key| json!({ "key": key })).collect();
    json!({
        "startAt": 0,
        "maxResults": 1000,
        "total": issues.len(),
        "issues": issues,
    })
}

pub fn write_config(addr: SocketAddr, extra: &str) -> assert_fs::NamedTempFile {
    let config_yaml = format!(
        r#"
base_url: http://{addr}
board_id: "74"
num_weeks_of_history: 4
time_length: 2
time_unit: weeks
num_simulations: 20
confidence_percentage_threshold: 80
{extra}
"#
    );

    let config_file = assert_fs::NamedTempFile::new("forecast_config.yaml").unwrap();
    config_file.write_str(&config_yaml).unwrap();
    config_file
}
