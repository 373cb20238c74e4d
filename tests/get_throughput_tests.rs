mod common;

use predicates::prelude::*;
use std::fs;
use tokio::task;

use common::{start_mock_jira, write_config};

#[tokio::test]
async fn test_get_throughput_data() {
    let (addr, _comments) = start_mock_jira();
    let config_file = write_config(addr, "");
    let config_arg = config_file.path().to_str().unwrap().to_string();

    let output_file = assert_fs::NamedTempFile::new("test_output.yaml").unwrap();
    let output_arg = output_file.path().to_str().unwrap().to_string();

    let output_for_cmd = output_arg.clone();
    task::spawn_blocking(move || {
        let mut cmd = assert_cmd::cargo_bin_cmd!("ticket-forecast");
        cmd.env("JIRA_USERNAME", "mockuser")
            .env("JIRA_API_TOKEN", "mocktoken")
            .args(["get-throughput", "-c", &config_arg, "-o", &output_for_cmd]);

        cmd.assert()
            .success()
            .stdout(predicate::str::contains("Throughput data written to"));
    })
    .await
    .unwrap();

    let output = fs::read_to_string(&output_arg).unwrap();

    // Two intervals of two weeks in four weeks of history.
    assert!(output.contains("interval: 1"));
    assert!(output.contains("- ABC-10"));
    assert!(output.contains("interval: 2"));
    assert!(output.contains("- ABC-20"));
    assert!(output.contains("resolved: 3"));
    assert!(!output.contains("interval: 3"));
}
