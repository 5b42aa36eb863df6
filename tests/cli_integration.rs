mod common;

use assert_cmd::Command;
use common::write_file;
use predicates::prelude::*;
use tempfile::TempDir;

const SCORERS: &str = r#"{
  "scorers": [
    {"type": "query", "module": "query_type_scorer", "class": "ProperNounRatioScorer",
     "init_args": {"short_name": "qs"}},
    {"type": "document", "module": "document_rating_scorer", "class": "PopularityScorer",
     "init_args": {"short_name": "ds"}}
  ]
}"#;

/// Command with a config path that does not exist, so only defaults apply
fn rr_scorers(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rr-scorers").unwrap();
    cmd.arg("--config")
        .arg(temp_dir.path().join("config.yaml"))
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("rr-scorers").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("feature vectors"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("rr-scorers").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = Command::cargo_bin("rr-scorers").unwrap();
    cmd.assert().failure();
}

#[test]
fn test_cli_classes() {
    let temp_dir = TempDir::new().unwrap();
    rr_scorers(&temp_dir)
        .arg("classes")
        .assert()
        .success()
        .stdout(predicate::str::contains("PopularityScorer"))
        .stdout(predicate::str::contains("query_definition_scorer"));
}

#[test]
fn test_cli_headers() {
    let temp_dir = TempDir::new().unwrap();
    let scorers = write_file(temp_dir.path(), "scorers.json", SCORERS);

    rr_scorers(&temp_dir)
        .arg("--scorers")
        .arg(&scorers)
        .args(["headers", "--format", "csv"])
        .assert()
        .success()
        .stdout("ds,qs\n");
}

#[test]
fn test_cli_fields() {
    let temp_dir = TempDir::new().unwrap();
    let scorers = write_file(temp_dir.path(), "scorers.json", SCORERS);

    rr_scorers(&temp_dir)
        .arg("--scorers")
        .arg(&scorers)
        .arg("fields")
        .assert()
        .success()
        .stdout("q\n");
}

#[test]
fn test_cli_score_json() {
    let temp_dir = TempDir::new().unwrap();
    let scorers = write_file(temp_dir.path(), "scorers.json", SCORERS);

    let output = rr_scorers(&temp_dir)
        .arg("--scorers")
        .arg(&scorers)
        .args([
            "score",
            "--query",
            r#"{"q": "reset password"}"#,
            "--document",
            r#"{"views": 10, "accepted": 1}"#,
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["headers"], serde_json::json!(["ds", "qs"]));
    assert_eq!(value["rows"][0]["vector"], serde_json::json!([0.5, 0.0]));
}

#[test]
fn test_cli_score_failure_names_scorer() {
    let temp_dir = TempDir::new().unwrap();
    let scorers = write_file(temp_dir.path(), "scorers.json", SCORERS);

    rr_scorers(&temp_dir)
        .arg("--scorers")
        .arg(&scorers)
        .args(["score", "--document", r#"{"views": 10, "accepted": 1}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("qs"));
}

#[test]
fn test_cli_batch_csv() {
    let temp_dir = TempDir::new().unwrap();
    let scorers = write_file(temp_dir.path(), "scorers.json", SCORERS);
    let input = write_file(
        temp_dir.path(),
        "pairs.ndjson",
        concat!(
            r#"{"query": {"q": "IBM Watson"}, "document": {"views": 6000, "accepted": 1}}"#,
            "\n",
            r#"{"query": {"q": "reset"}, "document": {"views": 6000, "accepted": 0}}"#,
            "\n"
        ),
    );

    rr_scorers(&temp_dir)
        .arg("--scorers")
        .arg(&scorers)
        .arg("batch")
        .arg(&input)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout("ds,qs\n1,1\n,0\n");
}

#[test]
fn test_cli_validate_rejects_duplicate_short_name() {
    let temp_dir = TempDir::new().unwrap();
    let scorers = write_file(
        temp_dir.path(),
        "scorers.json",
        &SCORERS.replace(r#""short_name": "qs""#, r#""short_name": "ds""#),
    );

    rr_scorers(&temp_dir)
        .arg("--scorers")
        .arg(&scorers)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("short_name=ds"));
}

#[test]
fn test_cli_validate_ok() {
    let temp_dir = TempDir::new().unwrap();
    let scorers = write_file(temp_dir.path(), "scorers.json", SCORERS);

    rr_scorers(&temp_dir)
        .arg("--scorers")
        .arg(&scorers)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 scorers OK"));
}
