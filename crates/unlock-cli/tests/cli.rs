//! Smoke tests for the `unlock` binary.
#![expect(clippy::expect_used, reason = "tests require descriptive panic messages")]

use std::io::Write;
use std::str;

use assert_cmd::Command;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

#[fixture]
fn dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary dataset");
    write!(
        file,
        r#"{{
            "COMP1511": "",
            "COMP1521": "Prerequisite: COMP1511 or DPST1091",
            "COMP2521": "COMP1511 OR (MATH1131 AND COMP1521)",
            "COMP3900": "24 units of credit",
            "COMP9999": "COMP1511 and (COMP1521"
        }}"#
    )
    .expect("dataset written");
    file
}

fn unlock(dataset: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("unlock").expect("binary exists");
    cmd.env_remove("UNLOCK_LOG_LEVEL")
        .env_remove("UNLOCK_CONDITIONS")
        .arg("--conditions")
        .arg(dataset.path());
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("runs");
    assert!(output.status.success(), "command failed: {output:?}");
    str::from_utf8(&output.stdout).expect("utf8").to_owned()
}

#[rstest]
#[case("MATH1131,COMP1521", "COMP2521: unlocked\n")]
#[case("MATH1131", "COMP2521: locked\n")]
fn check_reports_verdict(dataset: NamedTempFile, #[case] completed: &str, #[case] expected: &str) {
    let stdout = stdout_of(unlock(&dataset).args(["check", "COMP2521", "--completed", completed]));
    assert_eq!(stdout, expected);
}

#[rstest]
fn check_without_completed_courses_uses_empty_list(dataset: NamedTempFile) {
    let stdout = stdout_of(unlock(&dataset).args(["check", "COMP1511", "--json"]));
    assert_eq!(stdout, "{\"target\":\"COMP1511\",\"unlocked\":true}\n");
}

#[rstest]
fn explain_shows_tokens_and_tree(dataset: NamedTempFile) {
    let stdout = stdout_of(unlock(&dataset).args(["explain", "COMP2521"]));
    assert!(stdout.contains("tokens: COMP1511 OR ( MATH1131 AND COMP1521 )"));
    assert!(stdout.contains("tree:   (COMP1511 OR (MATH1131 AND COMP1521))"));
}

#[rstest]
fn explain_json_includes_tree(dataset: NamedTempFile) {
    let stdout = stdout_of(unlock(&dataset).args(["explain", "COMP3900", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(
        value.get("tree"),
        Some(&serde_json::json!({ "kind": "credit_count", "units": 24 }))
    );
}

#[rstest]
fn unlocked_lists_reachable_courses(dataset: NamedTempFile) {
    let stdout = stdout_of(unlock(&dataset).args(["unlocked", "--completed", "COMP1511"]));
    assert_eq!(stdout, "COMP1521\nCOMP2521\n");
}

#[rstest]
fn unknown_course_exits_with_failure(dataset: NamedTempFile) {
    let output = unlock(&dataset)
        .args(["check", "PHYS1121"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stderr = str::from_utf8(&output.stderr).expect("utf8");
    assert!(stderr.contains("PHYS1121"));
}

#[rstest]
fn malformed_prerequisite_exits_with_failure(dataset: NamedTempFile) {
    let output = unlock(&dataset)
        .args(["check", "COMP9999"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
}

#[rstest]
fn invalid_log_level_is_a_configuration_error(dataset: NamedTempFile) {
    let output = unlock(&dataset)
        .env("UNLOCK_LOG_LEVEL", "chatty")
        .args(["check", "COMP1511"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_dataset_exits_with_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = Command::cargo_bin("unlock")
        .expect("binary exists")
        .env_remove("UNLOCK_LOG_LEVEL")
        .env("UNLOCK_CONDITIONS", dir.path().join("absent.json"))
        .args(["check", "COMP1511"])
        .output()
        .expect("runs");
    assert_eq!(output.status.code(), Some(1));
}
