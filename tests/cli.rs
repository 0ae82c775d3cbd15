//! Integration tests for the activity-helper binary.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn run_helper(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_activity-helper");
    Command::new(bin)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run activity-helper binary")
}

/// Write a config pointing the helper at `workspace` with the given git binary
fn write_config(dir: &Path, workspace: &Path, git_binary: &str) -> String {
    let path = dir.join("activity-helper.toml");
    let content = format!(
        "[workspace]\nbase_dir = {:?}\n\n[git]\nrepo_dir = {:?}\nbinary = {:?}\n",
        workspace.to_string_lossy(),
        workspace.to_string_lossy(),
        git_binary
    );
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

fn parse_stdout(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1, "expected one line, got: {}", stdout);
    serde_json::from_str(stdout.trim()).expect("stdout is not valid JSON")
}

#[test]
fn report_lists_dated_learning() {
    let dir = TempDir::new().unwrap();
    let learnings = dir.path().join("memory/learnings");
    fs::create_dir_all(&learnings).unwrap();
    fs::write(learnings.join("foo-2024-01-01.md"), b"0123456789").unwrap();
    fs::write(learnings.join("bar-2024-01-02.md"), b"nope").unwrap();
    let config = write_config(dir.path(), dir.path(), "activity-helper-no-such-git");

    let output = run_helper(&["--config", &config, "--date", "2024-01-01"]);
    assert!(output.status.success());

    let report = parse_stdout(&output);
    assert_eq!(report["date"], "2024-01-01");
    assert_eq!(
        report["learnings"],
        serde_json::json!([{
            "path": learnings.join("foo-2024-01-01.md").to_string_lossy(),
            "size": 10,
            "name": "foo-2024-01-01.md",
        }])
    );
}

#[test]
fn missing_folder_and_missing_git_yield_empty_sections() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), dir.path(), "activity-helper-no-such-git");

    let output = run_helper(&["--config", &config, "--date", "2024-01-01"]);
    assert!(output.status.success());
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report = parse_stdout(&output);
    assert_eq!(report["retrospectives"], serde_json::json!([]));
    assert_eq!(report["commits"], serde_json::json!([]));
}

#[test]
fn output_keys_are_in_fixed_order() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), dir.path(), "activity-helper-no-such-git");

    let output = run_helper(&["--config", &config, "--date", "2024-01-01"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let keys = ["date", "learnings", "retrospectives", "drafts", "commits"];
    let positions: Vec<usize> = keys
        .iter()
        .map(|key| stdout.find(&format!("\"{}\"", key)).expect("key missing from report"))
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

/// Write an executable shell script, closing it before anything can run it
#[cfg(unix)]
fn write_script(path: &Path, body: &str) {
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    let mut file = fs::File::create(path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.set_permissions(fs::Permissions::from_mode(0o755)).unwrap();
    file.sync_all().unwrap();
    drop(file);
}

#[cfg(unix)]
#[test]
fn commits_come_from_git_log() {
    let dir = TempDir::new().unwrap();
    let fake_git = dir.path().join("fake-git");
    write_script(
        &fake_git,
        "#!/bin/sh\n\
         printf 'abc123|Fix bug in parser\\n'\n\
         printf 'xyz789|Add new feature for users with a very long title that exceeds sixty characters total\\n'\n\
         printf 'not a commit line\\n'\n\
         printf 'win001|%s\\n' \"$6\"\n",
    );
    let config = write_config(dir.path(), dir.path(), &fake_git.to_string_lossy());

    // A child forked by a parallel test can briefly hold the script's write
    // handle, making exec fail with ETXTBSY and the commit section empty
    let mut report = Value::Null;
    for _ in 0..10 {
        let output = run_helper(&["--config", &config, "--date", "2024-01-01"]);
        assert!(output.status.success());
        report = parse_stdout(&output);
        if report["commits"].as_array().map_or(false, |c| !c.is_empty()) {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }

    let commits = report["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 3);
    assert_eq!(commits[0]["hash"], "abc123");
    assert_eq!(commits[0]["msg"], "Fix bug in parser");
    assert_eq!(commits[1]["hash"], "xyz789");
    assert_eq!(commits[1]["msg"].as_str().unwrap().chars().count(), 60);
    // Sixth git argument is the lower bound of the time window
    assert_eq!(commits[2]["msg"], "2024-01-01 00:00");
}

#[test]
fn pretty_flag_prints_multiline_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), dir.path(), "activity-helper-no-such-git");

    let output = run_helper(&["--config", &config, "--date", "2024-01-01", "--pretty"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().count() > 1);
    let report: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["drafts"], serde_json::json!([]));
}

#[test]
fn invalid_date_exits_with_error() {
    let output = run_helper(&["--date", "not-a-date"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn runs_without_arguments() {
    let output = run_helper(&[]);
    assert!(output.status.success());

    let report = parse_stdout(&output);
    for key in ["date", "learnings", "retrospectives", "drafts", "commits"] {
        assert!(report.get(key).is_some(), "missing key {}", key);
    }
}
