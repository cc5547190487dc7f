use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("bisca.yaml");
    let save_dir = dir.join("saves");
    let yaml = format!(
        "player_name: Ada\nplayers: 3\nvariant: trump_follow_suit\nseed: 7\n\
         delays:\n  bot_turn_ms: 0\n  trick_display_ms: 0\n  next_round_ms: 0\n  resume_ms: 0\n\
         save_dir: {save_dir:?}\n{extra}"
    );
    fs::write(&path, yaml).unwrap();
    path
}

fn bisca() -> Command {
    Command::cargo_bin("bisca").unwrap()
}

fn saved(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("saves").join("biscaGameState.json")).unwrap()
}

#[test]
fn validate_only_skips_the_game() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    bisca()
        .arg("--config")
        .arg(&config)
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded configuration for Ada with 3 players"))
        .stdout(predicate::str::contains("trump_follow_suit"))
        .stdout(predicate::str::contains("Validation-only mode"));
    assert!(!dir.path().join("saves").exists());
}

#[test]
fn invalid_player_count_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    bisca()
        .arg("--config")
        .arg(&config)
        .args(["--players", "12", "--validate-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("players"));
}

#[test]
fn missing_config_is_reported() {
    let dir = TempDir::new().unwrap();
    bisca()
        .arg("--config")
        .arg(dir.path().join("nope.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn autopilot_game_runs_to_the_end_and_is_saved() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    bisca()
        .arg("--config")
        .arg(&config)
        .args(["--autopilot", "--variant", "absolute"])
        .assert()
        .success()
        .stdout(predicate::str::contains("absolute_rank rules"))
        .stdout(predicate::str::contains("Game over."))
        .stdout(predicate::str::contains("1. "));
    assert!(saved(&dir).contains("\"phase\": \"finished\""));
}

#[test]
fn quit_game_resumes_where_it_stopped() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    bisca()
        .arg("--config")
        .arg(&config)
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved."));
    let snapshot = saved(&dir);
    assert!(snapshot.contains("\"phase\": \"playing\""));
    assert!(snapshot.contains("\"declaration\": 2"));

    bisca()
        .arg("--config")
        .arg(&config)
        .args(["--resume", "--autopilot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Game over."))
        .stdout(predicate::str::contains("== Round 2"));
}

#[test]
fn restart_discards_the_saved_game() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    bisca()
        .arg("--config")
        .arg(&config)
        .write_stdin("3\n")
        .assert()
        .success();
    assert!(saved(&dir).contains("\"declaration\": 3"));

    bisca()
        .arg("--config")
        .arg(&config)
        .arg("--restart")
        .write_stdin("")
        .assert()
        .success();
    let snapshot = saved(&dir);
    assert!(snapshot.contains("\"phase\": \"declaration\""));
    assert!(!snapshot.contains("\"declaration\": 3"));
}

#[test]
fn structured_logging_writes_json_lines() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("log.jsonl");
    let config = write_config(
        dir.path(),
        &format!("logging:\n  enable_structured: true\n  tracing_level: info\n  log_file: {log:?}\n"),
    );
    bisca()
        .arg("--config")
        .arg(&config)
        .arg("--autopilot")
        .env_remove("RUST_LOG")
        .assert()
        .success();
    let lines = fs::read_to_string(&log).unwrap();
    assert!(lines.contains("\"game started\""));
    assert!(lines.contains("\"round scored\""));
}
