//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mathdrill(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mathdrill").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("MATHDRILL_HISTORY")
        .env_remove("RUST_LOG");
    cmd
}

/// Answers `play` will expect for the same options, in order.
fn answers(home: &Path, args: &[&str]) -> Vec<i64> {
    let output = mathdrill(home)
        .arg("problems")
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let problems: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    problems
        .iter()
        .map(|p| p["answer"].as_i64().unwrap())
        .collect()
}

fn read_history(path: &Path) -> Vec<serde_json::Value> {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

const MARATHON: &[&str] = &[
    "--mode",
    "marathon",
    "--operation",
    "+",
    "--first-digits",
    "1",
    "--second-digits",
    "1",
    "--count",
    "5",
    "--seed",
    "7",
];

const SURVIVAL: &[&str] = &[
    "--mode",
    "survival",
    "--operation",
    "*",
    "--first-digits",
    "2",
    "--second-digits",
    "1",
    "--seed",
    "3",
];

#[test]
fn problems_are_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let first = answers(dir.path(), MARATHON);
    let second = answers(dir.path(), MARATHON);
    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    assert!(first.iter().all(|a| (2..=18).contains(a)));
}

#[test]
fn problems_text_lists_limit_for_unbounded_modes() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["problems", "--mode", "sprint", "--limit", "3", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  3. "))
        .stdout(predicate::str::contains("  4. ").not());
}

#[test]
fn marathon_all_correct_is_saved() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    let input: String = answers(dir.path(), MARATHON)
        .iter()
        .map(|a| format!("{a}\n"))
        .collect();

    mathdrill(dir.path())
        .arg("play")
        .args(MARATHON)
        .arg("--history")
        .arg(&history)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Session complete (marathon)"))
        .stdout(predicate::str::contains("Score: 5 / 5"));

    let entries = read_history(&history);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["mode"], "marathon");
    assert_eq!(entries[0]["score"], 5);
    assert_eq!(entries[0]["totalQuestions"], 5);
}

#[test]
fn survival_stops_at_first_mistake() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    let expected = answers(dir.path(), &[SURVIVAL, &["--limit", "3"][..]].concat());
    let input = format!(
        "{}\n{}\n{}\n{}\n",
        expected[0],
        expected[1],
        expected[2] + 1,
        expected[2]
    );

    mathdrill(dir.path())
        .arg("play")
        .args(SURVIVAL)
        .arg("--history")
        .arg(&history)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2 / 3"))
        .stdout(predicate::str::contains("WRONG"));

    let entries = read_history(&history);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["mode"], "survival");
    assert_eq!(entries[0]["totalQuestions"], 3);
}

#[test]
fn quitting_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    let first = answers(dir.path(), MARATHON)[0];

    mathdrill(dir.path())
        .arg("play")
        .args(MARATHON)
        .arg("--history")
        .arg(&history)
        .write_stdin(format!("{first}\nq\n"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted, session discarded (1 answered"));

    assert!(!history.exists());
}

#[test]
fn closed_input_aborts() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    mathdrill(dir.path())
        .arg("play")
        .args(MARATHON)
        .arg("--history")
        .arg(&history)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Input closed"));

    assert!(!history.exists());
}

#[test]
fn non_numeric_input_is_pending() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");

    mathdrill(dir.path())
        .arg("play")
        .args(MARATHON)
        .arg("--history")
        .arg(&history)
        .write_stdin("abc\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("enter a number"))
        .stdout(predicate::str::contains("(0 answered"));
}

#[test]
fn history_shows_trend() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    std::fs::write(
        &history,
        r#"[
  {"mode":"sprint","score":10,"totalQuestions":12,"avgTime":3.0,"timestamp":1700000000000},
  {"mode":"marathon","score":5,"totalQuestions":5,"avgTime":2.0,"timestamp":1700000100000},
  {"mode":"sprint","score":14,"totalQuestions":15,"avgTime":2.5,"timestamp":1700000200000}
]"#,
    )
    .unwrap();

    mathdrill(dir.path())
        .args(["history", "--mode", "sprint", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("14 / 15"))
        .stdout(predicate::str::contains("Trend over 2 sprint games"))
        .stdout(predicate::str::contains("0.50s faster"));
}

#[test]
fn history_json_filters_mode() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    std::fs::write(
        &history,
        r#"[{"mode":"sprint","score":1,"totalQuestions":1,"avgTime":1.0,"timestamp":0},
            {"mode":"survival","score":2,"totalQuestions":3,"avgTime":1.0,"timestamp":1}]"#,
    )
    .unwrap();

    let output = mathdrill(dir.path())
        .args(["history", "--mode", "survival", "--format", "json", "--history"])
        .arg(&history)
        .output()
        .unwrap();
    assert!(output.status.success());
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["score"], 2);
}

#[test]
fn corrupt_history_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.json");
    std::fs::write(&history, "not json at all").unwrap();

    mathdrill(dir.path())
        .args(["history", "--mode", "marathon", "--history"])
        .arg(&history)
        .assert()
        .success()
        .stdout(predicate::str::contains("No marathon history yet."));
}

#[test]
fn invalid_digits_rejected() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["problems", "--first-digits", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("digit count must be between 1 and 3"));
}

#[test]
fn init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    mathdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mathdrill.toml"));
    assert!(dir.path().join("mathdrill.toml").exists());

    mathdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn local_config_sets_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mathdrill.toml"),
        "default_mode = \"marathon\"\n[quiz]\noperation = \"-\"\ncount = 15\n",
    )
    .unwrap();

    mathdrill(dir.path())
        .args(["problems", "--seed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 15. "))
        .stdout(predicate::str::contains(" - "));
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(dir.path())
        .args(["problems", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
