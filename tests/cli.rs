use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn help_lists_merge_option() {
    Command::cargo_bin("silencecut")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--merge-seconds"));
}

#[test]
fn missing_input_is_rejected() {
    let out = tempdir().unwrap();
    Command::cargo_bin("silencecut")
        .unwrap()
        .arg("/nonexistent/take.wav")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file does not exist"));
}

#[test]
fn non_positive_budget_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("take.wav");
    std::fs::write(&input, b"RIFF").unwrap();
    Command::cargo_bin("silencecut")
        .unwrap()
        .arg(&input)
        .arg(dir.path().join("out"))
        .args(["--merge-seconds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Merge duration must be positive"));
}
