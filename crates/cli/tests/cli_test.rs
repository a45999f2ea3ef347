//! CLI surface tests that do not need a running NLP worker

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("casegraph")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("entities"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn test_missing_subcommand_fails() {
    Command::cargo_bin("casegraph")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("casegraph")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
