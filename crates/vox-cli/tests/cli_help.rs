use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("vox")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("polls"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_polls_help_shows_subcommands() {
    cargo_bin_cmd!("vox")
        .args(["polls", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("vote"))
        .stdout(predicate::str::contains("results"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("vox")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("vox")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vox"));
}
