//! Integration tests for list and stats commands

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{init_vault, mindvault_cmd, new_entry};

#[test]
fn test_list_no_entries() {
    let temp = TempDir::new().unwrap();
    init_vault(temp.path());

    mindvault_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries yet"));
}

#[test]
fn test_list_newest_first() {
    let temp = TempDir::new().unwrap();
    init_vault(temp.path());
    new_entry(temp.path(), &["--title", "One"]);
    new_entry(temp.path(), &["--title", "Two"]);
    new_entry(temp.path(), &["--title", "Three"]);

    let output = mindvault_cmd()
        .current_dir(temp.path())
        .arg("list")
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("Three"));
    assert!(lines[1].ends_with("Two"));
    assert!(lines[2].ends_with("One"));
}

#[test]
fn test_list_search_title_or_content() {
    let temp = TempDir::new().unwrap();
    init_vault(temp.path());
    new_entry(temp.path(), &["--title", "Morning Walk"]);
    new_entry(
        temp.path(),
        &["--title", "Night Thoughts", "--content", "walked home"],
    );
    new_entry(temp.path(), &["--title", "Groceries"]);

    let output = mindvault_cmd()
        .current_dir(temp.path())
        .args(["list", "--search", "WALK"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Night Thoughts"));
    assert!(lines[1].ends_with("Morning Walk"));
}

#[test]
fn test_list_search_no_results() {
    let temp = TempDir::new().unwrap();
    init_vault(temp.path());
    new_entry(temp.path(), &["--title", "Morning Walk"]);

    mindvault_cmd()
        .current_dir(temp.path())
        .args(["list", "-s", "holiday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));
}

#[test]
fn test_list_limit() {
    let temp = TempDir::new().unwrap();
    init_vault(temp.path());
    new_entry(temp.path(), &["--title", "One"]);
    new_entry(temp.path(), &["--title", "Two"]);

    let output = mindvault_cmd()
        .current_dir(temp.path())
        .args(["list", "--limit", "1"])
        .output()
        .unwrap();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("Two"));
}

#[test]
fn test_stats_empty_vault() {
    let temp = TempDir::new().unwrap();
    init_vault(temp.path());

    mindvault_cmd()
        .current_dir(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Radiant"))
        .stdout(predicate::str::contains("Gloomy"))
        .stdout(predicate::str::contains("0 entries"))
        .stdout(predicate::str::contains("You've recorded 0 memories"));
}

#[test]
fn test_stats_counts_moods() {
    let temp = TempDir::new().unwrap();
    init_vault(temp.path());
    new_entry(temp.path(), &["--mood", "happy"]);
    new_entry(temp.path(), &["--mood", "happy"]);
    new_entry(temp.path(), &["--mood", "neutral"]);

    mindvault_cmd()
        .current_dir(temp.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Happy    {} 2 entries",
            "#".repeat(20)
        )))
        .stdout(predicate::str::contains("1 entries"))
        .stdout(predicate::str::contains("You've recorded 3 memories"));
}
