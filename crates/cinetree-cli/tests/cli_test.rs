#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinetree");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tv"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("configuration"));
}

#[test]
fn test_tv_on_the_air_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinetree");
    cmd.args(["tv", "on-the-air", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--language"));
}

#[test]
fn test_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinetree");
    cmd.args(["search", "movie"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_movie_requires_numeric_id() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinetree");
    cmd.args(["movie", "fight-club"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_api_key_fails_before_network() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinetree");
    cmd.env_remove("TMDB_API_KEY")
        .args(["configuration", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("TMDB_API_KEY"));
}

#[test]
fn test_unreachable_service_is_bootstrap_failure() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[tmdb]\napi_key = \"k\"\nbase_url = \"http://127.0.0.1:1/3/\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinetree");
    cmd.args(["tv", "popular", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("session bootstrap failed"));
}

#[test]
fn test_init_writes_config() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut cmd = cargo_bin_cmd!("cinetree");
    cmd.args(["init", "--api-key", "abc", "--language", "ja-JP", "--dir"])
        .arg(dir.path())
        .assert()
        .success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("[tmdb]"));
    assert!(written.contains("api_key = \"abc\""));
    assert!(written.contains("language = \"ja-JP\""));
}
