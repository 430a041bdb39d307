use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("wren")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("posts"))
        .stdout(predicate::str::contains("delete-account"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_posts_help_shows_author_filter() {
    cargo_bin_cmd!("wren")
        .args(["posts", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("author"));
}

#[test]
fn test_post_help_shows_tag_flag() {
    cargo_bin_cmd!("wren")
        .args(["post", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--tag"))
        .stdout(predicate::str::contains("--message"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("wren")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
