// ABOUTME: Integration tests for the bemkit CLI binary.
// ABOUTME: Runs each subcommand against HTML written to temp files or piped through stdin.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const CARD: &str = r#"<!DOCTYPE html>
<html>
<body>
<div id="card" class="card card--wide">
    <h2 class="card__title">Title</h2>
    <div class="layout">
        <p class="card__body-text card__body-text--muted">Body</p>
        <a id="more" class="card__link">More</a>
    </div>
</div>
<p id="plain">No classes</p>
<span class="card__title">Outside</span>
</body>
</html>"#;

fn bemkit_cmd() -> Command {
    Command::cargo_bin("bemkit").unwrap()
}

fn write_card(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("card.html");
    fs::write(&path, CARD).unwrap();
    path
}

#[test]
fn inspect_summarizes_block() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("inspect")
        .arg(&path)
        .arg("--selector")
        .arg("#card")
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""key":"$bareBlock""#))
        .stdout(predicate::str::contains(r#""key":"bodyText""#))
        .stdout(predicate::str::contains(r#""total":4"#))
        .stdout(predicate::str::contains(r#""traversal":"element""#));
}

#[test]
fn inspect_global_counts_whole_body() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("inspect")
        .arg(&path)
        .arg("--global")
        .arg("--block")
        .arg("card")
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""total":5"#))
        .stdout(predicate::str::contains(r#""traversal":"global""#));
}

#[test]
fn inspect_from_block_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("inspect")
        .arg(&path)
        .arg("--selector")
        .arg("#more")
        .arg("--root")
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""key":"title""#))
        .stdout(predicate::str::contains(r#""traversal":"block-root""#));
}

#[test]
fn inspect_missing_required_key_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("inspect")
        .arg(&path)
        .arg("--selector")
        .arg("#card")
        .arg("--require")
        .arg("title,footer")
        .assert()
        .failure()
        .stderr(predicate::str::contains("footer"));
}

#[test]
fn inspect_without_selector_or_global_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("inspect")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--selector"));
}

#[test]
fn identify_prints_identities() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("identify")
        .arg(&path)
        .arg("--selector")
        .arg(".card__body-text, #plain")
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""block":"card""#))
        .stdout(predicate::str::contains(r#""element":"body-text""#))
        .stdout(predicate::str::contains(r#""modifiers":["muted"]"#))
        .stdout(predicate::str::contains(r#""identity":null"#));
}

#[test]
fn find_returns_matching_html() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("find")
        .arg(&path)
        .arg("--selector")
        .arg("#more")
        .arg("--element")
        .arg("title")
        .arg("--root")
        .assert()
        .success()
        .stdout(predicate::str::contains("Title"))
        .stdout(predicate::str::contains("Outside").not());
}

#[test]
fn find_without_match_prints_null() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("find")
        .arg(&path)
        .arg("--selector")
        .arg("#card")
        .arg("--element")
        .arg("footer")
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn modify_adds_modifier() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("modify")
        .arg(&path)
        .arg("--selector")
        .arg("#card .card__title")
        .arg("--add")
        .arg("active")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"class="card__title card__title--active""#))
        .stdout(predicate::str::contains(r#"<span class="card__title">Outside</span>"#));
}

#[test]
fn modify_removes_modifier() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("modify")
        .arg(&path)
        .arg("--selector")
        .arg("#card")
        .arg("--remove")
        .arg("wide")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"class="card""#));
}

#[test]
fn modify_rejects_two_actions() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("modify")
        .arg(&path)
        .arg("--selector")
        .arg("#card")
        .arg("--add")
        .arg("a")
        .arg("--toggle")
        .arg("b")
        .assert()
        .failure();
}

#[test]
fn reads_from_stdin() {
    assert_cmd::Command::cargo_bin("bemkit")
        .unwrap()
        .arg("identify")
        .arg("-")
        .arg("--selector")
        .arg("#card")
        .arg("--compact")
        .write_stdin(CARD)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""modifiers":["wide"]"#));
}

#[test]
fn missing_file_fails() {
    bemkit_cmd()
        .arg("identify")
        .arg("/nonexistent/card.html")
        .arg("--selector")
        .arg("div")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn invalid_selector_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_card(&temp_dir);

    bemkit_cmd()
        .arg("identify")
        .arg(&path)
        .arg("--selector")
        .arg("[[[")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selector"));
}
