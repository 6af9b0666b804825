#![allow(deprecated)]

#[allow(unused_imports)]
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("escalation_tracker").unwrap();
    c.env("ESCALATIONS_DIR", temp.path())
        .env("NO_COLOR", "1")
        .env("EDITOR", "true");
    c
}

/// Shell script standing in for $EDITOR: records its arguments and appends
/// a body line to the file it was handed.
fn fake_editor(dir: &Path, argfile: &Path) -> PathBuf {
    let script = dir.join("fake_editor.sh");
    let body = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > {}\necho 'body from editor' >> \"$2\"\n",
        argfile.display()
    );
    fs::write(&script, body).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn stamp() -> predicates::str::RegexPredicate {
    predicate::str::is_match(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}\]$").unwrap()
}

#[test]
fn editor_receives_the_line_hint_and_the_path() {
    let temp = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let argfile = scratch.path().join("editor_args.log");
    let editor = fake_editor(scratch.path(), &argfile);

    cmd(&temp)
        .args(["start", "E1", "one"])
        .assert()
        .success();
    cmd(&temp)
        .env("EDITOR", &editor)
        .args(["update", "E1"])
        .assert()
        .success();

    let args = fs::read_to_string(&argfile).unwrap();
    let mut lines = args.lines();
    assert_eq!(lines.next(), Some("+7"));
    let path_arg = lines.next().unwrap();
    assert!(path_arg.ends_with("E1_one.txt"), "got {path_arg:?}");
}

#[test]
fn later_updates_land_above_earlier_ones() {
    let temp = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();
    let argfile = scratch.path().join("editor_args.log");
    let editor = fake_editor(scratch.path(), &argfile);

    cmd(&temp)
        .args(["start", "E1", "one"])
        .assert()
        .success();

    // First session: the fake editor appends a body line at end of file.
    cmd(&temp)
        .env("EDITOR", &editor)
        .args(["update", "E1"])
        .assert()
        .success();

    // Second session with an inert editor.
    cmd(&temp)
        .args(["update", "E1"])
        .assert()
        .success();

    let raw = fs::read_to_string(temp.path().join("E1_one.txt")).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines[5], "Status Updates:");
    assert!(stamp().eval(lines[6]), "got {:?}", lines[6]);
    assert!(stamp().eval(lines[7]), "got {:?}", lines[7]);
    assert_eq!(lines[8], "body from editor");
}

#[test]
fn failing_editor_exits_nonzero_but_keeps_the_entry() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["start", "E1", "one"])
        .assert()
        .success();

    cmd(&temp)
        .env("EDITOR", "false")
        .args(["update", "E1"])
        .assert()
        .failure()
        .code(6)
        .stdout(predicate::str::contains("Updated: "))
        .stderr(predicate::str::contains("editor false failed"));

    // The entry was persisted before the editor ran.
    let raw = fs::read_to_string(temp.path().join("E1_one.txt")).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert!(stamp().eval(lines[6]), "got {:?}", lines[6]);
}

#[test]
fn missing_editor_program_reports_an_editor_error() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["start", "E1", "one"])
        .assert()
        .success();

    cmd(&temp)
        .env("EDITOR", "/nonexistent/editor-binary")
        .args(["update", "E1"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("failed"));
}
