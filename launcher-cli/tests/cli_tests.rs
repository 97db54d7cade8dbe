//! End-to-end tests driving the real binary against a fake interpreter and
//! engine, written as small shell scripts.

#![cfg(unix)]

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn write_script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// A fake interpreter: answers `--version` with the given report, records
/// engine arguments to `record.txt`, snapshots the transfer file to
/// `capture.txt` and exits with the given code.
fn fake_python(dir: &TempDir, version_report: &str, exit: i32) -> PathBuf {
    let record = dir.path().join("record.txt");
    let capture = dir.path().join("capture.txt");
    let body = format!(
        r#"if [ "$1" = "--version" ]; then echo "{version_report}"; exit 0; fi
shift
printf '%s\n' "$@" >> "{record}"
if [ "$1" = "--file" ]; then cp "$2" "{capture}"; fi
exit {exit}"#,
        record = record.display(),
        capture = capture.display(),
    );
    write_script(dir, "python3", &body)
}

fn launcher(dir: &TempDir, python: &Path) -> Command {
    let mut cmd = Command::cargo_bin("suprenam-launcher").unwrap();
    cmd.env_remove("SUPRENAM_ENGINE")
        .env_remove("SUPRENAM_LIBRARY")
        .env_remove("SUPRENAM_TRANSFER_FILE")
        .env_remove("SUPRENAM_SESSION_LOG")
        .arg("--engine")
        .arg(dir.path().join("suprenam.py"))
        .arg("--python")
        .arg(python)
        .arg("--python-fallback")
        .arg(python)
        .arg("--session-log")
        .arg(dir.path().join("previous_session.log"));
    cmd
}

#[test]
fn help_mentions_the_drag_and_drop_contract() {
    let mut cmd = Command::cargo_bin("suprenam-launcher").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Desktop launcher for the Suprenam batch renamer"));
}

#[test]
fn dropped_files_are_renamed_in_order_and_the_transfer_file_is_cleaned_up() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 0);
    let transfer = dir.path().join("to_rename.txt");

    launcher(&dir, &python)
        .arg("--transfer-file")
        .arg(&transfer)
        .args(["/a/b.txt", "/a/c.txt"])
        .assert()
        .success();

    // The engine was invoked in rename mode against the transfer file.
    let record = fs::read_to_string(dir.path().join("record.txt")).unwrap();
    assert!(record.starts_with("--file\n"), "record was: {record}");

    // The engine saw the dropped paths, one per line, in invocation order.
    dir.child("capture.txt").assert("/a/b.txt\n/a/c.txt\n");

    // Cleanup ran after the invocation.
    assert!(!transfer.exists());
}

#[test]
fn engine_exit_code_is_passed_through_and_cleanup_still_runs() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 3);
    let transfer = dir.path().join("to_rename.txt");

    launcher(&dir, &python)
        .arg("--transfer-file")
        .arg(&transfer)
        .arg("/a/b.txt")
        .assert()
        .code(3);

    assert!(!transfer.exists());
}

#[test]
fn unique_transfer_file_is_the_default() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 0);

    launcher(&dir, &python).arg("/a/b.txt").assert().success();

    dir.child("capture.txt").assert("/a/b.txt\n");
}

#[test]
fn no_arguments_with_a_previous_session_undoes_it() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 0);
    dir.child("previous_session.log").write_str("engine-owned").unwrap();

    launcher(&dir, &python).assert().success();

    let record = fs::read_to_string(dir.path().join("record.txt")).unwrap();
    assert_eq!(record, "--undo\n");
}

#[test]
fn no_arguments_and_no_previous_session_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 0);

    launcher(&dir, &python)
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("ALERT:Usage|"));

    // The engine was never invoked.
    assert!(!dir.path().join("record.txt").exists());
}

#[test]
fn a_stale_transfer_file_takes_precedence_over_undo() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 0);
    let transfer = dir.path().join("to_rename.txt");
    fs::write(&transfer, "/stale/path\n").unwrap();
    dir.child("previous_session.log").write_str("engine-owned").unwrap();

    launcher(&dir, &python)
        .arg("--transfer-file")
        .arg(&transfer)
        .assert()
        .success();

    let record = fs::read_to_string(dir.path().join("record.txt")).unwrap();
    assert!(record.starts_with("--file\n"), "record was: {record}");
    assert!(!transfer.exists());
}

#[test]
fn appending_to_a_fixed_transfer_file_never_truncates_it() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 0);
    let transfer = dir.path().join("to_rename.txt");
    fs::write(&transfer, "/earlier/drop.txt\n").unwrap();

    launcher(&dir, &python)
        .arg("--transfer-file")
        .arg(&transfer)
        .arg("/later/drop.txt")
        .assert()
        .success();

    dir.child("capture.txt")
        .assert("/earlier/drop.txt\n/later/drop.txt\n");
}

#[test]
fn an_old_interpreter_is_rejected_with_a_fatal_alert() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 2.5.6", 0);
    let transfer = dir.path().join("to_rename.txt");

    launcher(&dir, &python)
        .arg("--transfer-file")
        .arg(&transfer)
        .arg("/a/b.txt")
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "ALERT:Fatal error|Python 3.6 or higher is required. Yours is 0205.",
        ));

    // The gate runs before any file is touched.
    assert!(!transfer.exists());
    assert!(!dir.path().join("record.txt").exists());
}

#[test]
fn a_missing_interpreter_is_rejected_with_a_fatal_alert() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("python3");

    launcher(&dir, &missing)
        .arg("/a/b.txt")
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("ALERT:Fatal error|"));
}

#[test]
fn the_fallback_interpreter_is_used_when_the_preferred_one_is_missing() {
    let dir = TempDir::new().unwrap();
    let python = fake_python(&dir, "Python 3.9.1", 0);
    let missing = dir.path().join("python3.6");

    let mut cmd = Command::cargo_bin("suprenam-launcher").unwrap();
    cmd.env_remove("SUPRENAM_ENGINE")
        .env_remove("SUPRENAM_LIBRARY")
        .env_remove("SUPRENAM_TRANSFER_FILE")
        .env_remove("SUPRENAM_SESSION_LOG")
        .arg("--engine")
        .arg(dir.path().join("suprenam.py"))
        .arg("--python")
        .arg(&missing)
        .arg("--python-fallback")
        .arg(&python)
        .arg("--session-log")
        .arg(dir.path().join("previous_session.log"))
        .arg("/a/b.txt")
        .assert()
        .success();

    dir.child("capture.txt").assert("/a/b.txt\n");
}

#[test]
fn the_engine_runs_with_its_library_on_the_import_path() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("record.txt");
    let body = format!(
        r#"if [ "$1" = "--version" ]; then echo "Python 3.9.1"; exit 0; fi
echo "$PYTHONPATH" > "{record}"
exit 0"#,
        record = record.display(),
    );
    let python = write_script(&dir, "python3", &body);
    let library = dir.path().join("lib");

    launcher(&dir, &python)
        .arg("--library-dir")
        .arg(&library)
        .arg("/a/b.txt")
        .assert()
        .success();

    let recorded = fs::read_to_string(&record).unwrap();
    assert_eq!(recorded.trim(), library.to_str().unwrap());
}
