//! Exit-code contract of the `clonesync` binary.

use std::fs;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::cargo_bin("clonesync")
        .expect("binary built")
        .args(args)
        .output()
        .expect("run clonesync")
}

#[test]
fn version_exits_zero() {
    let output = run(&["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(!output.stdout.is_empty());
}

#[test]
fn no_arguments_is_a_usage_error() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = run(&["--definitely-not-a-flag"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn sync_of_unregistered_clone_is_a_usage_error() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    fs::create_dir(&master).expect("create master");

    let output = run(&[
        "--master",
        master.to_str().expect("utf8"),
        "sync",
        "/tmp/not-a-clone",
    ]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_source_folder_is_a_file_io_error() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    let clone = temp.path().join("clone");
    // No project folders under the master, so the initial copy fails.
    fs::create_dir(&master).expect("create master");

    let output = run(&[
        "--master",
        master.to_str().expect("utf8"),
        "add",
        clone.to_str().expect("utf8"),
    ]);
    assert_eq!(output.status.code(), Some(11));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("does not exist"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
