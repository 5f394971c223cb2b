//! End-to-end tests driving the `clonesync` binary over real
//! directories.

use std::fs;
use std::path::Path;
use std::process::Output;

use assert_cmd::Command;
use filetime::FileTime;
use tempfile::TempDir;

fn clonesync(master: &Path, args: &[&str]) -> Output {
    Command::cargo_bin("clonesync")
        .expect("binary built")
        .arg("--master")
        .arg(master)
        .args(args)
        .output()
        .expect("run clonesync")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn make_master(root: &Path) {
    for folder in ["Assets", "Packages", "ProjectSettings", "UserSettings"] {
        fs::create_dir_all(root.join(folder)).expect("create folder");
    }
    fs::write(root.join("Assets/scene.unity"), b"scene data").expect("write scene");
    fs::write(root.join("ProjectSettings/ProjectVersion.txt"), b"1.0").expect("write version");
}

fn mtime_of(path: &Path) -> FileTime {
    FileTime::from_last_modification_time(&fs::metadata(path).expect("metadata"))
}

#[test]
fn add_gives_the_clone_a_full_copy() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    let clone = temp.path().join("clone");
    make_master(&master);

    let output = clonesync(&master, &["add", clone.to_str().expect("utf8")]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    for folder in ["Assets", "Packages", "ProjectSettings", "UserSettings"] {
        assert!(clone.join(folder).is_dir(), "missing {folder}");
    }
    assert_eq!(
        fs::read(clone.join("Assets/scene.unity")).expect("read copy"),
        b"scene data".to_vec()
    );
    assert_eq!(
        mtime_of(&master.join("Assets/scene.unity")),
        mtime_of(&clone.join("Assets/scene.unity")),
        "copies carry the source modification time"
    );
}

#[test]
fn sync_all_converges_and_then_reports_a_noop() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    let clone = temp.path().join("clone");
    make_master(&master);

    let output = clonesync(&master, &["add", clone.to_str().expect("utf8")]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    fs::write(master.join("Assets/new.txt"), b"fresh").expect("write new");
    fs::write(clone.join("Assets/stale.txt"), b"stale").expect("write stale");

    let output = clonesync(&master, &["sync", "--all"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(clone.join("Assets/new.txt").exists());
    assert!(!clone.join("Assets/stale.txt").exists());

    // Nothing changed since, so the next pass copies and deletes
    // nothing.
    let output = clonesync(&master, &["sync", "--all"]);
    assert!(output.status.success());
    assert!(
        stdout_of(&output).contains("0 copied, 0 deleted"),
        "unexpected summary: {}",
        stdout_of(&output)
    );
}

#[test]
fn git_metadata_is_invisible_on_both_sides() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    let clone = temp.path().join("clone");
    make_master(&master);
    // The default settings ship an active ".git" rule.
    fs::create_dir(master.join("Assets/.git")).expect("create master .git");
    fs::write(master.join("Assets/.git/config"), b"[core]").expect("write config");

    let output = clonesync(&master, &["add", clone.to_str().expect("utf8")]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(!clone.join("Assets/.git").exists());

    // A clone-side .git with no master counterpart survives the sweep.
    fs::create_dir(clone.join("Assets/.git")).expect("create clone .git");
    fs::write(clone.join("Assets/.git/HEAD"), b"ref: main").expect("write HEAD");

    let output = clonesync(&master, &["sync", "--all"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(clone.join("Assets/.git/HEAD").exists());
}

#[test]
fn one_off_exclusions_apply_to_a_single_run() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    let clone = temp.path().join("clone");
    make_master(&master);
    fs::write(master.join("Assets/notes.tmp"), b"scratch").expect("write tmp");

    let output = clonesync(
        &master,
        &["--exclude", ".tmp", "add", clone.to_str().expect("utf8")],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(!clone.join("Assets/notes.tmp").exists());

    // Without the flag the fragment is gone and the file syncs.
    let output = clonesync(&master, &["sync", "--all"]);
    assert!(output.status.success());
    assert!(clone.join("Assets/notes.tmp").exists());
}
