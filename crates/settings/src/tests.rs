use std::fs;

use exclusions::{ExclusionRule, ExclusionSet};
use tempfile::TempDir;

use crate::{CloneProject, SETTINGS_FILE_NAME, SettingsError, SyncSettings};

#[test]
fn missing_file_loads_defaults() {
    let temp = TempDir::new().expect("tempdir");
    let settings = SyncSettings::load(&temp.path().join(SETTINGS_FILE_NAME)).expect("load");

    assert!(settings.clones.is_empty());
    assert!(settings.folders.assets);
    assert_eq!(settings.exclusions, vec![ExclusionRule::new(".git")]);
}

#[test]
fn default_exclusions_hide_git_metadata() {
    let settings = SyncSettings::default();
    let set = ExclusionSet::from_rules(settings.exclusions);
    assert!(set.is_excluded(".git"));
}

#[test]
fn settings_survive_save_and_load() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join(SETTINGS_FILE_NAME);

    let mut settings = SyncSettings::default();
    settings.clones.push(CloneProject {
        path: "/tmp/clone-a".into(),
        platform: Some("StandaloneLinux64".into()),
    });
    settings.folders.user_settings = false;
    settings.exclusions.push(ExclusionRule::inactive("Temp"));

    settings.save(&path).expect("save");
    let loaded = SyncSettings::load(&path).expect("load");
    assert_eq!(settings, loaded);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join(SETTINGS_FILE_NAME);
    fs::write(&path, b"{not json").expect("write");

    let error = SyncSettings::load(&path).expect_err("should fail");
    assert!(matches!(error, SettingsError::Parse { .. }));
}

#[test]
fn add_clone_rejects_master_root() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    fs::create_dir(&master).expect("create master");

    let mut settings = SyncSettings::default();
    let error = settings
        .add_clone(&master, CloneProject::new(&master))
        .expect_err("should reject");
    assert!(matches!(error, SettingsError::CloneIsMaster { .. }));
    assert!(settings.clones.is_empty());
}

#[test]
fn add_clone_rejects_duplicates() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    let clone = temp.path().join("clone");
    fs::create_dir(&master).expect("create master");
    fs::create_dir(&clone).expect("create clone");

    let mut settings = SyncSettings::default();
    settings
        .add_clone(&master, CloneProject::new(&clone))
        .expect("first registration");
    let error = settings
        .add_clone(&master, CloneProject::new(&clone))
        .expect_err("should reject duplicate");
    assert!(matches!(error, SettingsError::DuplicateClone { .. }));
    assert_eq!(settings.clones.len(), 1);
}

#[test]
fn remove_clone_only_drops_the_registration() {
    let temp = TempDir::new().expect("tempdir");
    let master = temp.path().join("master");
    let clone = temp.path().join("clone");
    fs::create_dir(&master).expect("create master");
    fs::create_dir(&clone).expect("create clone");

    let mut settings = SyncSettings::default();
    settings
        .add_clone(&master, CloneProject::new(&clone))
        .expect("register");

    assert!(settings.remove_clone(&clone));
    assert!(settings.clones.is_empty());
    assert!(clone.exists(), "directory stays on disk");
    assert!(!settings.remove_clone(&clone));
}
