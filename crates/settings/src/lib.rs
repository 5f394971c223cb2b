#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `settings` persists the `clonesync` configuration: the registered
//! clone list, the top-level folder selection, and the exclusion rule
//! set. The mirroring engine itself stays configuration-free and takes
//! explicit value objects, so this crate is the only place that knows
//! settings live in a JSON file next to the master project.
//!
//! # Design
//!
//! - [`SyncSettings`] is a plain serde value object; [`load`](SyncSettings::load)
//!   and [`save`](SyncSettings::save) move it through a JSON file.
//!   A missing file loads the defaults rather than failing, so a fresh
//!   master needs no setup step.
//! - Defaults seed the exclusion list with an active `.git` rule, the
//!   one exclusion virtually every master needs.
//! - Clone-list edits ([`add_clone`](SyncSettings::add_clone) /
//!   [`remove_clone`](SyncSettings::remove_clone)) enforce the
//!   registration guards: no duplicates, and never the master root
//!   itself.
//!
//! # Errors
//!
//! [`SettingsError`] covers file read/write failures, malformed JSON,
//! and rejected clone registrations.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use exclusions::ExclusionRule;
use mirror::project::FolderSelection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default file name for persisted settings, relative to the master
/// project root.
pub const SETTINGS_FILE_NAME: &str = "clonesync.json";

/// A registered clone of the master project.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CloneProject {
    /// Root directory of the clone.
    pub path: PathBuf,
    /// Optional build-target platform label handed to the external
    /// launcher; `None` means "current platform". Opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl CloneProject {
    /// Creates a clone entry for `path` with no platform override.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            platform: None,
        }
    }
}

/// Persisted configuration for one master project.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Registered clones, in user-defined order.
    pub clones: Vec<CloneProject>,
    /// Which top-level folders routine syncs mirror.
    pub folders: FolderSelection,
    /// Exclusion rules, active and inactive.
    pub exclusions: Vec<ExclusionRule>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            clones: Vec::new(),
            folders: FolderSelection::all(),
            exclusions: vec![ExclusionRule::new(".git")],
        }
    }
}

impl SyncSettings {
    /// Loads settings from `path`, returning defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves settings to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Registers a new clone.
    ///
    /// Rejects a clone rooted at the master project and paths that are
    /// already on the list.
    pub fn add_clone(
        &mut self,
        master_root: &Path,
        clone: CloneProject,
    ) -> Result<(), SettingsError> {
        if paths_match(master_root, &clone.path) {
            return Err(SettingsError::CloneIsMaster { path: clone.path });
        }
        if self
            .clones
            .iter()
            .any(|existing| paths_match(&existing.path, &clone.path))
        {
            return Err(SettingsError::DuplicateClone { path: clone.path });
        }
        self.clones.push(clone);
        Ok(())
    }

    /// Removes the clone registered at `path`.
    ///
    /// Returns `true` when an entry was removed. The clone's directory
    /// is left on disk; only the registration goes away.
    pub fn remove_clone(&mut self, path: &Path) -> bool {
        let before = self.clones.len();
        self.clones
            .retain(|existing| !paths_match(&existing.path, path));
        self.clones.len() != before
    }
}

/// Compares two paths through canonicalization when both resolve,
/// falling back to a literal comparison otherwise.
fn paths_match(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Errors raised while loading, saving, or editing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file '{path}': {source}", path = .path.display())]
    Read {
        /// Settings file path.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// The settings file contents are not valid settings JSON.
    #[error("failed to parse settings file '{path}': {source}", path = .path.display())]
    Parse {
        /// Settings file path.
        path: PathBuf,
        /// Underlying serde_json error.
        source: serde_json::Error,
    },
    /// The settings file could not be written.
    #[error("failed to write settings file '{path}': {source}", path = .path.display())]
    Write {
        /// Settings file path.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Attempted to register the master project as a clone of itself.
    #[error("cannot register the master project '{path}' as a clone of itself", path = .path.display())]
    CloneIsMaster {
        /// The rejected path.
        path: PathBuf,
    },
    /// Attempted to register a clone path twice.
    #[error("clone '{path}' is already registered", path = .path.display())]
    DuplicateClone {
        /// The rejected path.
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests;
