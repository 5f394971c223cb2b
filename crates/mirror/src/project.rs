//! Clone-project orchestration on top of the tree mirror.
//!
//! A "project" is a master working tree whose interesting content lives
//! in a fixed set of top-level folders. A "clone" is another root
//! directory holding mirrored copies of those folders. This module
//! mirrors the selected folders into one clone, or into a batch of
//! clones where individual failures are collected while the remaining
//! clones still run.

use std::fs;
use std::path::{Path, PathBuf};

use exclusions::ExclusionSet;
use tracing::info;

use crate::error::{MirrorError, MirrorResult};
use crate::stats::MirrorStats;
use crate::sync::sync_tree;

/// Top-level folders a project clone can mirror.
pub const PROJECT_FOLDERS: [&str; 4] = ["Assets", "Packages", "ProjectSettings", "UserSettings"];

/// Which of the top-level project folders a sync pass should mirror.
///
/// Freshly created clones always mirror all four folders; subsequent
/// passes honour the caller's selection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FolderSelection {
    /// Mirror the `Assets` folder.
    pub assets: bool,
    /// Mirror the `Packages` folder.
    pub packages: bool,
    /// Mirror the `ProjectSettings` folder.
    pub project_settings: bool,
    /// Mirror the `UserSettings` folder.
    pub user_settings: bool,
}

impl Default for FolderSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FolderSelection {
    /// Selection covering all four project folders.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            assets: true,
            packages: true,
            project_settings: true,
            user_settings: true,
        }
    }

    /// Returns the names of the selected folders in their canonical
    /// order.
    #[must_use]
    pub fn folders(&self) -> Vec<&'static str> {
        let flags = [
            self.assets,
            self.packages,
            self.project_settings,
            self.user_settings,
        ];
        PROJECT_FOLDERS
            .into_iter()
            .zip(flags)
            .filter_map(|(name, selected)| selected.then_some(name))
            .collect()
    }
}

/// Mirrors the selected folders of `master_root` into `clone_root`.
///
/// Folders are processed in canonical order, fail-fast: the first
/// failing folder aborts the clone. A clone root that resolves to the
/// master root itself is rejected before any I/O.
///
/// # Errors
///
/// Returns the first [`MirrorError`] encountered, including
/// [`MirrorErrorKind::SourceMissing`](crate::MirrorErrorKind::SourceMissing)
/// when a selected folder is absent from the master.
pub fn sync_clone(
    master_root: &Path,
    clone_root: &Path,
    selection: &FolderSelection,
    exclusions: &ExclusionSet,
) -> MirrorResult<MirrorStats> {
    if is_same_directory(master_root, clone_root) {
        return Err(MirrorError::clone_is_master(clone_root.to_path_buf()));
    }

    let mut stats = MirrorStats::default();
    for folder in selection.folders() {
        let folder_stats = sync_tree(
            &master_root.join(folder),
            &clone_root.join(folder),
            exclusions,
        )?;
        stats.merge(folder_stats);
    }
    info!(
        clone = %clone_root.display(),
        copied = stats.files_copied,
        deleted = stats.files_deleted + stats.dirs_deleted,
        "clone synchronized"
    );
    Ok(stats)
}

/// One clone's failure within a batch pass.
#[derive(Debug)]
pub struct BatchFailure {
    /// Root of the clone that failed.
    pub clone: PathBuf,
    /// The error that aborted that clone's pass.
    pub error: MirrorError,
}

/// Result of synchronizing a whole batch of clones.
///
/// Clones are processed sequentially and independently: a failing
/// clone is recorded here while the remaining clones still run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Aggregated counters over the clones that succeeded.
    pub stats: MirrorStats,
    /// Number of clones that synchronized successfully.
    pub succeeded: usize,
    /// Failures, one per clone that could not be synchronized.
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Returns `true` when every clone synchronized successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Mirrors the selected folders of `master_root` into every clone in
/// `clones`.
///
/// Each clone is an independent pass sharing only the read-only master
/// tree; failures are collected per clone rather than aborting the
/// batch.
pub fn sync_all_clones<I, P>(
    master_root: &Path,
    clones: I,
    selection: &FolderSelection,
    exclusions: &ExclusionSet,
) -> BatchOutcome
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut outcome = BatchOutcome::default();
    for clone in clones {
        let clone = clone.as_ref();
        match sync_clone(master_root, clone, selection, exclusions) {
            Ok(stats) => {
                outcome.stats.merge(stats);
                outcome.succeeded += 1;
            }
            Err(error) => outcome.failures.push(BatchFailure {
                clone: clone.to_path_buf(),
                error,
            }),
        }
    }
    outcome
}

/// Compares two roots through canonicalization when possible.
///
/// A clone root that does not exist yet cannot be the master, so
/// canonicalization failures on either side fall back to a plain path
/// comparison.
fn is_same_directory(master_root: &Path, clone_root: &Path) -> bool {
    match (fs::canonicalize(master_root), fs::canonicalize(clone_root)) {
        (Ok(master), Ok(clone)) => master == clone,
        _ => master_root == clone_root,
    }
}
