//! Recursive tree mirroring.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use exclusions::ExclusionSet;
use filetime::FileTime;
use tracing::{debug, trace};

use crate::error::{MirrorError, MirrorResult};
use crate::stats::MirrorStats;

/// Makes `target_dir` an exact mirror of `source_dir`, minus excluded
/// entries.
///
/// The target directory (and any missing parents) is created if absent.
/// Files are copied only when the target copy is missing or differs by
/// size or modification time; target files and directories with no
/// source counterpart are deleted. Names matching `exclusions` are
/// invisible to the pass on both sides: never copied, never recursed
/// into, never deleted.
///
/// # Errors
///
/// Fails fast with a [`MirrorError`] identifying the offending path.
/// Entries settled before the failure keep their new state.
pub fn sync_tree(
    source_dir: &Path,
    target_dir: &Path,
    exclusions: &ExclusionSet,
) -> MirrorResult<MirrorStats> {
    if !source_dir.is_dir() {
        return Err(MirrorError::source_missing(source_dir.to_path_buf()));
    }

    let mut stats = MirrorStats::default();
    sync_level(source_dir, target_dir, exclusions, &mut stats)?;
    Ok(stats)
}

/// Settles one source/target directory pair, recursing into
/// subdirectories.
fn sync_level(
    source_dir: &Path,
    target_dir: &Path,
    exclusions: &ExclusionSet,
    stats: &mut MirrorStats,
) -> MirrorResult<()> {
    fs::create_dir_all(target_dir)
        .map_err(|error| MirrorError::create_dir(target_dir.to_path_buf(), error))?;

    let source = list_children(source_dir)?;
    let target = list_children(target_dir)?;

    // Excluded target names never enter the candidate sets, so they are
    // neither recreated nor deleted.
    let mut obsolete_files: BTreeSet<OsString> = target
        .files
        .into_iter()
        .filter(|name| !exclusions.is_excluded_os(name))
        .collect();

    for name in &source.files {
        if exclusions.is_excluded_os(name) {
            trace!(name = %name.to_string_lossy(), "skipping excluded file");
            continue;
        }

        let source_path = source_dir.join(name);
        let target_path = target_dir.join(name);
        stats.files_examined += 1;

        let source_meta = fs::metadata(&source_path)
            .map_err(|error| MirrorError::metadata(source_path.clone(), error))?;
        if differs_from(&source_meta, &target_path)? {
            fs::copy(&source_path, &target_path).map_err(|error| {
                MirrorError::copy(source_path.clone(), target_path.clone(), error)
            })?;
            // fs::copy does not carry the timestamp over; replicate it
            // so the next pass sees the pair as identical.
            let mtime = FileTime::from_last_modification_time(&source_meta);
            filetime::set_file_mtime(&target_path, mtime)
                .map_err(|error| MirrorError::set_times(target_path.clone(), error))?;
            stats.files_copied += 1;
            debug!(path = %target_path.display(), "copied file");
        }

        obsolete_files.remove(name);
    }

    for name in obsolete_files {
        let path = target_dir.join(&name);
        fs::remove_file(&path).map_err(|error| MirrorError::remove_file(path.clone(), error))?;
        stats.files_deleted += 1;
        debug!(path = %path.display(), "deleted obsolete file");
    }

    let mut obsolete_dirs: BTreeSet<OsString> = target
        .dirs
        .into_iter()
        .filter(|name| !exclusions.is_excluded_os(name))
        .collect();

    for name in &source.dirs {
        if exclusions.is_excluded_os(name) {
            trace!(name = %name.to_string_lossy(), "skipping excluded directory");
            continue;
        }

        sync_level(
            &source_dir.join(name),
            &target_dir.join(name),
            exclusions,
            stats,
        )?;
        obsolete_dirs.remove(name);
    }

    for name in obsolete_dirs {
        let path = target_dir.join(&name);
        fs::remove_dir_all(&path).map_err(|error| MirrorError::remove_dir(path.clone(), error))?;
        stats.dirs_deleted += 1;
        debug!(path = %path.display(), "deleted obsolete directory");
    }

    Ok(())
}

/// Returns `true` if `target` must be re-copied from `source`.
///
/// The target differs when it does not exist, its byte length differs
/// from the source, or its modification time differs from the source.
/// This is a metadata-only heuristic: two files with equal size and
/// equal modification time are assumed identical even when their
/// content differs. That trade-off is intended, not a defect.
///
/// # Errors
///
/// Fails when metadata for either side cannot be read (other than the
/// target simply not existing).
pub fn is_file_different(source: &Path, target: &Path) -> MirrorResult<bool> {
    let source_meta =
        fs::metadata(source).map_err(|error| MirrorError::metadata(source.to_path_buf(), error))?;
    differs_from(&source_meta, target)
}

fn differs_from(source_meta: &fs::Metadata, target: &Path) -> MirrorResult<bool> {
    let target_meta = match fs::metadata(target) {
        Ok(meta) => meta,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(error) => return Err(MirrorError::metadata(target.to_path_buf(), error)),
    };

    if source_meta.len() != target_meta.len() {
        return Ok(true);
    }

    // Compare through FileTime rather than SystemTime so the answer
    // matches what set_file_mtime was able to store on this filesystem.
    let source_mtime = FileTime::from_last_modification_time(source_meta);
    let target_mtime = FileTime::from_last_modification_time(&target_meta);
    Ok(source_mtime != target_mtime)
}

/// Direct children of one directory, split by kind and sorted.
struct Children {
    files: Vec<OsString>,
    dirs: Vec<OsString>,
}

fn list_children(dir: &Path) -> MirrorResult<Children> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    let read_dir =
        fs::read_dir(dir).map_err(|error| MirrorError::read_dir(dir.to_path_buf(), error))?;
    for entry in read_dir {
        let entry = entry.map_err(|error| MirrorError::read_dir(dir.to_path_buf(), error))?;
        let file_type = entry
            .file_type()
            .map_err(|error| MirrorError::metadata(entry.path(), error))?;
        if file_type.is_dir() {
            dirs.push(entry.file_name());
        } else {
            // Symlinks and other non-directories mirror as files with
            // whatever semantics the platform copy gives them.
            files.push(entry.file_name());
        }
    }

    files.sort();
    dirs.sort();
    Ok(Children { files, dirs })
}
