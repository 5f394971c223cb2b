use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result type for mirroring operations.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Error returned when a mirror pass fails.
///
/// Each value records the filesystem operation that failed, the
/// offending path, and (for I/O failures) the underlying
/// [`io::Error`]. The pass is aborted at the first error; entries
/// already settled keep whatever state they reached.
#[derive(Debug)]
pub struct MirrorError {
    kind: MirrorErrorKind,
}

impl MirrorError {
    fn new(kind: MirrorErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn source_missing(path: PathBuf) -> Self {
        Self::new(MirrorErrorKind::SourceMissing { path })
    }

    pub(crate) fn clone_is_master(path: PathBuf) -> Self {
        Self::new(MirrorErrorKind::CloneIsMaster { path })
    }

    pub(crate) fn create_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(MirrorErrorKind::CreateDir { path, source })
    }

    pub(crate) fn read_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(MirrorErrorKind::ReadDir { path, source })
    }

    pub(crate) fn metadata(path: PathBuf, source: io::Error) -> Self {
        Self::new(MirrorErrorKind::Metadata { path, source })
    }

    pub(crate) fn copy(from: PathBuf, to: PathBuf, source: io::Error) -> Self {
        Self::new(MirrorErrorKind::Copy { from, to, source })
    }

    pub(crate) fn set_times(path: PathBuf, source: io::Error) -> Self {
        Self::new(MirrorErrorKind::SetTimes { path, source })
    }

    pub(crate) fn remove_file(path: PathBuf, source: io::Error) -> Self {
        Self::new(MirrorErrorKind::RemoveFile { path, source })
    }

    pub(crate) fn remove_dir(path: PathBuf, source: io::Error) -> Self {
        Self::new(MirrorErrorKind::RemoveDir { path, source })
    }

    /// Returns the specific failure that aborted the pass.
    #[must_use]
    pub fn kind(&self) -> &MirrorErrorKind {
        &self.kind
    }

    /// Returns the path the failing operation was acting on.
    ///
    /// For copies this is the destination path, which is where the
    /// remediation (permissions, exclusion rules) has to happen.
    #[must_use]
    pub fn path(&self) -> &Path {
        match &self.kind {
            MirrorErrorKind::SourceMissing { path }
            | MirrorErrorKind::CloneIsMaster { path }
            | MirrorErrorKind::CreateDir { path, .. }
            | MirrorErrorKind::ReadDir { path, .. }
            | MirrorErrorKind::Metadata { path, .. }
            | MirrorErrorKind::SetTimes { path, .. }
            | MirrorErrorKind::RemoveFile { path, .. }
            | MirrorErrorKind::RemoveDir { path, .. } => path,
            MirrorErrorKind::Copy { to, .. } => to,
        }
    }

    /// Returns `true` when the underlying failure is a permission
    /// error.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        self.io_source()
            .is_some_and(|source| source.kind() == io::ErrorKind::PermissionDenied)
    }

    fn io_source(&self) -> Option<&io::Error> {
        match &self.kind {
            MirrorErrorKind::SourceMissing { .. } | MirrorErrorKind::CloneIsMaster { .. } => None,
            MirrorErrorKind::CreateDir { source, .. }
            | MirrorErrorKind::ReadDir { source, .. }
            | MirrorErrorKind::Metadata { source, .. }
            | MirrorErrorKind::Copy { source, .. }
            | MirrorErrorKind::SetTimes { source, .. }
            | MirrorErrorKind::RemoveFile { source, .. }
            | MirrorErrorKind::RemoveDir { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MirrorErrorKind::SourceMissing { path } => {
                write!(
                    f,
                    "source directory '{}' does not exist or is not a directory",
                    path.display()
                )?;
            }
            MirrorErrorKind::CloneIsMaster { path } => {
                write!(
                    f,
                    "clone root '{}' is the master project itself",
                    path.display()
                )?;
            }
            MirrorErrorKind::CreateDir { path, source } => {
                write!(
                    f,
                    "failed to create directory '{}': {}",
                    path.display(),
                    source
                )?;
            }
            MirrorErrorKind::ReadDir { path, source } => {
                write!(
                    f,
                    "failed to read directory '{}': {}",
                    path.display(),
                    source
                )?;
            }
            MirrorErrorKind::Metadata { path, source } => {
                write!(
                    f,
                    "failed to inspect metadata for '{}': {}",
                    path.display(),
                    source
                )?;
            }
            MirrorErrorKind::Copy { from, to, source } => {
                write!(
                    f,
                    "failed to copy '{}' to '{}': {}",
                    from.display(),
                    to.display(),
                    source
                )?;
            }
            MirrorErrorKind::SetTimes { path, source } => {
                write!(
                    f,
                    "failed to set modification time on '{}': {}",
                    path.display(),
                    source
                )?;
            }
            MirrorErrorKind::RemoveFile { path, source } => {
                write!(f, "failed to delete file '{}': {}", path.display(), source)?;
            }
            MirrorErrorKind::RemoveDir { path, source } => {
                write!(
                    f,
                    "failed to delete directory '{}': {}",
                    path.display(),
                    source
                )?;
            }
        }

        if self.is_access_denied() {
            write!(
                f,
                " (access denied: manually clear protected folders such as a hidden '.git' \
                 directory, or add an exclusion rule for them)"
            )?;
        }

        Ok(())
    }
}

impl Error for MirrorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.io_source()
            .map(|source| source as &(dyn Error + 'static))
    }
}

/// Classification of mirror failures.
#[derive(Debug)]
pub enum MirrorErrorKind {
    /// The source directory was absent or not a directory at call time.
    SourceMissing {
        /// Source directory that failed the existence check.
        path: PathBuf,
    },
    /// A clone root resolved to the master project root.
    CloneIsMaster {
        /// The rejected clone root.
        path: PathBuf,
    },
    /// Failed to create the target directory.
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to read the contents of a directory.
    ReadDir {
        /// Directory whose contents could not be read.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to retrieve metadata for an entry.
    Metadata {
        /// Path whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to copy a source file over its target counterpart.
    Copy {
        /// Source file being copied.
        from: PathBuf,
        /// Destination the copy was writing to.
        to: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to replicate the source modification time after a copy.
    SetTimes {
        /// Freshly copied file whose timestamp could not be set.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to delete an obsolete target file.
    RemoveFile {
        /// File that could not be deleted.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
    /// Failed to delete an obsolete target directory.
    RemoveDir {
        /// Directory that could not be deleted.
        path: PathBuf,
        /// Underlying error emitted by the operating system.
        source: io::Error,
    },
}
