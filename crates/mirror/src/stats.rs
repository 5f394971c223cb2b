/// Counters describing the work performed by one mirror pass.
///
/// A pass over an unchanged source reports zero copies and zero
/// deletions, which makes idempotence directly observable in tests and
/// user-facing summaries.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MirrorStats {
    /// Non-excluded source files examined for differences.
    pub files_examined: u64,
    /// Files copied because the target copy was missing or differed.
    pub files_copied: u64,
    /// Obsolete target files deleted.
    pub files_deleted: u64,
    /// Obsolete target directories deleted (each with its contents).
    pub dirs_deleted: u64,
}

impl MirrorStats {
    /// Folds the counters of another pass into this one.
    pub fn merge(&mut self, other: Self) {
        self.files_examined += other.files_examined;
        self.files_copied += other.files_copied;
        self.files_deleted += other.files_deleted;
        self.dirs_deleted += other.dirs_deleted;
    }

    /// Returns `true` when the pass changed nothing on the target side.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.files_copied == 0 && self.files_deleted == 0 && self.dirs_deleted == 0
    }
}
