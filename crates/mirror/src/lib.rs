#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `mirror` implements the one-directional directory mirroring engine at
//! the heart of the `clonesync` workspace: given a source tree and a
//! target tree, make the target an exact mirror of the source, minus the
//! entries hidden by an [`ExclusionSet`](exclusions::ExclusionSet). The
//! engine copies only files whose metadata differs, removes target
//! entries that no longer exist on the source side, and treats excluded
//! names as invisible on *both* sides: they are never copied, never
//! recursed into, and never deleted.
//!
//! # Design
//!
//! - [`sync_tree`] is the recursive core. Each call settles one
//!   source/target directory pair: direct-child files first, then
//!   subdirectories, deleting the obsolete remainder of each kind after
//!   the wanted entries have been processed. Source entries are visited
//!   in sorted order so traversal stays deterministic regardless of the
//!   underlying filesystem's iteration order.
//! - [`is_file_different`] is the metadata comparison used to decide
//!   whether a copy is needed: missing target, differing byte length, or
//!   differing modification time. Content is never read.
//! - [`MirrorStats`] counts the work performed so callers can observe
//!   that a second pass over an unchanged source is a no-op.
//! - [`project`] layers the clone-project orchestration on top: mirror a
//!   configurable subset of top-level project folders into one clone, or
//!   into a whole batch of clones with per-clone failure collection.
//!
//! # Invariants
//!
//! - The target directory is created (with missing parents) before the
//!   pair is examined; a missing *source* directory is an error.
//! - Obsolete-candidate sets are built from target names filtered
//!   through the same exclusion test applied to source names, so an
//!   excluded target entry survives every pass untouched.
//! - The first failure aborts the pair immediately. No rollback is
//!   attempted; entries already copied or deleted stay as they are.
//! - The engine holds no state across invocations and never panics;
//!   failures surface as [`MirrorError`] values carrying the offending
//!   path and the underlying [`std::io::Error`].
//!
//! # Errors
//!
//! All operations report [`MirrorError`]. Permission failures render a
//! remediation hint (clear the protected folder by hand or add an
//! exclusion rule for it) because they are the failure users actually
//! hit, typically on version-control metadata the mirror was never
//! meant to touch.
//!
//! # Examples
//!
//! ```
//! use exclusions::ExclusionSet;
//! use mirror::sync_tree;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let src = temp.path().join("src");
//! let dst = temp.path().join("dst");
//! fs::create_dir(&src)?;
//! fs::write(src.join("a.txt"), b"data")?;
//!
//! let stats = sync_tree(&src, &dst, &ExclusionSet::default())?;
//! assert_eq!(stats.files_copied, 1);
//! assert!(dst.join("a.txt").exists());
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod error;
pub mod project;
mod stats;
mod sync;

pub use error::{MirrorError, MirrorErrorKind, MirrorResult};
pub use stats::MirrorStats;
pub use sync::{is_file_different, sync_tree};
