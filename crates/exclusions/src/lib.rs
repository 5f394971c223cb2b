#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `exclusions` provides the name-based exclusion rules used by the
//! `clonesync` workspace to keep selected entries out of a mirror pass
//! entirely. A rule carries a text fragment and an active flag; a
//! filesystem entry is excluded when at least one *active* rule's
//! trimmed fragment is a case-sensitive substring of the entry's base
//! name. Matching is deliberately simple: no globs, no anchoring, no
//! path components. A rule containing `.git` hides any file or
//! directory whose name contains `.git`, at any depth of the tree.
//!
//! # Design
//!
//! - [`ExclusionRule`] captures the user-supplied fragment together with
//!   its active flag. Inactive rules are retained by callers (so a rule
//!   can be disabled without losing its text) but never applied.
//! - [`ExclusionSet`] owns the compiled form of a rule list: the active
//!   fragments, trimmed once at construction time. Construction is
//!   infallible because substring matching has no compilation step.
//!
//! # Invariants
//!
//! - Only active rules participate in matching.
//! - Fragments are trimmed of surrounding whitespace before comparison.
//! - Rules whose fragment trims to the empty string are dropped during
//!   set construction; an empty fragment is a substring of every name
//!   and would silently exclude the entire tree.
//! - An empty set excludes nothing.
//!
//! # Examples
//!
//! ```
//! use exclusions::{ExclusionRule, ExclusionSet};
//!
//! let set = ExclusionSet::from_rules([
//!     ExclusionRule::new(".git"),
//!     ExclusionRule::inactive("Library"),
//! ]);
//!
//! assert!(set.is_excluded(".git"));
//! assert!(set.is_excluded("submodule.git"));
//! assert!(!set.is_excluded("Library"));
//! ```

mod rule;
mod set;

pub use rule::ExclusionRule;
pub use set::ExclusionSet;

#[cfg(test)]
mod tests;
