use std::ffi::OsStr;

use crate::ExclusionRule;

/// Compiled, immutable collection of exclusion rules for fast name
/// matching.
///
/// An `ExclusionSet` is built from a sequence of [`ExclusionRule`]s via
/// [`from_rules`](Self::from_rules). Construction keeps only the active
/// rules, trims each fragment once, and discards fragments that trim to
/// the empty string. Matching then reduces to a substring scan over the
/// retained fragments.
///
/// # Examples
///
/// ```
/// use exclusions::{ExclusionRule, ExclusionSet};
///
/// let set = ExclusionSet::from_rules([ExclusionRule::new("  .git  ")]);
/// assert!(set.is_excluded(".gitignore"));
/// assert!(!set.is_excluded("config"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExclusionSet {
    fragments: Vec<String>,
}

impl ExclusionSet {
    /// Builds an [`ExclusionSet`] from the supplied rules.
    ///
    /// Inactive rules and rules whose fragment trims to the empty
    /// string are skipped.
    #[must_use]
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = ExclusionRule>,
    {
        let fragments = rules
            .into_iter()
            .filter(ExclusionRule::is_active)
            .filter_map(|rule| {
                let trimmed = rule.pattern().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            })
            .collect();
        Self { fragments }
    }

    /// Builds a set where every fragment is an active rule.
    #[must_use]
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rules(fragments.into_iter().map(ExclusionRule::new))
    }

    /// Returns `true` if the set contains no usable fragments.
    ///
    /// An empty set excludes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns the number of usable fragments retained at construction.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns `true` if `name` matches at least one fragment.
    ///
    /// `name` must be a single path component (file or directory base
    /// name), never a full path. Comparison is case-sensitive.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.fragments
            .iter()
            .any(|fragment| name.contains(fragment.as_str()))
    }

    /// Returns `true` if the OS-native `name` matches at least one
    /// fragment.
    ///
    /// Non-UTF-8 names are compared through their lossy rendering;
    /// fragments are defined over text.
    #[must_use]
    pub fn is_excluded_os(&self, name: &OsStr) -> bool {
        if self.fragments.is_empty() {
            return false;
        }
        self.is_excluded(&name.to_string_lossy())
    }
}

impl FromIterator<ExclusionRule> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ExclusionRule>>(rules: I) -> Self {
        Self::from_rules(rules)
    }
}
