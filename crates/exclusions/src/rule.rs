/// User-visible exclusion rule consisting of a text fragment and an
/// active flag.
///
/// The fragment is matched as a case-sensitive substring of entry base
/// names once the rule is compiled into an
/// [`ExclusionSet`](crate::ExclusionSet). Deactivated rules keep their
/// text so a caller can re-enable them later.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExclusionRule {
    pattern: String,
    active: bool,
}

impl ExclusionRule {
    /// Creates an active rule for `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            active: true,
        }
    }

    /// Creates a deactivated rule for `pattern`.
    #[must_use]
    pub fn inactive(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            active: false,
        }
    }

    /// Returns the fragment text associated with the rule, untrimmed.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns whether the rule participates in matching.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}
