use crate::{ExclusionRule, ExclusionSet};

#[test]
fn empty_set_excludes_nothing() {
    let set = ExclusionSet::from_rules(Vec::<ExclusionRule>::new());
    assert!(set.is_empty());
    assert!(!set.is_excluded(".git"));
    assert!(!set.is_excluded(""));
}

#[test]
fn substring_match_on_base_name() {
    let set = ExclusionSet::from_rules([ExclusionRule::new(".git")]);
    assert!(set.is_excluded(".git"));
    assert!(set.is_excluded(".gitignore"));
    assert!(set.is_excluded("submodule.git"));
    assert!(!set.is_excluded("git"));
    assert!(!set.is_excluded("config"));
}

#[test]
fn matching_is_case_sensitive() {
    let set = ExclusionSet::from_rules([ExclusionRule::new("Library")]);
    assert!(set.is_excluded("Library"));
    assert!(!set.is_excluded("library"));
}

#[test]
fn fragments_are_trimmed_once() {
    let set = ExclusionSet::from_rules([ExclusionRule::new("  .git\t")]);
    assert_eq!(set.len(), 1);
    assert!(set.is_excluded(".git"));
}

#[test]
fn inactive_rules_never_apply() {
    let rule = ExclusionRule::new(".git").with_active(false);
    assert!(!rule.is_active());
    let set = ExclusionSet::from_rules([rule]);
    assert!(set.is_empty());
    assert!(!set.is_excluded(".git"));
}

#[test]
fn reactivated_rule_applies_again() {
    let rule = ExclusionRule::inactive("Temp").with_active(true);
    let set = ExclusionSet::from_rules([rule]);
    assert!(set.is_excluded("TempCache"));
}

#[test]
fn whitespace_only_fragment_is_dropped() {
    let set = ExclusionSet::from_rules([ExclusionRule::new("   "), ExclusionRule::new("")]);
    assert!(set.is_empty());
    assert!(!set.is_excluded("anything"));
}

#[test]
fn any_active_rule_suffices() {
    let set = ExclusionSet::from_rules([
        ExclusionRule::inactive(".git"),
        ExclusionRule::new("~"),
    ]);
    assert!(set.is_excluded("notes.txt~"));
    assert!(!set.is_excluded(".git"));
}

#[test]
fn os_names_match_through_lossy_rendering() {
    use std::ffi::OsStr;

    let set = ExclusionSet::from_fragments([".git"]);
    assert!(set.is_excluded_os(OsStr::new(".git")));
    assert!(!set.is_excluded_os(OsStr::new("Assets")));
}

#[cfg(feature = "serde")]
#[test]
fn rules_round_trip_through_json() {
    let rules = vec![ExclusionRule::new(".git"), ExclusionRule::inactive("Temp")];
    let json = serde_json::to_string(&rules).expect("serialize rules");
    let back: Vec<ExclusionRule> = serde_json::from_str(&json).expect("deserialize rules");
    assert_eq!(rules, back);
}
