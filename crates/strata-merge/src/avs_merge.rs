//! Three-way merge of attribute sets.
//!
//! Every attribute name present in any of the three sets gets exactly
//! one [`AttrOutcome`]. Clean outcomes land in the merged set directly;
//! conflicts stay in-band as synthetic `CONFLICT(...)` entries carrying
//! every contested value.

use strata_diff::values_equal;
use strata_types::{AttrSet, Tolerance};

use crate::state::{classify, DiffState3, NameDisposition, SideState};

/// Key prefix for the ancestor's value of a conflicted attribute.
pub const CONFLICT_ANCESTOR_PREFIX: &str = "CONFLICT(ANCESTOR):";
/// Key prefix for the left side's value of a conflicted attribute.
pub const CONFLICT_LEFT_PREFIX: &str = "CONFLICT(LEFT):";
/// Key prefix for the right side's value of a conflicted attribute.
pub const CONFLICT_RIGHT_PREFIX: &str = "CONFLICT(RIGHT):";
/// Stand-in value recorded when a conflicted side removed the attribute.
pub const REMOVED_VALUE: &str = "REMOVED";

/// What the merge decided to do with one attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// The attribute survives with this value.
    Keep(String),
    /// The attribute is removed from the merged set.
    Drop,
    /// The attribute is contested; the merged set carries one synthetic
    /// `CONFLICT(...)` entry per recorded value instead of the bare
    /// name.
    Conflict {
        ancestor: Option<String>,
        left: Option<String>,
        right: Option<String>,
    },
}

/// Classification and resolution for a single attribute name.
#[derive(Clone, Debug, PartialEq)]
pub struct AttrOutcome {
    pub name: String,
    pub state: DiffState3,
    pub resolution: Resolution,
}

/// Result of a three-way attribute merge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AvsMerge {
    /// The merged attribute set, conflict entries included.
    pub merged: AttrSet,
    /// One outcome per distinct name: ancestor names first, then
    /// left-side additions, then right-side additions, each in name
    /// order.
    pub outcomes: Vec<AttrOutcome>,
}

impl AvsMerge {
    /// True when any attribute departs from the ancestor.
    pub fn has_differences(&self) -> bool {
        self.outcomes.iter().any(|o| o.state.counts_as_difference())
    }

    /// True when any attribute is contested.
    pub fn has_conflicts(&self) -> bool {
        self.outcomes.iter().any(|o| o.state.is_conflict())
    }

    /// The contested outcomes.
    pub fn conflicts(&self) -> impl Iterator<Item = &AttrOutcome> {
        self.outcomes.iter().filter(|o| o.state.is_conflict())
    }
}

/// Merge two descendant attribute sets against their common ancestor.
///
/// Value comparisons use [`values_equal`], so numeric and point-valued
/// attributes merge cleanly across formatting differences within the
/// tolerance. An ancestor object that never existed is expressed as an
/// empty set.
pub fn avs_merge(left: &AttrSet, ancestor: &AttrSet, right: &AttrSet, tol: &Tolerance) -> AvsMerge {
    let mut result = AvsMerge::default();

    for (name, anc_val) in ancestor.iter() {
        let left_val = left.get(name);
        let right_val = right.get(name);
        let sides_match = match (left_val, right_val) {
            (Some(l), Some(r)) => values_equal(l, r, tol),
            _ => false,
        };
        let state = classify(NameDisposition::WithAncestor {
            left: side_state(left_val, anc_val, tol),
            right: side_state(right_val, anc_val, tol),
            sides_match,
        });

        let resolution = match state {
            DiffState3::Unchanged => Resolution::Keep(anc_val.to_string()),
            DiffState3::RemovedBoth | DiffState3::RemovedLeft | DiffState3::RemovedRight => {
                Resolution::Drop
            }
            DiffState3::ChangedLeft | DiffState3::ChangedBoth => {
                // A changed side is always present.
                Resolution::Keep(left_val.unwrap_or(anc_val).to_string())
            }
            DiffState3::ChangedRight => Resolution::Keep(right_val.unwrap_or(anc_val).to_string()),
            _ => Resolution::Conflict {
                ancestor: Some(anc_val.to_string()),
                left: left_val.map(str::to_string),
                right: right_val.map(str::to_string),
            },
        };
        record(&mut result, name, state, resolution);
    }

    for (name, left_val) in left.iter() {
        if ancestor.contains(name) {
            continue;
        }
        let (state, resolution) = match right.get(name) {
            None => (
                DiffState3::AddedLeft,
                Resolution::Keep(left_val.to_string()),
            ),
            Some(right_val) if values_equal(left_val, right_val, tol) => (
                DiffState3::AddedBoth,
                Resolution::Keep(left_val.to_string()),
            ),
            Some(right_val) => (
                DiffState3::AddedConflict,
                Resolution::Conflict {
                    ancestor: None,
                    left: Some(left_val.to_string()),
                    right: Some(right_val.to_string()),
                },
            ),
        };
        record(&mut result, name, state, resolution);
    }

    for (name, right_val) in right.iter() {
        if ancestor.contains(name) || left.contains(name) {
            continue;
        }
        record(
            &mut result,
            name,
            DiffState3::AddedRight,
            Resolution::Keep(right_val.to_string()),
        );
    }

    result
}

fn side_state(value: Option<&str>, ancestor: &str, tol: &Tolerance) -> SideState {
    match value {
        None => SideState::Absent,
        Some(v) if values_equal(v, ancestor, tol) => SideState::SameAsAncestor,
        Some(_) => SideState::DiffersFromAncestor,
    }
}

/// Apply a resolution to the merged set and log the outcome.
fn record(result: &mut AvsMerge, name: &str, state: DiffState3, resolution: Resolution) {
    match &resolution {
        Resolution::Keep(value) => {
            result.merged.insert(name, value.clone());
        }
        Resolution::Drop => {}
        Resolution::Conflict {
            ancestor,
            left,
            right,
        } => {
            if let Some(value) = ancestor {
                result
                    .merged
                    .insert(format!("{CONFLICT_ANCESTOR_PREFIX}{name}"), value.clone());
            }
            result.merged.insert(
                format!("{CONFLICT_LEFT_PREFIX}{name}"),
                left.clone().unwrap_or_else(|| REMOVED_VALUE.to_string()),
            );
            result.merged.insert(
                format!("{CONFLICT_RIGHT_PREFIX}{name}"),
                right.clone().unwrap_or_else(|| REMOVED_VALUE.to_string()),
            );
        }
    }
    result.outcomes.push(AttrOutcome {
        name: name.to_string(),
        state,
        resolution,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttrSet {
        pairs.iter().copied().collect()
    }

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn merge(left: &[(&str, &str)], anc: &[(&str, &str)], right: &[(&str, &str)]) -> AvsMerge {
        avs_merge(&attrs(left), &attrs(anc), &attrs(right), &tol())
    }

    fn outcome<'a>(result: &'a AvsMerge, name: &str) -> &'a AttrOutcome {
        result
            .outcomes
            .iter()
            .find(|o| o.name == name)
            .expect("outcome for name")
    }

    // -----------------------------------------------------------------------
    // Clean merges
    // -----------------------------------------------------------------------

    #[test]
    fn identical_sets_merge_to_themselves() {
        let set = &[("color", "red"), ("units", "mm")];
        let result = merge(set, set, set);

        assert_eq!(result.merged, attrs(set));
        assert!(!result.has_differences());
        assert!(!result.has_conflicts());
    }

    #[test]
    fn one_sided_change_wins() {
        let result = merge(&[("k", "2")], &[("k", "1")], &[("k", "1")]);
        assert_eq!(outcome(&result, "k").state, DiffState3::ChangedLeft);
        assert_eq!(result.merged.get("k"), Some("2"));

        let result = merge(&[("k", "1")], &[("k", "1")], &[("k", "3")]);
        assert_eq!(outcome(&result, "k").state, DiffState3::ChangedRight);
        assert_eq!(result.merged.get("k"), Some("3"));
    }

    #[test]
    fn removal_against_unchanged_side_drops_the_attribute() {
        let result = merge(&[], &[("k", "1")], &[("k", "1")]);
        assert_eq!(outcome(&result, "k").state, DiffState3::RemovedLeft);
        assert!(result.merged.is_empty());
        assert!(result.has_differences());
        assert!(!result.has_conflicts());
    }

    #[test]
    fn removal_on_both_sides_drops_the_attribute() {
        let result = merge(&[], &[("k", "1")], &[]);
        assert_eq!(outcome(&result, "k").state, DiffState3::RemovedBoth);
        assert!(result.merged.is_empty());
    }

    #[test]
    fn both_changed_identically_keeps_the_left_text() {
        let result = merge(&[("k", "2.0")], &[("k", "1")], &[("k", "2.00")]);
        assert_eq!(outcome(&result, "k").state, DiffState3::ChangedBoth);
        assert_eq!(result.merged.get("k"), Some("2.0"));
    }

    #[test]
    fn unchanged_attribute_keeps_the_ancestor_text() {
        // Both sides are within tolerance of the ancestor, so the
        // ancestor's spelling survives.
        let result = merge(&[("d", "1.0001")], &[("d", "1.0")], &[("d", "1.0")]);
        assert_eq!(outcome(&result, "d").state, DiffState3::Unchanged);
        assert_eq!(result.merged.get("d"), Some("1.0"));
    }

    #[test]
    fn added_on_one_side_is_kept() {
        let result = merge(&[("k", "x")], &[], &[]);
        assert_eq!(outcome(&result, "k").state, DiffState3::AddedLeft);
        assert_eq!(result.merged.get("k"), Some("x"));

        let result = merge(&[], &[], &[("k", "y")]);
        assert_eq!(outcome(&result, "k").state, DiffState3::AddedRight);
        assert_eq!(result.merged.get("k"), Some("y"));
    }

    #[test]
    fn added_both_identical_keeps_the_left_text() {
        let result = merge(&[("k", "1.0")], &[], &[("k", "1.00")]);
        assert_eq!(outcome(&result, "k").state, DiffState3::AddedBoth);
        assert_eq!(result.merged.get("k"), Some("1.0"));
    }

    // -----------------------------------------------------------------------
    // Conflicts
    // -----------------------------------------------------------------------

    #[test]
    fn divergent_edits_produce_conflict_entries() {
        let result = merge(&[("k", "2")], &[("k", "1")], &[("k", "3")]);

        assert_eq!(outcome(&result, "k").state, DiffState3::Conflict);
        assert!(result.has_conflicts());
        assert_eq!(result.merged.get("CONFLICT(ANCESTOR):k"), Some("1"));
        assert_eq!(result.merged.get("CONFLICT(LEFT):k"), Some("2"));
        assert_eq!(result.merged.get("CONFLICT(RIGHT):k"), Some("3"));
        // The bare name never survives a conflict.
        assert_eq!(result.merged.get("k"), None);
        assert_eq!(result.merged.len(), 3);
    }

    #[test]
    fn edit_against_removal_records_the_removed_side() {
        let result = merge(&[], &[("k", "1")], &[("k", "2")]);

        assert_eq!(outcome(&result, "k").state, DiffState3::Conflict);
        assert_eq!(result.merged.get("CONFLICT(ANCESTOR):k"), Some("1"));
        assert_eq!(result.merged.get("CONFLICT(LEFT):k"), Some(REMOVED_VALUE));
        assert_eq!(result.merged.get("CONFLICT(RIGHT):k"), Some("2"));
    }

    #[test]
    fn added_both_divergent_has_no_ancestor_entry() {
        let result = merge(&[("k", "a")], &[], &[("k", "b")]);

        assert_eq!(outcome(&result, "k").state, DiffState3::AddedConflict);
        assert_eq!(result.merged.get("CONFLICT(ANCESTOR):k"), None);
        assert_eq!(result.merged.get("CONFLICT(LEFT):k"), Some("a"));
        assert_eq!(result.merged.get("CONFLICT(RIGHT):k"), Some("b"));
        assert_eq!(result.merged.get("k"), None);
    }

    // -----------------------------------------------------------------------
    // Bookkeeping
    // -----------------------------------------------------------------------

    #[test]
    fn every_name_gets_exactly_one_outcome() {
        let result = merge(
            &[("a", "1"), ("b", "2"), ("l", "x")],
            &[("a", "1"), ("b", "1"), ("c", "1")],
            &[("a", "1"), ("c", "1"), ("r", "y")],
        );

        let mut names: Vec<&str> = result.outcomes.iter().map(|o| o.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b", "c", "l", "r"]);
    }

    #[test]
    fn conflicts_accessor_filters_contested_outcomes() {
        let result = merge(
            &[("clean", "2"), ("fight", "x")],
            &[("clean", "1"), ("fight", "1")],
            &[("clean", "1"), ("fight", "y")],
        );

        let contested: Vec<&str> = result.conflicts().map(|o| o.name.as_str()).collect();
        assert_eq!(contested, vec!["fight"]);
        assert!(result.has_differences());
    }
}
