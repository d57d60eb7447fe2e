//! Three-way comparison of a single object across ancestor, left, and
//! right records.

use strata_diff::{avs_diff, params_equal};
use strata_model::ObjectRecord;
use strata_types::{AttrSet, Tolerance};

use crate::avs_merge::{avs_merge, AvsMerge};
use crate::state::{classify, DiffState3, NameDisposition, SideState};

/// The outcome of comparing one object triple.
///
/// The overall state is computed from full-object equality; the
/// parameter and attribute states re-run the same classification with
/// equality restricted to one aspect, so a caller can tell which half
/// of the object moved.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeReport {
    /// Overall classification.
    pub state: DiffState3,
    /// Classification considering parameters only.
    pub param_state: DiffState3,
    /// Classification considering attributes only.
    pub attr_state: DiffState3,
    /// Per-attribute merge. Populated only when both sides carry the
    /// object; presence-level removals have nothing to merge.
    pub attrs: AvsMerge,
}

impl MergeReport {
    /// Report for a classification derived from directory presence
    /// alone, with no attribute detail.
    pub fn presence(state: DiffState3) -> Self {
        Self {
            state,
            param_state: state,
            attr_state: state,
            attrs: AvsMerge::default(),
        }
    }
}

/// Classify the triple under one equality predicate.
fn classify_by<F>(
    left: Option<&ObjectRecord>,
    ancestor: Option<&ObjectRecord>,
    right: Option<&ObjectRecord>,
    equal: F,
) -> DiffState3
where
    F: Fn(&ObjectRecord, &ObjectRecord) -> bool,
{
    let disposition = match ancestor {
        Some(anc) => {
            let side = |record: Option<&ObjectRecord>| match record {
                None => SideState::Absent,
                Some(r) if equal(r, anc) => SideState::SameAsAncestor,
                Some(_) => SideState::DiffersFromAncestor,
            };
            let sides_match = match (left, right) {
                (Some(l), Some(r)) => equal(l, r),
                _ => false,
            };
            NameDisposition::WithAncestor {
                left: side(left),
                right: side(right),
                sides_match,
            }
        }
        None => match (left, right) {
            (None, None) => return DiffState3::Unchanged,
            (Some(_), None) => NameDisposition::AddedLeftOnly,
            (None, Some(_)) => NameDisposition::AddedRightOnly,
            (Some(l), Some(r)) => NameDisposition::AddedBoth {
                identical: equal(l, r),
            },
        },
    };
    classify(disposition)
}

/// Compare one object across the three snapshots of a merge.
///
/// Any record may be absent. The overall state requires parameters and
/// attributes to both match, so edits to different aspects on different
/// sides classify as a conflict even though each aspect merges cleanly
/// on its own.
pub fn compare_objects3(
    left: Option<&ObjectRecord>,
    ancestor: Option<&ObjectRecord>,
    right: Option<&ObjectRecord>,
    tol: &Tolerance,
) -> MergeReport {
    let params = |a: &ObjectRecord, b: &ObjectRecord| params_equal(a, b, tol);
    let attrs_clean = |a: &ObjectRecord, b: &ObjectRecord| {
        avs_diff(&a.object.attrs, &b.object.attrs, tol).is_clean()
    };

    let param_state = classify_by(left, ancestor, right, params);
    let attr_state = classify_by(left, ancestor, right, attrs_clean);
    let state = classify_by(left, ancestor, right, |a, b| params(a, b) && attrs_clean(a, b));

    let attrs = match (left, right) {
        (Some(l), Some(r)) => {
            let empty = AttrSet::new();
            let ancestor_attrs = ancestor.map_or(&empty, |a| &a.object.attrs);
            avs_merge(&l.object.attrs, ancestor_attrs, &r.object.attrs, tol)
        }
        _ => AvsMerge::default(),
    };

    MergeReport {
        state,
        param_state,
        attr_state,
        attrs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::{Ellipsoid, Geometry, ModelObject};

    fn record(object: ModelObject) -> ObjectRecord {
        ObjectRecord::from_object(object).unwrap()
    }

    fn sphere(radius: f64) -> ObjectRecord {
        record(ModelObject::new(Geometry::Ellipsoid(Ellipsoid::sphere(
            [0.0, 0.0, 0.0],
            radius,
        ))))
    }

    fn sphere_with_attrs(radius: f64, pairs: &[(&str, &str)]) -> ObjectRecord {
        let attrs: AttrSet = pairs.iter().copied().collect();
        record(ModelObject::with_attrs(
            Geometry::Ellipsoid(Ellipsoid::sphere([0.0, 0.0, 0.0], radius)),
            attrs,
        ))
    }

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn unchanged_triple() {
        let a = sphere(1.0);
        let report = compare_objects3(Some(&a), Some(&a), Some(&a), &tol());

        assert_eq!(report.state, DiffState3::Unchanged);
        assert_eq!(report.param_state, DiffState3::Unchanged);
        assert_eq!(report.attr_state, DiffState3::Unchanged);
        assert!(!report.attrs.has_differences());
    }

    #[test]
    fn absent_everywhere_is_unchanged() {
        let report = compare_objects3(None, None, None, &tol());
        assert_eq!(report.state, DiffState3::Unchanged);
    }

    #[test]
    fn one_sided_parameter_edit() {
        let anc = sphere(1.0);
        let edited = sphere(2.0);
        let report = compare_objects3(Some(&edited), Some(&anc), Some(&anc), &tol());

        assert_eq!(report.state, DiffState3::ChangedLeft);
        assert_eq!(report.param_state, DiffState3::ChangedLeft);
        assert_eq!(report.attr_state, DiffState3::Unchanged);
    }

    #[test]
    fn one_sided_attribute_edit() {
        let anc = sphere_with_attrs(1.0, &[("color", "red")]);
        let edited = sphere_with_attrs(1.0, &[("color", "blue")]);
        let report = compare_objects3(Some(&anc), Some(&anc), Some(&edited), &tol());

        assert_eq!(report.state, DiffState3::ChangedRight);
        assert_eq!(report.param_state, DiffState3::Unchanged);
        assert_eq!(report.attr_state, DiffState3::ChangedRight);
        assert_eq!(report.attrs.merged.get("color"), Some("blue"));
    }

    #[test]
    fn opposite_aspect_edits_conflict_overall() {
        let anc = sphere_with_attrs(1.0, &[("color", "red")]);
        let left = sphere_with_attrs(2.0, &[("color", "red")]);
        let right = sphere_with_attrs(1.0, &[("color", "blue")]);
        let report = compare_objects3(Some(&left), Some(&anc), Some(&right), &tol());

        // Each aspect merges cleanly on its own side, but the objects as
        // a whole diverged three ways.
        assert_eq!(report.param_state, DiffState3::ChangedLeft);
        assert_eq!(report.attr_state, DiffState3::ChangedRight);
        assert_eq!(report.state, DiffState3::Conflict);
        assert_eq!(report.attrs.merged.get("color"), Some("blue"));
    }

    #[test]
    fn removed_on_one_side() {
        let a = sphere(1.0);
        let report = compare_objects3(Some(&a), Some(&a), None, &tol());

        assert_eq!(report.state, DiffState3::RemovedRight);
        assert_eq!(report.param_state, DiffState3::RemovedRight);
        assert_eq!(report.attr_state, DiffState3::RemovedRight);
        assert!(report.attrs.outcomes.is_empty());
    }

    #[test]
    fn edit_against_object_removal_conflicts() {
        let anc = sphere(1.0);
        let edited = sphere(2.0);
        let report = compare_objects3(Some(&edited), Some(&anc), None, &tol());

        assert_eq!(report.state, DiffState3::Conflict);
        assert_eq!(report.param_state, DiffState3::Conflict);
        assert_eq!(report.attr_state, DiffState3::RemovedRight);
    }

    #[test]
    fn added_identically_on_both_sides() {
        let new = sphere(1.0);
        let report = compare_objects3(Some(&new), None, Some(&new), &tol());

        assert_eq!(report.state, DiffState3::AddedBoth);
        assert_eq!(report.param_state, DiffState3::AddedBoth);
        assert_eq!(report.attr_state, DiffState3::AddedBoth);
    }

    #[test]
    fn added_divergently_on_both_sides() {
        let left = sphere(1.0);
        let right = sphere(2.0);
        let report = compare_objects3(Some(&left), None, Some(&right), &tol());

        assert_eq!(report.state, DiffState3::AddedConflict);
        assert_eq!(report.param_state, DiffState3::AddedConflict);
        assert_eq!(report.attr_state, DiffState3::AddedBoth);
    }

    #[test]
    fn new_object_attrs_merge_against_an_empty_ancestor() {
        let left = sphere_with_attrs(1.0, &[("k", "a")]);
        let right = sphere_with_attrs(1.0, &[("k", "b")]);
        let report = compare_objects3(Some(&left), None, Some(&right), &tol());

        assert_eq!(report.attrs.merged.get("CONFLICT(LEFT):k"), Some("a"));
        assert_eq!(report.attrs.merged.get("CONFLICT(RIGHT):k"), Some("b"));
        assert_eq!(report.attrs.merged.get("CONFLICT(ANCESTOR):k"), None);
    }

    #[test]
    fn presence_report_has_no_attribute_detail() {
        let report = MergeReport::presence(DiffState3::RemovedBoth);
        assert_eq!(report.state, DiffState3::RemovedBoth);
        assert_eq!(report.param_state, DiffState3::RemovedBoth);
        assert!(report.attrs.outcomes.is_empty());
    }
}
