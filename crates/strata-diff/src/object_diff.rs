//! Object-level diff: classify one pair of database objects.
//!
//! Parameters and attributes are classified independently and combined
//! into one overall state, so callers can report parameter-level and
//! attribute-level changes separately.

use strata_model::{Blob, Geometry, ObjectRecord};
use strata_types::Tolerance;

use crate::avs_diff::{avs_diff, AvsDiff};

/// Two-way classification of an object or entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffState {
    Unchanged,
    Removed,
    Added,
    Changed,
}

impl DiffState {
    /// Combine two sub-states into one overall state.
    ///
    /// `Unchanged` is the identity, like states keep, and any other
    /// disagreement is `Changed`.
    pub fn combine(self, other: DiffState) -> DiffState {
        match (self, other) {
            (a, b) if a == b => a,
            (DiffState::Unchanged, b) => b,
            (a, DiffState::Unchanged) => a,
            _ => DiffState::Changed,
        }
    }
}

/// Byte-for-byte equality of two parameter blobs.
pub fn blobs_equal(a: &Blob, b: &Blob) -> bool {
    a.data == b.data
}

/// Parameter equality for a pair of present objects.
///
/// The kind tag is compared first: a type change always differs. Arbs
/// additionally compare their canonical subtype, since equivalent
/// geometry can be stored with different vertex arrangements; arbs that
/// fit no subtype fall back to plain payload comparison. Finally the
/// decoded payloads and the raw blobs must both match.
pub fn params_equal(left: &ObjectRecord, right: &ObjectRecord, tol: &Tolerance) -> bool {
    if left.object.kind() != right.object.kind() {
        return false;
    }
    if let (Geometry::Arb(l), Geometry::Arb(r)) =
        (&left.object.geometry, &right.object.geometry)
    {
        if let (Some(lc), Some(rc)) = (l.canonical_class(tol), r.canonical_class(tol)) {
            if lc != rc {
                return false;
            }
        }
    }
    left.object.geometry == right.object.geometry && blobs_equal(&left.blob, &right.blob)
}

/// The outcome of comparing one object pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonReport {
    /// Overall classification: the combination of the two sub-states.
    pub state: DiffState,
    /// Classification of the type-specific parameters.
    pub param_state: DiffState,
    /// Classification of the attribute set.
    pub attr_state: DiffState,
    /// Attribute-level detail. Empty when either object is absent.
    pub attrs: AvsDiff,
}

impl ComparisonReport {
    /// A report driven by presence alone, with no attribute detail.
    pub fn presence(state: DiffState) -> Self {
        Self {
            state,
            param_state: state,
            attr_state: state,
            attrs: AvsDiff::default(),
        }
    }
}

/// Compare a pair of objects, either of which may be absent.
///
/// An object missing on one side classifies as `Added` or `Removed`
/// outright. With both present, parameters are compared with
/// [`params_equal`] and attributes with [`avs_diff`].
pub fn compare_objects(
    left: Option<&ObjectRecord>,
    right: Option<&ObjectRecord>,
    tol: &Tolerance,
) -> ComparisonReport {
    let (left, right) = match (left, right) {
        (None, None) => return ComparisonReport::presence(DiffState::Unchanged),
        (Some(_), None) => return ComparisonReport::presence(DiffState::Removed),
        (None, Some(_)) => return ComparisonReport::presence(DiffState::Added),
        (Some(l), Some(r)) => (l, r),
    };

    let param_state = if params_equal(left, right, tol) {
        DiffState::Unchanged
    } else {
        DiffState::Changed
    };

    let attrs = avs_diff(&left.object.attrs, &right.object.attrs, tol);
    let attr_state = if attrs.is_clean() {
        DiffState::Unchanged
    } else {
        DiffState::Changed
    };

    ComparisonReport {
        state: param_state.combine(attr_state),
        param_state,
        attr_state,
        attrs,
    }
}
