//! Attribute-set diff: compare two attribute-value sets.
//!
//! Classifies every attribute name into exactly one of five buckets and
//! summarizes which change categories fired.

use strata_types::{AttrSet, Tolerance};

use crate::value::values_equal;

/// Which change categories an attribute diff contains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeFlags {
    /// Some attribute exists only in the right set.
    pub added: bool,
    /// Some attribute exists only in the left set.
    pub removed: bool,
    /// Some attribute has differing values.
    pub changed: bool,
}

impl ChangeFlags {
    /// True when no category fired.
    pub fn is_empty(&self) -> bool {
        !(self.added || self.removed || self.changed)
    }

    /// True when any category fired.
    pub fn any(&self) -> bool {
        !self.is_empty()
    }
}

/// The result of comparing two attribute-value sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvsDiff {
    /// Attributes present only in the right set.
    pub added: AttrSet,
    /// Attributes present only in the left set.
    pub removed: AttrSet,
    /// Left-side values of attributes whose values differ.
    pub changed_left: AttrSet,
    /// Right-side values of attributes whose values differ.
    pub changed_right: AttrSet,
    /// Attributes equal within tolerance, with their left-side values.
    pub unchanged: AttrSet,
    /// Summary of which categories fired.
    pub flags: ChangeFlags,
}

impl AvsDiff {
    /// True when the two sets are equal within tolerance.
    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Compare two attribute-value sets.
///
/// Per left name: absent in right is removed; equal within tolerance is
/// unchanged; otherwise the left and right values land in `changed_left`
/// and `changed_right`. Right names absent from left are added. Every
/// name falls into exactly one bucket.
pub fn avs_diff(left: &AttrSet, right: &AttrSet, tol: &Tolerance) -> AvsDiff {
    let mut diff = AvsDiff::default();

    for (name, left_val) in left.iter() {
        match right.get(name) {
            Some(right_val) => {
                if values_equal(left_val, right_val, tol) {
                    diff.unchanged.insert(name, left_val);
                } else {
                    diff.changed_left.insert(name, left_val);
                    diff.changed_right.insert(name, right_val);
                    diff.flags.changed = true;
                }
            }
            None => {
                diff.removed.insert(name, left_val);
                diff.flags.removed = true;
            }
        }
    }

    for (name, right_val) in right.iter() {
        if !left.contains(name) {
            diff.added.insert(name, right_val);
            diff.flags.added = true;
        }
    }

    diff
}
