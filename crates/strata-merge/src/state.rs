//! Three-way classification states and the decision table that assigns
//! them.
//!
//! Classification is driven entirely by how each side relates to the
//! ancestor under one equality predicate. Callers build a
//! [`NameDisposition`] from those relations and [`classify`] maps it to
//! a [`DiffState3`] with a single exhaustive match.

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Coarse class used to route sink delivery.
///
/// Conflict states route as changed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DiffClass {
    Unchanged,
    Removed,
    Added,
    Changed,
}

/// Three-way classification of a single name across ancestor, left, and
/// right.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DiffState3 {
    /// Neither side departs from the ancestor.
    Unchanged,
    /// Both sides removed the object.
    RemovedBoth,
    /// Removed on the left; the right side left it untouched.
    RemovedLeft,
    /// Removed on the right; the left side left it untouched.
    RemovedRight,
    /// Added on the left only.
    AddedLeft,
    /// Added on the right only.
    AddedRight,
    /// Added identically on both sides.
    AddedBoth,
    /// Added on both sides with differing content.
    AddedConflict,
    /// Edited on the left only.
    ChangedLeft,
    /// Edited on the right only.
    ChangedRight,
    /// Edited identically on both sides.
    ChangedBoth,
    /// Irreconcilable: divergent edits, or an edit against a removal.
    Conflict,
}

impl DiffState3 {
    /// The sink-routing class for this state.
    pub fn class(self) -> DiffClass {
        match self {
            DiffState3::Unchanged => DiffClass::Unchanged,
            DiffState3::RemovedBoth | DiffState3::RemovedLeft | DiffState3::RemovedRight => {
                DiffClass::Removed
            }
            DiffState3::AddedLeft | DiffState3::AddedRight | DiffState3::AddedBoth => {
                DiffClass::Added
            }
            DiffState3::AddedConflict
            | DiffState3::ChangedLeft
            | DiffState3::ChangedRight
            | DiffState3::ChangedBoth
            | DiffState3::Conflict => DiffClass::Changed,
        }
    }

    /// True for states that need manual resolution.
    pub fn is_conflict(self) -> bool {
        matches!(self, DiffState3::Conflict | DiffState3::AddedConflict)
    }

    /// True for every state other than [`DiffState3::Unchanged`].
    pub fn counts_as_difference(self) -> bool {
        self != DiffState3::Unchanged
    }
}

// ---------------------------------------------------------------------------
// Decision table
// ---------------------------------------------------------------------------

/// How one side of the merge relates to the ancestor for a given name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SideState {
    /// The name is missing on this side.
    Absent,
    /// Present and equal to the ancestor under the tolerance.
    SameAsAncestor,
    /// Present but different from the ancestor.
    DiffersFromAncestor,
}

/// Presence shape of a name across the three snapshots, as seen by one
/// equality predicate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameDisposition {
    /// The ancestor has the name; each side is described relative to it.
    WithAncestor {
        left: SideState,
        right: SideState,
        /// Whether left and right are equal to each other. Only
        /// consulted when both sides diverge from the ancestor.
        sides_match: bool,
    },
    /// No ancestor; only the left side has the name.
    AddedLeftOnly,
    /// No ancestor; only the right side has the name.
    AddedRightOnly,
    /// No ancestor; both sides added it.
    AddedBoth { identical: bool },
}

/// Map a name's three-way disposition to its classification.
///
/// Matching the ancestor on both sides classifies as unchanged even
/// when the two sides are not equal to each other under the tolerance;
/// `sides_match` only decides the case where both sides diverge.
pub fn classify(disposition: NameDisposition) -> DiffState3 {
    use self::SideState::{Absent, DiffersFromAncestor, SameAsAncestor};

    match disposition {
        NameDisposition::WithAncestor {
            left,
            right,
            sides_match,
        } => match (left, right) {
            (Absent, Absent) => DiffState3::RemovedBoth,
            (Absent, SameAsAncestor) => DiffState3::RemovedLeft,
            (Absent, DiffersFromAncestor) => DiffState3::Conflict,
            (SameAsAncestor, Absent) => DiffState3::RemovedRight,
            (SameAsAncestor, SameAsAncestor) => DiffState3::Unchanged,
            (SameAsAncestor, DiffersFromAncestor) => DiffState3::ChangedRight,
            (DiffersFromAncestor, Absent) => DiffState3::Conflict,
            (DiffersFromAncestor, SameAsAncestor) => DiffState3::ChangedLeft,
            (DiffersFromAncestor, DiffersFromAncestor) => {
                if sides_match {
                    DiffState3::ChangedBoth
                } else {
                    DiffState3::Conflict
                }
            }
        },
        NameDisposition::AddedLeftOnly => DiffState3::AddedLeft,
        NameDisposition::AddedRightOnly => DiffState3::AddedRight,
        NameDisposition::AddedBoth { identical: true } => DiffState3::AddedBoth,
        NameDisposition::AddedBoth { identical: false } => DiffState3::AddedConflict,
    }
}
