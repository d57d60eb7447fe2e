//! Three-way merge engine for Strata.
//!
//! Extends the two-way diff in `strata-diff` with an ancestor snapshot:
//! every name is classified against the side it changed on, attribute
//! sets are merged value by value, and irreconcilable edits surface as
//! conflicts instead of aborting the scan.
//!
//! # Key Types
//!
//! - [`DiffState3`] / [`DiffClass`] -- Three-way classification and routing
//! - [`AvsMerge`] / [`Resolution`] -- Per-attribute merge outcomes
//! - [`MergeReport`] -- Object-triple classification
//! - [`MergeSink`] / [`SnapshotMerge`] -- Per-entry result delivery
//! - [`diff3`] -- The three-way snapshot scan

pub mod avs_merge;
pub mod error;
pub mod object_merge;
pub mod snapshot_merge;
pub mod state;

pub use avs_merge::{
    avs_merge, AttrOutcome, AvsMerge, Resolution, CONFLICT_ANCESTOR_PREFIX, CONFLICT_LEFT_PREFIX,
    CONFLICT_RIGHT_PREFIX, REMOVED_VALUE,
};
pub use error::{MergeError, MergeResult, SinkError, SinkResult};
pub use object_merge::{compare_objects3, MergeReport};
pub use snapshot_merge::{diff3, EntryMerge, MergeSink, SnapshotMerge};
pub use state::{classify, DiffClass, DiffState3, NameDisposition, SideState};
