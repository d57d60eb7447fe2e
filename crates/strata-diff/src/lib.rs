//! Diff engine for Strata.
//!
//! Computes two-way diffs between database snapshots: tolerance-aware value
//! comparison, attribute-set diffs, object-pair classification, and the
//! snapshot scan that drives caller sinks.
//!
//! # Key Types
//!
//! - [`values_equal`] -- Tolerance-aware equality over attribute values
//! - [`AvsDiff`] / [`ChangeFlags`] -- Attribute-set diff buckets and summary
//! - [`DiffState`] / [`ComparisonReport`] -- Object-pair classification
//! - [`DiffSink`] / [`SnapshotDiff`] -- Per-entry result delivery
//! - [`diff`] -- The two-way snapshot scan

pub mod avs_diff;
pub mod error;
pub mod object_diff;
pub mod snapshot_diff;
pub mod value;

pub use avs_diff::{avs_diff, AvsDiff, ChangeFlags};
pub use error::{DiffError, DiffResult, SinkError, SinkResult};
pub use object_diff::{blobs_equal, compare_objects, params_equal, ComparisonReport, DiffState};
pub use snapshot_diff::{diff, DiffSink, EntryDiff, SnapshotDiff};
pub use value::values_equal;
