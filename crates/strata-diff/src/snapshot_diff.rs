//! Snapshot-level diff: walk two snapshots and classify every entry.
//!
//! The scan visits every left entry, then every right-only entry, firing
//! exactly one sink method per classified entry. Entries whose objects
//! cannot be fetched are logged and skipped; the scan always runs to
//! completion.

use tracing::{debug, warn};

use strata_model::{DirEntry, Snapshot};
use strata_types::Tolerance;

use crate::error::{DiffError, DiffResult, SinkResult};
use crate::object_diff::{compare_objects, ComparisonReport, DiffState};

/// One classified entry from a two-way snapshot scan.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryDiff {
    /// Entry name.
    pub name: String,
    /// Directory entry on the left side, if present.
    pub left: Option<DirEntry>,
    /// Directory entry on the right side, if present.
    pub right: Option<DirEntry>,
    /// Object-level classification and attribute detail.
    pub report: ComparisonReport,
}

/// Receiver for per-entry scan results.
///
/// Exactly one method fires per classified entry. The default methods do
/// nothing, so implementors override only the categories they care
/// about. A returned error is tallied by the driver and the scan
/// continues.
pub trait DiffSink {
    fn on_added(&mut self, _diff: &EntryDiff) -> SinkResult {
        Ok(())
    }

    fn on_removed(&mut self, _diff: &EntryDiff) -> SinkResult {
        Ok(())
    }

    fn on_changed(&mut self, _diff: &EntryDiff) -> SinkResult {
        Ok(())
    }

    fn on_unchanged(&mut self, _diff: &EntryDiff) -> SinkResult {
        Ok(())
    }
}

/// Collecting sink: buckets every classified entry by state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotDiff {
    pub added: Vec<EntryDiff>,
    pub removed: Vec<EntryDiff>,
    pub changed: Vec<EntryDiff>,
    pub unchanged: Vec<EntryDiff>,
}

impl SnapshotDiff {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries that differ.
    pub fn differences(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// True when no entry differs.
    pub fn is_clean(&self) -> bool {
        self.differences() == 0
    }
}

impl DiffSink for SnapshotDiff {
    fn on_added(&mut self, diff: &EntryDiff) -> SinkResult {
        self.added.push(diff.clone());
        Ok(())
    }

    fn on_removed(&mut self, diff: &EntryDiff) -> SinkResult {
        self.removed.push(diff.clone());
        Ok(())
    }

    fn on_changed(&mut self, diff: &EntryDiff) -> SinkResult {
        self.changed.push(diff.clone());
        Ok(())
    }

    fn on_unchanged(&mut self, diff: &EntryDiff) -> SinkResult {
        self.unchanged.push(diff.clone());
        Ok(())
    }
}

/// Compare two snapshots entry by entry.
///
/// Left entries absent from the right are removed; right entries absent
/// from the left are added. Both classifications come from directory
/// presence alone, so no fetch is attempted for them. Entries present on
/// both sides are fetched and compared with [`compare_objects`]; a fetch
/// failure on either side logs a warning, counts as a per-entry error,
/// and skips the entry without firing the sink.
///
/// Returns the number of non-unchanged entries, unless per-entry errors
/// occurred, in which case the error tally replaces the count.
pub fn diff(
    left: &dyn Snapshot,
    right: &dyn Snapshot,
    tol: &Tolerance,
    sink: &mut dyn DiffSink,
) -> DiffResult<usize> {
    tol.validate()?;

    let mut differences = 0usize;
    let mut errors = 0usize;

    for left_entry in left.entries() {
        let name = left_entry.name.clone();
        let Some(right_entry) = right.lookup(&name) else {
            let entry_diff = EntryDiff {
                name,
                left: Some(left_entry),
                right: None,
                report: ComparisonReport::presence(DiffState::Removed),
            };
            differences += 1;
            deliver(sink, &entry_diff, &mut errors);
            continue;
        };

        let left_record = match left.fetch(&left_entry) {
            Ok(record) => record,
            Err(e) => {
                warn!(name = %name, error = %e, "cannot fetch left object; skipping entry");
                errors += 1;
                continue;
            }
        };
        let right_record = match right.fetch(&right_entry) {
            Ok(record) => record,
            Err(e) => {
                warn!(name = %name, error = %e, "cannot fetch right object; skipping entry");
                errors += 1;
                continue;
            }
        };

        let report = compare_objects(Some(&left_record), Some(&right_record), tol);
        if report.state != DiffState::Unchanged {
            differences += 1;
        }
        let entry_diff = EntryDiff {
            name,
            left: Some(left_entry),
            right: Some(right_entry),
            report,
        };
        deliver(sink, &entry_diff, &mut errors);
    }

    for right_entry in right.entries() {
        if left.lookup(&right_entry.name).is_some() {
            continue;
        }
        let entry_diff = EntryDiff {
            name: right_entry.name.clone(),
            left: None,
            right: Some(right_entry),
            report: ComparisonReport::presence(DiffState::Added),
        };
        differences += 1;
        deliver(sink, &entry_diff, &mut errors);
    }

    if errors > 0 {
        debug!(errors, "snapshot diff finished with per-entry errors");
        return Err(DiffError::ScanFailed { errors });
    }
    debug!(differences, "snapshot diff complete");
    Ok(differences)
}

/// Fire the one sink method matching the entry's state, tallying a
/// rejection as a per-entry error.
fn deliver(sink: &mut dyn DiffSink, diff: &EntryDiff, errors: &mut usize) {
    let result = match diff.report.state {
        DiffState::Added => sink.on_added(diff),
        DiffState::Removed => sink.on_removed(diff),
        DiffState::Changed => sink.on_changed(diff),
        DiffState::Unchanged => sink.on_unchanged(diff),
    };
    if let Err(e) = result {
        warn!(name = %diff.name, error = %e, "sink rejected entry");
        *errors += 1;
    }
}
