//! Snapshot-level three-way merge scan.
//!
//! Walks the union of names across ancestor, left, and right, fires one
//! sink method per name, and reports how many names depart from the
//! ancestor. Entries whose objects cannot be fetched are logged and
//! skipped; the scan always runs to completion.

use tracing::{debug, warn};

use strata_model::{DirEntry, ModelError, ObjectRecord, Snapshot};
use strata_types::Tolerance;

use crate::error::{MergeError, MergeResult, SinkResult};
use crate::object_merge::{compare_objects3, MergeReport};
use crate::state::{DiffClass, DiffState3};

/// One classified name from a three-way snapshot scan.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryMerge {
    /// Entry name.
    pub name: String,
    /// Directory entry on the left side, if present.
    pub left: Option<DirEntry>,
    /// Directory entry in the ancestor, if present.
    pub ancestor: Option<DirEntry>,
    /// Directory entry on the right side, if present.
    pub right: Option<DirEntry>,
    /// Object-level classification, with attribute merge detail.
    pub report: MergeReport,
}

/// Receiver for per-name merge results.
///
/// Routing follows [`DiffState3::class`], so conflict states arrive via
/// `on_changed` with the precise state in the report. Exactly one
/// method fires per classified name. The default methods do nothing. A
/// returned error is tallied by the driver and the scan continues.
pub trait MergeSink {
    fn on_added(&mut self, _merge: &EntryMerge) -> SinkResult {
        Ok(())
    }

    fn on_removed(&mut self, _merge: &EntryMerge) -> SinkResult {
        Ok(())
    }

    fn on_changed(&mut self, _merge: &EntryMerge) -> SinkResult {
        Ok(())
    }

    fn on_unchanged(&mut self, _merge: &EntryMerge) -> SinkResult {
        Ok(())
    }
}

/// Collecting sink: buckets every classified name by routing class.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnapshotMerge {
    pub added: Vec<EntryMerge>,
    pub removed: Vec<EntryMerge>,
    pub changed: Vec<EntryMerge>,
    pub unchanged: Vec<EntryMerge>,
}

impl SnapshotMerge {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of names that depart from the ancestor.
    pub fn differences(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// True when no name departs from the ancestor.
    pub fn is_clean(&self) -> bool {
        self.differences() == 0
    }

    /// The entries that need manual resolution.
    pub fn conflicts(&self) -> impl Iterator<Item = &EntryMerge> {
        self.changed.iter().filter(|e| e.report.state.is_conflict())
    }

    /// True when any entry needs manual resolution.
    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }
}

impl MergeSink for SnapshotMerge {
    fn on_added(&mut self, merge: &EntryMerge) -> SinkResult {
        self.added.push(merge.clone());
        Ok(())
    }

    fn on_removed(&mut self, merge: &EntryMerge) -> SinkResult {
        self.removed.push(merge.clone());
        Ok(())
    }

    fn on_changed(&mut self, merge: &EntryMerge) -> SinkResult {
        self.changed.push(merge.clone());
        Ok(())
    }

    fn on_unchanged(&mut self, merge: &EntryMerge) -> SinkResult {
        self.unchanged.push(merge.clone());
        Ok(())
    }
}

/// Compare two descendant snapshots against their common ancestor.
///
/// Every name present in any of the three snapshots is classified
/// exactly once. Names whose classification follows from directory
/// presence alone (removed everywhere, or added on a single side) are
/// never fetched. All other names fetch every present side; a fetch
/// failure logs a warning, counts as a per-entry error, and skips the
/// name without firing the sink.
///
/// Returns the number of names that depart from the ancestor, unless
/// per-entry errors occurred, in which case the error tally replaces
/// the count.
pub fn diff3(
    left: &dyn Snapshot,
    ancestor: &dyn Snapshot,
    right: &dyn Snapshot,
    tol: &Tolerance,
    sink: &mut dyn MergeSink,
) -> MergeResult<usize> {
    tol.validate()?;

    let mut differences = 0usize;
    let mut errors = 0usize;

    // Ancestor names first, then names added on the left, then names
    // only the right side knows.
    let mut names: Vec<String> = Vec::new();
    for entry in ancestor.entries() {
        names.push(entry.name);
    }
    for entry in left.entries() {
        if ancestor.lookup(&entry.name).is_none() {
            names.push(entry.name);
        }
    }
    for entry in right.entries() {
        if ancestor.lookup(&entry.name).is_none() && left.lookup(&entry.name).is_none() {
            names.push(entry.name);
        }
    }

    for name in names {
        let left_entry = left.lookup(&name);
        let ancestor_entry = ancestor.lookup(&name);
        let right_entry = right.lookup(&name);

        let report = match (
            left_entry.is_some(),
            ancestor_entry.is_some(),
            right_entry.is_some(),
        ) {
            (false, true, false) => MergeReport::presence(DiffState3::RemovedBoth),
            (true, false, false) => MergeReport::presence(DiffState3::AddedLeft),
            (false, false, true) => MergeReport::presence(DiffState3::AddedRight),
            _ => {
                let left_record = match fetch_side(left, left_entry.as_ref()) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(name = %name, error = %e, "cannot fetch left object; skipping entry");
                        errors += 1;
                        continue;
                    }
                };
                let ancestor_record = match fetch_side(ancestor, ancestor_entry.as_ref()) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(name = %name, error = %e, "cannot fetch ancestor object; skipping entry");
                        errors += 1;
                        continue;
                    }
                };
                let right_record = match fetch_side(right, right_entry.as_ref()) {
                    Ok(record) => record,
                    Err(e) => {
                        warn!(name = %name, error = %e, "cannot fetch right object; skipping entry");
                        errors += 1;
                        continue;
                    }
                };
                compare_objects3(
                    left_record.as_ref(),
                    ancestor_record.as_ref(),
                    right_record.as_ref(),
                    tol,
                )
            }
        };

        if report.state.counts_as_difference() {
            differences += 1;
        }
        let entry_merge = EntryMerge {
            name,
            left: left_entry,
            ancestor: ancestor_entry,
            right: right_entry,
            report,
        };
        deliver(sink, &entry_merge, &mut errors);
    }

    if errors > 0 {
        debug!(errors, "three-way scan finished with per-entry errors");
        return Err(MergeError::ScanFailed { errors });
    }
    debug!(differences, "three-way scan complete");
    Ok(differences)
}

fn fetch_side(
    snapshot: &dyn Snapshot,
    entry: Option<&DirEntry>,
) -> Result<Option<ObjectRecord>, ModelError> {
    entry.map(|e| snapshot.fetch(e)).transpose()
}

/// Fire the one sink method matching the entry's routing class,
/// tallying a rejection as a per-entry error.
fn deliver(sink: &mut dyn MergeSink, merge: &EntryMerge, errors: &mut usize) {
    let result = match merge.report.state.class() {
        DiffClass::Added => sink.on_added(merge),
        DiffClass::Removed => sink.on_removed(merge),
        DiffClass::Changed => sink.on_changed(merge),
        DiffClass::Unchanged => sink.on_unchanged(merge),
    };
    if let Err(e) = result {
        warn!(name = %merge.name, error = %e, "sink rejected entry");
        *errors += 1;
    }
}
