use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::object::{Blob, ModelObject, ObjectKind};

/// A named entry in a snapshot's directory.
///
/// The kind tag recorded in the directory mirrors the object's own tag,
/// so presence-only classifications can report a kind without fetching.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Unique name within the snapshot.
    pub name: String,
    /// Kind tag recorded alongside the name.
    pub kind: ObjectKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// What fetching a directory entry resolves to: the exact parameter bytes
/// and the decoded typed object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRecord {
    /// Exact serialized parameter bytes.
    pub blob: Blob,
    /// Decoded object with its attributes.
    pub object: ModelObject,
}

impl ObjectRecord {
    /// Build a record whose blob is the canonical encoding of the
    /// object's geometry.
    pub fn from_object(object: ModelObject) -> ModelResult<Self> {
        let blob = object.geometry.to_blob()?;
        Ok(Self { blob, object })
    }
}

/// Read-only view of one database's named entries at diff time.
///
/// All implementations must satisfy these invariants:
/// - Entry names are unique within the snapshot.
/// - `entries()` yields every entry exactly once, sorted by name.
/// - `lookup` returns an entry iff its name appears in `entries()`.
/// - The snapshot is not mutated while an engine scan is in progress.
/// - `fetch` failures are per-entry; they say nothing about other entries.
pub trait Snapshot: Send + Sync {
    /// All directory entries, sorted by name.
    fn entries(&self) -> Vec<DirEntry>;

    /// Look up an entry by name.
    fn lookup(&self, name: &str) -> Option<DirEntry>;

    /// Resolve an entry to its parameter blob and typed object.
    fn fetch(&self, entry: &DirEntry) -> ModelResult<ObjectRecord>;
}
