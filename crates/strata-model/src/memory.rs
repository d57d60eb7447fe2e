use std::collections::BTreeMap;

use crate::error::{ModelError, ModelResult};
use crate::object::{Blob, ModelObject, ObjectKind};
use crate::snapshot::{DirEntry, ObjectRecord, Snapshot};

/// In-memory, map-backed snapshot.
///
/// Intended for tests and embedding. Entries are held sorted by name and
/// records are cloned on fetch. Entries registered as unreadable appear
/// in the directory but fail to fetch, which is how storage-level
/// corruption presents to the engines.
pub struct InMemorySnapshot {
    entries: BTreeMap<String, StoredEntry>,
}

enum StoredEntry {
    Readable(ObjectRecord),
    Unreadable(ObjectKind),
}

impl StoredEntry {
    fn kind(&self) -> ObjectKind {
        match self {
            Self::Readable(rec) => rec.object.kind(),
            Self::Unreadable(kind) => *kind,
        }
    }
}

impl InMemorySnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an object under `name`, deriving its blob from the canonical
    /// parameter encoding. Replaces any existing entry with that name.
    pub fn insert(&mut self, name: impl Into<String>, object: ModelObject) -> ModelResult<()> {
        let record = ObjectRecord::from_object(object)?;
        self.entries
            .insert(name.into(), StoredEntry::Readable(record));
        Ok(())
    }

    /// Add an object with explicit parameter bytes instead of the
    /// canonical encoding.
    pub fn insert_with_blob(&mut self, name: impl Into<String>, object: ModelObject, blob: Blob) {
        self.entries
            .insert(name.into(), StoredEntry::Readable(ObjectRecord { blob, object }));
    }

    /// Register an entry whose fetch always fails.
    pub fn insert_unreadable(&mut self, name: impl Into<String>, kind: ObjectKind) {
        self.entries.insert(name.into(), StoredEntry::Unreadable(kind));
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemorySnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot for InMemorySnapshot {
    fn entries(&self) -> Vec<DirEntry> {
        self.entries
            .iter()
            .map(|(name, entry)| DirEntry::new(name.clone(), entry.kind()))
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<DirEntry> {
        self.entries
            .get(name)
            .map(|entry| DirEntry::new(name, entry.kind()))
    }

    fn fetch(&self, entry: &DirEntry) -> ModelResult<ObjectRecord> {
        match self.entries.get(&entry.name) {
            Some(StoredEntry::Readable(record)) => Ok(record.clone()),
            Some(StoredEntry::Unreadable(_)) => Err(ModelError::UnreadableObject {
                name: entry.name.clone(),
                reason: "entry registered as unreadable".to_string(),
            }),
            None => Err(ModelError::UnknownEntry {
                name: entry.name.clone(),
            }),
        }
    }
}

impl std::fmt::Debug for InMemorySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshot")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
