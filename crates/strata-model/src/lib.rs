//! Object model for Strata.
//!
//! This crate defines the shape of a database object as the diff and merge
//! engines see it: a typed geometry payload, the exact serialized parameter
//! bytes, and an attached attribute-value set. Snapshots expose named
//! entries through the [`Snapshot`] trait; the engines never perform I/O
//! themselves.
//!
//! # Key Types
//!
//! - [`Geometry`] / [`ObjectKind`] -- Typed parameter payloads and their kind tags
//! - [`ModelObject`] -- Geometry plus attributes, the unit of comparison
//! - [`Blob`] -- Exact serialized parameter bytes, compared byte-for-byte
//! - [`Snapshot`] / [`DirEntry`] / [`ObjectRecord`] -- Named-entry access
//! - [`InMemorySnapshot`] -- Map-backed snapshot for tests and embedding

pub mod error;
pub mod memory;
pub mod object;
pub mod snapshot;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{ModelError, ModelResult};
pub use memory::InMemorySnapshot;
pub use object::{
    Arb, ArbClass, Blob, BoolOp, Combination, Ellipsoid, Geometry, Halfspace, Member, ModelObject,
    ObjectKind, Point3, Tgc, Torus,
};
pub use snapshot::{DirEntry, ObjectRecord, Snapshot};
