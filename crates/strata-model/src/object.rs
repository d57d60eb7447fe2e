use serde::{Deserialize, Serialize};

use strata_types::{AttrSet, Tolerance};

use crate::error::{ModelError, ModelResult};

/// A point in model space.
pub type Point3 = [f64; 3];

/// The minor-type tag identifying an object's geometric kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Arbitrary convex polyhedron stored as eight vertices.
    Arb,
    /// Ellipsoid defined by a vertex and three axis vectors.
    Ellipsoid,
    /// Torus defined by center, normal, and two radii.
    Torus,
    /// Truncated general cone.
    Tgc,
    /// Half-space bounded by a plane.
    Halfspace,
    /// Boolean combination of other objects.
    Combination,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arb => write!(f, "arb"),
            Self::Ellipsoid => write!(f, "ellipsoid"),
            Self::Torus => write!(f, "torus"),
            Self::Tgc => write!(f, "tgc"),
            Self::Halfspace => write!(f, "halfspace"),
            Self::Combination => write!(f, "combination"),
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry payloads
// ---------------------------------------------------------------------------

/// Arbitrary convex polyhedron: eight vertices, possibly coincident.
///
/// Degenerate forms (wedges, pyramids, tetrahedra) repeat vertices, so the
/// same shape can be stored with several different vertex arrangements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arb {
    pub points: [Point3; 8],
}

/// Canonical subtype of an [`Arb`], named by its distinct vertex count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArbClass {
    Arb4,
    Arb5,
    Arb6,
    Arb7,
    Arb8,
}

impl std::fmt::Display for ArbClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arb4 => write!(f, "arb4"),
            Self::Arb5 => write!(f, "arb5"),
            Self::Arb6 => write!(f, "arb6"),
            Self::Arb7 => write!(f, "arb7"),
            Self::Arb8 => write!(f, "arb8"),
        }
    }
}

impl Arb {
    /// Classify this arb by counting distinct vertices within tolerance.
    ///
    /// Two vertices coincide when every coordinate differs by at most the
    /// tolerance distance. Each vertex joins the first earlier vertex group
    /// it coincides with, and the group count selects the subtype: eight
    /// distinct vertices is an [`ArbClass::Arb8`], down to four for an
    /// [`ArbClass::Arb4`]. Arrangements with fewer than four distinct
    /// vertices fit no subtype and yield `None`.
    pub fn canonical_class(&self, tol: &Tolerance) -> Option<ArbClass> {
        let mut reps: Vec<Point3> = Vec::with_capacity(8);
        for pt in &self.points {
            if !reps.iter().any(|rep| points_coincide(rep, pt, tol)) {
                reps.push(*pt);
            }
        }
        match reps.len() {
            8 => Some(ArbClass::Arb8),
            7 => Some(ArbClass::Arb7),
            6 => Some(ArbClass::Arb6),
            5 => Some(ArbClass::Arb5),
            4 => Some(ArbClass::Arb4),
            _ => None,
        }
    }
}

/// Component-wise vertex coincidence within the tolerance distance.
fn points_coincide(a: &Point3, b: &Point3, tol: &Tolerance) -> bool {
    (a[0] - b[0]).abs() <= tol.dist
        && (a[1] - b[1]).abs() <= tol.dist
        && (a[2] - b[2]).abs() <= tol.dist
}

/// Ellipsoid: vertex and three mutually perpendicular axis vectors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    pub v: Point3,
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

impl Ellipsoid {
    /// A sphere: equal axis lengths along the coordinate directions.
    pub fn sphere(center: Point3, radius: f64) -> Self {
        Self {
            v: center,
            a: [radius, 0.0, 0.0],
            b: [0.0, radius, 0.0],
            c: [0.0, 0.0, radius],
        }
    }
}

/// Torus: center, normal, and major/minor radii.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub center: Point3,
    pub normal: Point3,
    pub r_major: f64,
    pub r_minor: f64,
}

/// Truncated general cone: base vertex, height vector, and the two
/// ellipse axis pairs at base and top.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tgc {
    pub v: Point3,
    pub h: Point3,
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
    pub d: Point3,
}

/// Half-space: all points on one side of a plane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Halfspace {
    /// Outward unit normal of the bounding plane.
    pub normal: Point3,
    /// Distance from the origin along the normal.
    pub d: f64,
}

/// Boolean operation applied to a combination member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOp {
    Union,
    Intersect,
    Subtract,
}

impl std::fmt::Display for BoolOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Union => write!(f, "union"),
            Self::Intersect => write!(f, "intersect"),
            Self::Subtract => write!(f, "subtract"),
        }
    }
}

/// One member of a combination: an operation and the name it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub op: BoolOp,
    pub name: String,
}

impl Member {
    pub fn new(op: BoolOp, name: impl Into<String>) -> Self {
        Self {
            op,
            name: name.into(),
        }
    }
}

/// Boolean combination of other database objects, in evaluation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub members: Vec<Member>,
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Type-specific parameters of a database object.
///
/// One variant per object kind; the payload is the complete parameter set
/// for that kind. Comparison is structural.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Arb(Arb),
    Ellipsoid(Ellipsoid),
    Torus(Torus),
    Tgc(Tgc),
    Halfspace(Halfspace),
    Combination(Combination),
}

impl Geometry {
    /// The kind tag for this payload.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Arb(_) => ObjectKind::Arb,
            Self::Ellipsoid(_) => ObjectKind::Ellipsoid,
            Self::Torus(_) => ObjectKind::Torus,
            Self::Tgc(_) => ObjectKind::Tgc,
            Self::Halfspace(_) => ObjectKind::Halfspace,
            Self::Combination(_) => ObjectKind::Combination,
        }
    }

    /// Serialize into the canonical parameter encoding.
    pub fn to_blob(&self) -> ModelResult<Blob> {
        let data =
            serde_json::to_vec(self).map_err(|e| ModelError::Serialization(e.to_string()))?;
        Ok(Blob::new(data))
    }

    /// Decode from a parameter blob in the canonical encoding.
    pub fn from_blob(blob: &Blob) -> ModelResult<Self> {
        serde_json::from_slice(&blob.data).map_err(|e| ModelError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Exact serialized parameter bytes of one object.
///
/// The engines never interpret blob contents; blobs exist to be compared
/// byte-for-byte, so a re-encoded object with different bytes counts as
/// changed even when its decoded payload is equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a blob from raw bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the blob has no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ModelObject
// ---------------------------------------------------------------------------

/// A typed database object: geometry payload plus attribute-value set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelObject {
    /// Type-specific parameters.
    pub geometry: Geometry,
    /// Attributes attached to the object, distinct from its parameters.
    pub attrs: AttrSet,
}

impl ModelObject {
    /// Create an object with no attributes.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            attrs: AttrSet::new(),
        }
    }

    /// Create an object with the given attributes.
    pub fn with_attrs(geometry: Geometry, attrs: AttrSet) -> Self {
        Self { geometry, attrs }
    }

    /// The object's minor-type tag.
    pub fn kind(&self) -> ObjectKind {
        self.geometry.kind()
    }
}
