use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Default distance tolerance, in model units.
pub const DEFAULT_DIST: f64 = 0.0005;

/// Distance tolerance governing approximate equality.
///
/// Two scalar values compare equal when they differ by at most `dist`;
/// two points compare equal when they lie within `dist` of each other.
/// A distance of zero demands exact numeric equality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Maximum distance at which two values compare equal.
    pub dist: f64,
}

impl Tolerance {
    /// Create a tolerance with the given distance.
    pub fn new(dist: f64) -> Self {
        Self { dist }
    }

    /// Check that the tolerance is usable for comparisons.
    ///
    /// The distance must be finite and non-negative. The diff and merge
    /// engines reject a malformed tolerance before scanning anything.
    pub fn validate(&self) -> TypeResult<()> {
        if !self.dist.is_finite() || self.dist < 0.0 {
            return Err(TypeError::InvalidTolerance { dist: self.dist });
        }
        Ok(())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { dist: DEFAULT_DIST }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_distance() {
        let tol = Tolerance::default();
        assert_eq!(tol.dist, DEFAULT_DIST);
        assert!(tol.validate().is_ok());
    }

    #[test]
    fn zero_distance_is_valid() {
        assert!(Tolerance::new(0.0).validate().is_ok());
    }

    #[test]
    fn negative_distance_rejected() {
        let err = Tolerance::new(-0.001).validate().unwrap_err();
        assert!(matches!(err, TypeError::InvalidTolerance { .. }));
    }

    #[test]
    fn nan_distance_rejected() {
        assert!(Tolerance::new(f64::NAN).validate().is_err());
    }

    #[test]
    fn infinite_distance_rejected() {
        assert!(Tolerance::new(f64::INFINITY).validate().is_err());
    }
}
