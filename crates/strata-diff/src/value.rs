//! Tolerance-aware value equality.
//!
//! Attribute values are strings, but many carry numeric content. Two values
//! compare equal when both parse as a single float within the tolerance
//! distance, when both parse as three-float points within Euclidean
//! distance, or when they are identical strings. Parsing must consume the
//! whole string; trailing garbage forces the string fallback. This lets
//! pure formatting differences ("1.0" vs "1.00") compare equal.

use strata_types::Tolerance;

/// Tolerance-aware equality of two attribute values.
///
/// Precedence: single float, then three-float point, then exact string
/// comparison. The first form both values fit decides the outcome.
pub fn values_equal(a: &str, b: &str, tol: &Tolerance) -> bool {
    if let (Ok(x), Ok(y)) = (a.parse::<f64>(), b.parse::<f64>()) {
        return (x - y).abs() <= tol.dist;
    }
    if let (Some(p), Some(q)) = (parse_point(a), parse_point(b)) {
        return point_distance(&p, &q) <= tol.dist;
    }
    a == b
}

/// Parse exactly three whitespace-separated floats, consuming the whole
/// string.
fn parse_point(s: &str) -> Option<[f64; 3]> {
    let mut coords = [0.0f64; 3];
    let mut tokens = s.split_whitespace();
    for coord in &mut coords {
        *coord = tokens.next()?.parse().ok()?;
    }
    match tokens.next() {
        Some(_) => None,
        None => Some(coords),
    }
}

fn point_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
