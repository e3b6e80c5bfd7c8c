//! Small vector helpers for 2D positions and directions.

use ndarray::Array1;

/// Euclidean length of a 2D vector.
pub fn norm(v: &Array1<f32>) -> f32 {
    v.dot(v).sqrt()
}

/// Returns the unit vector in the direction of `v`, or `None` for a
/// zero-length or non-finite vector.
///
/// Callers treat `None` as "no steering change"; a degenerate vector is
/// never normalized into NaN.
pub fn normalized(v: &Array1<f32>) -> Option<Array1<f32>> {
    let n = norm(v);
    if n > f32::EPSILON && n.is_finite() {
        Some(v / n)
    } else {
        None
    }
}

/// Unit vector for an angle in radians.
pub fn unit_from_angle(angle: f32) -> Array1<f32> {
    Array1::from_vec(vec![angle.cos(), angle.sin()])
}
