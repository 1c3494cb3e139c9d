//! Planar joint geometry.
//!
//! All angles are in degrees. Inputs are normalized image coordinates, so
//! `y` grows downward; the functions only depend on relative positions.

use nalgebra::{Point2, Vector2};

/// Angle at vertex `b` between the rays `b→a` and `b→c`, in `[0, 180]`.
///
/// Computed from the difference of the two rays' polar angles; reflex
/// angles are folded back (`360 - angle`).
pub fn joint_angle(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Angle between the segment `a→b` and the vertical image axis, in `[0, 180]`.
///
/// A segment pointing straight down the image (e.g. shoulder to hip while
/// standing upright) gives `0`.
pub fn vertical_deviation(a: Point2<f64>, b: Point2<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx.atan2(dy).to_degrees().abs()
}

/// Angle between two free vectors, in `[0, 180]`.
///
/// Returns `0` when either vector has zero length.
pub fn vector_angle(v1: Vector2<f64>, v2: Vector2<f64>) -> f64 {
    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Mean of two angles measured on opposite body sides
pub fn mean_angle(left: f64, right: f64) -> f64 {
    (left + right) / 2.0
}
