//! Circle geometry for the torque model
//!
//! All functions are pure. Degenerate inputs (a point coinciding with the
//! circle center) yield `None` so callers can keep their previous state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Rigid body outline: fixed center and radius for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Project `target` onto the circle boundary along the ray from the center.
///
/// Returns `None` when `target` is the center (no direction to project along).
pub fn closest_point_on_circle(circle: &Circle, target: DVec2) -> Option<DVec2> {
    if target == circle.center {
        return None;
    }
    let dir = (target - circle.center).try_normalize()?;
    Some(circle.center + dir * circle.radius)
}

/// Convert a compass angle (0° = top, increasing clockwise) to a boundary point
pub fn angle_to_point(circle: &Circle, angle_degrees: f64) -> DVec2 {
    // Standard math angle: 0° compass is +90° math, clockwise is negative
    let radians = (90.0 - angle_degrees).to_radians();
    circle.center + DVec2::new(radians.cos(), radians.sin()) * circle.radius
}

/// Unit tangent at `boundary_point`: the radius vector rotated 90° CCW, normalized
pub fn tangent(circle: &Circle, boundary_point: DVec2) -> Option<DVec2> {
    (boundary_point - circle.center).perp().try_normalize()
}

/// Negated projection of `force` onto the tangent line, as a vector along `tangent`
#[inline]
pub fn torque(tangent: DVec2, force: DVec2) -> DVec2 {
    tangent * tangent.dot(force) * -1.0
}

/// Torque length rounded to 5 decimal places (half away from zero)
#[inline]
pub fn torque_magnitude(torque: DVec2) -> f64 {
    crate::round_to_places(torque.length(), 5)
}
