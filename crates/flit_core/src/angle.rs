//! Angle helpers for Euler rotations expressed in degrees

use crate::math::Vec3;

/// Shortest signed delta from `from` to `to`, in `(-180, 180]`.
///
/// `delta_angle(350.0, 10.0)` is `20.0`, not `-340.0`.
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Per-axis shortest rotation from `from` to `to`
pub fn shortest_rotation(from: Vec3, to: Vec3) -> Vec3 {
    from.zip_with(to, delta_angle)
}
