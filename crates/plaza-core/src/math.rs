//! Pose math shared by the movement pass.
//!
//! Positions and headings are plain `glam` types (`Vec3`, `Quat`) in a
//! Y-up world.  The helpers here cover the two operations the engine needs
//! beyond what `glam` ships: a safe look rotation and the horizontal-plane
//! perpendicular used for lateral avoidance.

use glam::{Mat3, Quat, Vec3};

/// Distance below which two agents are treated as coincident and the pair is
/// skipped entirely (an agent overlapping another — or itself through float
/// noise — must not produce a normalized direction).
pub const PROXIMITY_EPSILON: f32 = 0.01;

/// Orientation that faces `forward` with `up` as the stabilizing axis.
///
/// Falls back to `Quat::IDENTITY` when `forward` is zero-length or parallel
/// to `up`, so degenerate segment geometry can never yield a NaN rotation.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let r = up.cross(f).normalize_or_zero();
    if r == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let u = f.cross(r);
    Quat::from_mat3(&Mat3::from_cols(r, u, f))
}

/// Perpendicular of `v` in the horizontal (XZ) plane: `(-z, 0, x)`.
///
/// For a vector pointing at a neighbor ahead, this is the sideways direction
/// an agent steps to pass on the left; summing it over several neighbors
/// biases the step toward the least crowded side.
#[inline]
pub fn flat_perpendicular(v: Vec3) -> Vec3 {
    Vec3::new(-v.z, 0.0, v.x)
}
