/*!
Math aliases and small vector helpers shared by the locomotion modules.

All types come from the `nalgebra` re-exported by `rapier3d`, so scene queries and
the locomotion state never need conversions.

Conventions
- +Y is world up, +Z is the default forward direction.
- Units are meters, seconds and radians.
*/

use rapier3d::na;

use crate::constants::DIST_EPS;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point = na::Point3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// World up axis.
#[inline]
pub fn up() -> Vec3 {
    Vec3::y()
}

/// Default facing direction when nothing else is known.
#[inline]
pub fn forward() -> Vec3 {
    Vec3::z()
}

/// Drops the vertical component of `v`.
#[inline]
pub fn planar(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Length of the horizontal (XZ) part of `v`.
#[inline]
pub fn planar_speed(v: &Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// True when no component is NaN or infinite.
#[inline]
pub fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Normalizes `v`, returning zero for (near) zero-length or non-finite input instead
/// of NaN.
#[inline]
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    if !is_finite(v) {
        return Vec3::zeros();
    }
    v.try_normalize(DIST_EPS).unwrap_or_else(Vec3::zeros)
}

/// Moves `current` toward `target` by at most `max_delta`, never overshooting.
pub fn move_towards(current: &Vec3, target: &Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let dist = delta.norm();

    if dist <= max_delta.max(0.0) || dist <= DIST_EPS {
        return *target;
    }

    current + delta * (max_delta.max(0.0) / dist)
}

/// Rotation whose +Z axis faces `direction` with +Y as the up hint.
///
/// Returns `None` for zero-length, non-finite and vertical directions, where the look
/// rotation is undefined.
pub fn look_rotation(direction: &Vec3) -> Option<Quat> {
    if !is_finite(direction) {
        return None;
    }
    let dir = direction.try_normalize(DIST_EPS)?;
    if dir.cross(&up()).norm_squared() <= DIST_EPS {
        return None;
    }

    Some(Quat::face_towards(&dir, &up()))
}

/// Projects `v` onto the plane with the given unit `normal`.
#[inline]
pub fn project_on_plane(v: &Vec3, normal: &Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}
