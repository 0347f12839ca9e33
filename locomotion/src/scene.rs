/*!
Scene query seam.

The locomotion core never touches a physics world directly. It asks a [`SceneQuery`]
for two kinds of casts, each restricted to a [`LayerMask`]:

- `cast_ray`:    thin downward ground probes.
- `cast_sphere`: the forward obstacle sweep.

Implementations must ignore trigger (sensor) volumes. The production implementation is
[`crate::StaticQueryWorld`], backed by rapier's query pipeline.
*/

use crate::{
    layers::LayerMask,
    math::{Point, Vec3},
};

/// Result of a ray cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance along the (unit) ray direction.
    pub distance: f32,
    /// World-space impact point.
    pub point: Point,
}

/// Result of a sphere sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    /// Distance travelled by the sphere center before contact.
    pub distance: f32,
    /// World-space unit normal of the contact.
    pub normal: Vec3,
}

/// Geometric queries the locomotion core needs from the world.
pub trait SceneQuery {
    /// Casts a ray from `origin` along the unit vector `dir`, up to `max_distance`.
    fn cast_ray(
        &self,
        origin: &Point,
        dir: &Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit>;

    /// Sweeps a sphere of `radius` from `center` along the unit vector `dir`, up to
    /// `max_distance`.
    fn cast_sphere(
        &self,
        center: &Point,
        radius: f32,
        dir: &Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SweepHit>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn cast_ray(
        &self,
        origin: &Point,
        dir: &Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit> {
        (**self).cast_ray(origin, dir, max_distance, layers)
    }

    fn cast_sphere(
        &self,
        center: &Point,
        radius: f32,
        dir: &Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SweepHit> {
        (**self).cast_sphere(center, radius, dir, max_distance, layers)
    }
}
