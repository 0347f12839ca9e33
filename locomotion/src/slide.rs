/*!
Speed-preserving obstacle slide.

A sphere of the capsule radius is swept from chest height along the current velocity
direction. On a hit the velocity is projected onto the obstacle plane and rescaled to
its original length, so the character keeps its speed while gliding along walls.
*/

use crate::{
    constants::DIST_EPS,
    layers::LayerMask,
    math::{Point, Vec3, normalize_or_zero, project_on_plane},
    scene::SceneQuery,
    settings::ValidatedSettings,
    shape::ShapeDescriptor,
};

/// Obstacle sweep as cast on the last tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleSweep {
    pub center: Point,
    pub radius: f32,
    pub end: Point,
    pub hit: bool,
}

#[derive(Clone, Debug)]
pub struct ObstacleSlideResolver {
    layers: LayerMask,
    probe_distance: f32,
    last_sweep: Option<ObstacleSweep>,
}

impl ObstacleSlideResolver {
    pub fn new(layers: LayerMask, probe_distance: f32) -> Self {
        Self {
            layers,
            probe_distance,
            last_sweep: None,
        }
    }

    /// Last sweep performed, `None` if the character has not moved yet.
    #[inline]
    pub fn last_sweep(&self) -> Option<&ObstacleSweep> {
        self.last_sweep.as_ref()
    }

    /// Redirects `velocity` along the first obstacle within the probe distance.
    ///
    /// Returns true when a slide was applied.
    pub fn resolve<S: SceneQuery + ?Sized>(
        &mut self,
        scene: &S,
        shape: &ShapeDescriptor,
        position: &Vec3,
        velocity: &mut Vec3,
    ) -> bool {
        let dir = normalize_or_zero(velocity);
        if dir == Vec3::zeros() {
            return false;
        }

        let center = shape.chest(position);
        let radius = shape.radius();
        let hit = scene.cast_sphere(&center, radius, &dir, self.probe_distance, self.layers);

        self.last_sweep = Some(ObstacleSweep {
            center,
            radius,
            end: center + dir * self.probe_distance,
            hit: hit.is_some(),
        });

        let Some(hit) = hit else {
            return false;
        };

        let before = *velocity;
        *velocity = slide_velocity(velocity, &hit.normal);
        log::trace!(
            "Obstacle slide at {:.3} m: {:?} -> {:?}",
            hit.distance,
            before,
            velocity
        );
        true
    }
}

impl From<&ValidatedSettings> for ObstacleSlideResolver {
    fn from(settings: &ValidatedSettings) -> Self {
        Self::new(settings.obstacle_layer_mask, settings.obstacle_probe_distance)
    }
}

/// `normalize(project(v, normal)) * |v|`.
///
/// A velocity pointing straight into the surface has nothing left after projection
/// and comes to rest.
pub fn slide_velocity(velocity: &Vec3, normal: &Vec3) -> Vec3 {
    let Some(normal) = normal.try_normalize(DIST_EPS) else {
        return *velocity;
    };

    let speed = velocity.norm();
    let along = project_on_plane(velocity, &normal);
    normalize_or_zero(&along) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scene::{RayHit, SweepHit},
        shape::CapsuleShape,
    };

    /// Single infinite wall facing `normal`, always `distance` away when swept toward it.
    struct Wall {
        normal: Vec3,
        distance: f32,
    }

    impl SceneQuery for Wall {
        fn cast_ray(&self, _: &Point, _: &Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
            None
        }

        fn cast_sphere(
            &self,
            _: &Point,
            _: f32,
            dir: &Vec3,
            max: f32,
            _: LayerMask,
        ) -> Option<SweepHit> {
            (dir.dot(&self.normal) < 0.0 && self.distance <= max).then_some(SweepHit {
                distance: self.distance,
                normal: self.normal,
            })
        }
    }

    fn capsule() -> ShapeDescriptor {
        CapsuleShape::standing(0.5, 2.0).into()
    }

    #[test]
    fn slide_preserves_speed() {
        let normals = [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0).normalize(),
            Vec3::new(0.3, 0.8, -0.5).normalize(),
        ];
        let velocities = [
            Vec3::new(3.0, 0.0, 4.0),
            Vec3::new(-7.0, 2.0, 1.0),
            Vec3::new(0.1, -9.0, 0.2),
        ];

        for n in &normals {
            for v in &velocities {
                let out = slide_velocity(v, n);
                assert!((out.norm() - v.norm()).abs() < 1.0e-4, "{v:?} on {n:?} -> {out:?}");
                assert!(out.dot(n).abs() < 1.0e-4);
            }
        }
    }

    #[test]
    fn head_on_hit_stops() {
        let out = slide_velocity(&Vec3::new(0.0, 0.0, 5.0), &Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(out, Vec3::zeros());
    }

    #[test]
    fn resolver_slides_along_wall() {
        let wall = Wall {
            normal: Vec3::new(0.0, 0.0, -1.0),
            distance: 0.05,
        };
        let mut resolver = ObstacleSlideResolver::new(LayerMask::OBSTACLE, 0.1);
        let mut velocity = Vec3::new(3.0, 0.0, 4.0);

        assert!(resolver.resolve(&wall, &capsule(), &Vec3::zeros(), &mut velocity));
        assert!((velocity - Vec3::new(5.0, 0.0, 0.0)).norm() < 1.0e-4);

        let sweep = resolver.last_sweep().expect("sweep recorded");
        assert!(sweep.hit);
        assert!((sweep.center - Point::new(0.0, 1.0, 0.0)).norm() < 1.0e-6);
        assert_eq!(sweep.radius, 0.5);
    }

    #[test]
    fn no_hit_leaves_velocity_untouched() {
        let wall = Wall {
            normal: Vec3::new(0.0, 0.0, -1.0),
            distance: 3.0,
        };
        let mut resolver = ObstacleSlideResolver::new(LayerMask::OBSTACLE, 0.1);
        let mut velocity = Vec3::new(1.0, 0.0, 2.0);

        assert!(!resolver.resolve(&wall, &capsule(), &Vec3::zeros(), &mut velocity));
        assert_eq!(velocity, Vec3::new(1.0, 0.0, 2.0));
        assert!(!resolver.last_sweep().map(|s| s.hit).unwrap_or(true));
    }

    #[test]
    fn resting_character_does_not_sweep() {
        let wall = Wall {
            normal: Vec3::new(0.0, 0.0, -1.0),
            distance: 0.0,
        };
        let mut resolver = ObstacleSlideResolver::new(LayerMask::OBSTACLE, 0.1);
        let mut velocity = Vec3::zeros();

        assert!(!resolver.resolve(&wall, &capsule(), &Vec3::zeros(), &mut velocity));
        assert!(resolver.last_sweep().is_none());
    }
}
