/*!
Multi-ray ground contact probe with two-tick hysteresis.

Each tick casts five short rays straight down from just above the capsule bottom: one
at the bottom center and four at `radius * 0.5` along two perpendicular horizontal
axes. The axes either follow the world X/Z axes or the last horizontal velocity
direction, see [`ProbeAxes`].

Contact policy
- Horizontal speed above `max_ground_speed_for_full_contact`: every ray must hit.
- Otherwise: at least one ray must hit.

Hysteresis
- The raw per-tick verdict is shifted into a two-slot history. The character only counts
  as grounded while both slots are true, so a single noisy tick never flips the state.
*/

use crate::{
    constants::{DIST_EPS, GROUND_PROBE_RAYS, PROBE_OFFSET_RADIUS_FRACTION},
    layers::LayerMask,
    math::{Point, Vec3, forward, normalize_or_zero, planar, planar_speed, up},
    scene::SceneQuery,
    settings::{ProbeAxes, ValidatedSettings},
    shape::ShapeDescriptor,
};

/// Two most recent raw probe verdicts.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct GroundState {
    pub current: bool,
    pub previous: bool,
}

impl GroundState {
    /// Shifts `current` into `previous` and stores the new verdict.
    #[inline]
    pub fn push(&mut self, verdict: bool) {
        self.previous = self.current;
        self.current = verdict;
    }

    /// True only when the last two verdicts agree on contact.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.current && self.previous
    }
}

/// One probe ray as cast on the last tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProbeRay {
    pub origin: Point,
    pub end: Point,
    pub hit: bool,
}

impl Default for ProbeRay {
    fn default() -> Self {
        Self {
            origin: Point::origin(),
            end: Point::origin(),
            hit: false,
        }
    }
}

/// Ground probe parameters, copied out of the validated settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundProbeSettings {
    pub layers: LayerMask,
    pub margin: f32,
    pub max_ground_speed_for_full_contact: f32,
    pub axes: ProbeAxes,
}

impl From<&ValidatedSettings> for GroundProbeSettings {
    fn from(settings: &ValidatedSettings) -> Self {
        Self {
            layers: settings.ground_layer_mask,
            margin: settings.ground_probe_margin,
            max_ground_speed_for_full_contact: settings.max_ground_speed_for_full_contact,
            axes: settings.probe_axes,
        }
    }
}

/// Ground contact detector owned by one character.
#[derive(Clone, Debug)]
pub struct GroundContactProbe {
    settings: GroundProbeSettings,
    state: GroundState,
    /// Last non-zero horizontal movement direction (unit, planar).
    heading: Vec3,
    rays: [ProbeRay; GROUND_PROBE_RAYS],
    hit_count: usize,
}

impl GroundContactProbe {
    pub fn new(settings: GroundProbeSettings) -> Self {
        Self {
            settings,
            state: GroundState::default(),
            heading: forward(),
            rays: [ProbeRay::default(); GROUND_PROBE_RAYS],
            hit_count: 0,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    #[inline]
    pub fn state(&self) -> GroundState {
        self.state
    }

    /// Rays cast on the last [`update`](Self::update), for visualization only.
    #[inline]
    pub fn rays(&self) -> &[ProbeRay; GROUND_PROBE_RAYS] {
        &self.rays
    }

    /// Number of rays that hit on the last update.
    #[inline]
    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Samples ground contact for a body at `position` moving with `velocity`.
    ///
    /// When grounded and not moving up, the vertical velocity is zeroed so accumulated
    /// gravity is cancelled. Position is never touched.
    ///
    /// Returns the (hysteresis-filtered) grounded state.
    pub fn update<S: SceneQuery + ?Sized>(
        &mut self,
        scene: &S,
        shape: &ShapeDescriptor,
        position: &Vec3,
        velocity: &mut Vec3,
    ) -> bool {
        let was_grounded = self.is_grounded();

        let horizontal = planar(velocity);
        if horizontal.norm_squared() > DIST_EPS * DIST_EPS {
            self.heading = normalize_or_zero(&horizontal);
        }

        let (ahead, side) = self.lateral_axes();
        let offset = shape.radius() * PROBE_OFFSET_RADIUS_FRACTION;
        let center = shape.probe_origin(position);
        let origins = [
            center,
            center + side * offset,
            center - side * offset,
            center + ahead * offset,
            center - ahead * offset,
        ];

        let length = shape.radius() * PROBE_OFFSET_RADIUS_FRACTION + self.settings.margin;
        let down = -up();

        self.hit_count = 0;
        for (ray, origin) in self.rays.iter_mut().zip(origins) {
            let hit = scene
                .cast_ray(&origin, &down, length, self.settings.layers)
                .is_some();
            *ray = ProbeRay {
                origin,
                end: origin + down * length,
                hit,
            };
            if hit {
                self.hit_count += 1;
            }
        }

        let speed = planar_speed(velocity);
        let verdict = contact_verdict(
            self.hit_count,
            speed,
            self.settings.max_ground_speed_for_full_contact,
        );
        self.state.push(verdict);

        log::trace!(
            "Ground probe: {}/{} hits at {:.2} m/s -> {}",
            self.hit_count,
            GROUND_PROBE_RAYS,
            speed,
            verdict
        );

        let grounded = self.is_grounded();
        if grounded != was_grounded {
            log::debug!("Ground contact changed: grounded = {grounded}");
        }

        if grounded && velocity.y <= 0.0 {
            velocity.y = 0.0;
        }

        grounded
    }

    /// `(ahead, side)` unit horizontal axes for the lateral rays.
    fn lateral_axes(&self) -> (Vec3, Vec3) {
        match self.settings.axes {
            ProbeAxes::World => (Vec3::z(), Vec3::x()),
            ProbeAxes::Velocity => {
                let ahead = self.heading;
                (ahead, up().cross(&ahead))
            }
        }
    }
}

/// Maps a hit count to a raw contact verdict for the current horizontal speed.
pub fn contact_verdict(hits: usize, horizontal_speed: f32, full_contact_speed: f32) -> bool {
    if horizontal_speed > full_contact_speed {
        hits == GROUND_PROBE_RAYS
    } else {
        hits > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scene::{RayHit, SweepHit},
        shape::CapsuleShape,
    };
    use std::cell::Cell;

    /// Scene whose ground exists wherever `solid(origin)` says so.
    struct FnScene<F: Fn(&Point) -> bool> {
        solid: F,
        casts: Cell<usize>,
    }

    impl<F: Fn(&Point) -> bool> FnScene<F> {
        fn new(solid: F) -> Self {
            Self {
                solid,
                casts: Cell::new(0),
            }
        }
    }

    impl<F: Fn(&Point) -> bool> SceneQuery for FnScene<F> {
        fn cast_ray(
            &self,
            origin: &Point,
            _: &Vec3,
            max: f32,
            _: LayerMask,
        ) -> Option<RayHit> {
            self.casts.set(self.casts.get() + 1);
            (self.solid)(origin).then(|| RayHit {
                distance: max * 0.5,
                point: *origin,
            })
        }

        fn cast_sphere(
            &self,
            _: &Point,
            _: f32,
            _: &Vec3,
            _: f32,
            _: LayerMask,
        ) -> Option<SweepHit> {
            None
        }
    }

    fn probe() -> GroundContactProbe {
        GroundContactProbe::new(GroundProbeSettings {
            layers: LayerMask::GROUND,
            margin: 0.1,
            max_ground_speed_for_full_contact: 10.0,
            axes: ProbeAxes::World,
        })
    }

    fn capsule() -> ShapeDescriptor {
        CapsuleShape::standing(0.5, 2.0).into()
    }

    #[test]
    fn all_rays_hitting_on_two_ticks_grounds_the_capsule() {
        let scene = FnScene::new(|_: &Point| true);
        let mut probe = probe();
        let mut velocity = Vec3::zeros();

        assert!(!probe.update(&scene, &capsule(), &Vec3::zeros(), &mut velocity));
        assert_eq!(probe.hit_count(), 5);
        assert!(probe.update(&scene, &capsule(), &Vec3::zeros(), &mut velocity));
        assert_eq!(scene.casts.get(), 10);
    }

    #[test]
    fn isolated_true_verdict_never_grounds() {
        let ground = Cell::new(false);
        let scene = FnScene::new(|_: &Point| ground.get());
        let mut probe = probe();
        let mut velocity = Vec3::zeros();

        for verdict in [false, true, false, true, false] {
            ground.set(verdict);
            assert!(!probe.update(&scene, &capsule(), &Vec3::zeros(), &mut velocity));
        }
    }

    #[test]
    fn fast_movement_requires_full_contact() {
        // Ground only where x <= 0 and z <= 0: the +X and +Z rays hang over the edge.
        let scene = FnScene::new(|p: &Point| p.x <= 0.0 && p.z <= 0.0);
        let mut probe = probe();
        let mut velocity = Vec3::new(12.0, 0.0, 0.0);

        probe.update(&scene, &capsule(), &Vec3::zeros(), &mut velocity);
        assert_eq!(probe.hit_count(), 3);
        assert!(!probe.state().current);

        // Same footing while slow is enough.
        let mut slow = Vec3::new(2.0, 0.0, 0.0);
        probe.update(&scene, &capsule(), &Vec3::zeros(), &mut slow);
        assert!(probe.state().current);
    }

    #[test]
    fn grounded_probe_cancels_falling_but_not_rising() {
        let scene = FnScene::new(|_: &Point| true);
        let mut probe = probe();
        let mut velocity = Vec3::new(0.0, -3.0, 0.0);

        probe.update(&scene, &capsule(), &Vec3::zeros(), &mut velocity);
        assert_eq!(velocity.y, -3.0);
        probe.update(&scene, &capsule(), &Vec3::zeros(), &mut velocity);
        assert_eq!(velocity.y, 0.0);

        let mut rising = Vec3::new(0.0, 20.0, 0.0);
        probe.update(&scene, &capsule(), &Vec3::zeros(), &mut rising);
        assert_eq!(rising.y, 20.0);
    }

    #[test]
    fn velocity_axes_follow_horizontal_heading() {
        let scene = FnScene::new(|_: &Point| true);
        let mut probe = GroundContactProbe::new(GroundProbeSettings {
            axes: ProbeAxes::Velocity,
            ..probe().settings
        });
        let mut velocity = Vec3::new(4.0, 0.0, 0.0);

        probe.update(&scene, &capsule(), &Vec3::zeros(), &mut velocity);
        let rays = probe.rays();
        // Ray 3 is offset along the heading (+X) by radius * 0.5.
        assert!((rays[3].origin.x - rays[0].origin.x - 0.25).abs() < 1.0e-6);
        assert!((rays[3].origin.z - rays[0].origin.z).abs() < 1.0e-6);
        // Ray length reaches `margin` below the capsule tip.
        assert!((rays[0].origin.y - rays[0].end.y - 0.35).abs() < 1.0e-6);
    }

    #[test]
    fn contact_policy_is_speed_dependent() {
        assert!(contact_verdict(1, 5.0, 10.0));
        assert!(!contact_verdict(0, 0.0, 10.0));
        assert!(!contact_verdict(4, 12.0, 10.0));
        assert!(contact_verdict(5, 12.0, 10.0));
        assert!(contact_verdict(1, 10.0, 10.0));
    }
}
