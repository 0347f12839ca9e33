/*!
Per-character locomotion state machine.

Two entry points are driven by an external loop:

- [`LocomotionIntegrator::simulation_tick`] once per fixed step. Its sub-steps always run
  in this order: gravity, ground probe, rotation, obstacle slide, commit.
- [`LocomotionIntegrator::input_tick`] once per rendered frame, before any of the
  ability calls (`set_velocity`, `set_rotation`, `jump`, `sprint`, `stop_sprint`)
  issued that frame. It records the frame delta those calls scale by and regenerates
  stamina.

Ability calls only write setpoints; nothing reaches the body before the next
simulation tick.
*/

use crate::{
    constants::{DIST_EPS, GROUND_PROBE_RAYS},
    error::LocomotionError,
    gauge::{DrainMode, ResourceGauge},
    math::{Quat, Vec3, is_finite, look_rotation, move_towards, normalize_or_zero, planar},
    mover::BodyMover,
    probe::{GroundContactProbe, GroundProbeSettings, GroundState, ProbeRay},
    scene::SceneQuery,
    settings::{LocomotionSettings, ValidatedSettings, require_positive},
    shape::ShapeDescriptor,
    slide::{ObstacleSlideResolver, ObstacleSweep},
    stats::CharacterStats,
};

/// Read-only view of the last tick's probes, for visualization.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugSnapshot {
    pub probe_rays: [ProbeRay; GROUND_PROBE_RAYS],
    pub ground: GroundState,
    pub obstacle_sweep: Option<ObstacleSweep>,
    pub velocity: Vec3,
}

#[derive(Clone, Debug)]
pub struct LocomotionIntegrator {
    settings: ValidatedSettings,
    shape: ShapeDescriptor,
    probe: GroundContactProbe,
    slide: ObstacleSlideResolver,
    stats: CharacterStats,

    velocity: Vec3,
    target_rotation: Option<Quat>,
    sprinting: bool,
    /// Delta of the current input frame (seconds).
    frame_dt: f32,
}

impl LocomotionIntegrator {
    /// Validates `settings` and `shape` and spawns a character at rest.
    pub fn new(
        settings: LocomotionSettings,
        shape: ShapeDescriptor,
    ) -> Result<Self, LocomotionError> {
        let settings = settings.validate()?;
        require_positive("shape.radius", shape.radius())?;
        require_positive("shape.height", shape.height())?;

        log::debug!(
            "Spawned locomotion: gravity = {:.3}, jump speed = {:.3}, shape = {:?}",
            settings.gravity(),
            settings.jump_speed(),
            shape
        );

        Ok(Self {
            probe: GroundContactProbe::new(GroundProbeSettings::from(&settings)),
            slide: ObstacleSlideResolver::from(&settings),
            stats: CharacterStats::from_settings(&settings),
            settings,
            shape,
            velocity: Vec3::zeros(),
            target_rotation: None,
            sprinting: false,
            frame_dt: 0.0,
        })
    }

    // -------------------------------------------------------------------------
    // Ticks
    // -------------------------------------------------------------------------

    /// Advances the character by one fixed step of `fixed_dt` seconds.
    pub fn simulation_tick<S, M>(&mut self, scene: &S, mover: &mut M, fixed_dt: f32)
    where
        S: SceneQuery + ?Sized,
        M: BodyMover + ?Sized,
    {
        let dt = if fixed_dt.is_finite() { fixed_dt.max(0.0) } else { 0.0 };

        // 1. Gravity
        if !self.probe.is_grounded() {
            self.velocity.y -= self.settings.gravity() * dt;
        }

        // 2. Ground probe
        let position = mover.translation();
        self.probe
            .update(scene, &self.shape, &position, &mut self.velocity);

        // 3. Rotation
        let current = mover.rotation();
        let next = self.target_rotation.and_then(|target| {
            if current == target {
                return None;
            }
            let t = (self.settings.rotation_acceleration * dt).clamp(0.0, 1.0);
            Some(current.try_slerp(&target, t, DIST_EPS).unwrap_or(target))
        });

        // 4. Obstacle slide
        self.slide
            .resolve(scene, &self.shape, &position, &mut self.velocity);

        // 5. Commit
        if self.velocity != Vec3::zeros() {
            mover.move_translation(position + self.velocity * dt);
        }
        if let Some(rotation) = next {
            mover.move_rotation(rotation);
        }
    }

    /// Starts a new input frame of `dt` seconds.
    pub fn input_tick(&mut self, dt: f32) {
        self.frame_dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.stats.stamina.regenerate(self.frame_dt);
    }

    // -------------------------------------------------------------------------
    // Setpoints
    // -------------------------------------------------------------------------

    /// Steers the horizontal velocity toward `direction` at walk or sprint speed.
    ///
    /// Ignored while airborne or for a non-finite direction. The change is limited to
    /// `movement_acceleration` times the frame delta; the vertical component is left
    /// alone.
    pub fn set_velocity(&mut self, direction: Vec3) {
        if !self.is_grounded() || !is_finite(&direction) {
            return;
        }

        let speed = if self.sprinting {
            self.settings.sprint_speed
        } else {
            self.settings.base_speed
        };
        let desired = normalize_or_zero(&planar(&direction)) * speed;
        let max_delta = self.settings.movement_acceleration * self.frame_dt;
        let horizontal = move_towards(&planar(&self.velocity), &desired, max_delta);

        self.velocity.x = horizontal.x;
        self.velocity.z = horizontal.z;
    }

    /// Sets the facing target to look along `direction`.
    ///
    /// Zero-length, non-finite and vertical directions keep the previous target.
    pub fn set_rotation(&mut self, direction: Vec3) {
        if let Some(target) = look_rotation(&direction) {
            self.target_rotation = Some(target);
        }
    }

    // -------------------------------------------------------------------------
    // Abilities
    // -------------------------------------------------------------------------

    pub fn can_jump(&self) -> bool {
        let affordable = self
            .settings
            .jump_cost
            .is_none_or(|cost| self.stats.stamina.current() > cost);

        self.is_grounded() && !self.is_jumping() && affordable
    }

    pub fn can_sprint(&self) -> bool {
        self.is_grounded() && !self.is_jumping() && !self.stats.stamina.is_empty()
    }

    /// Launches the character upward if [`can_jump`](Self::can_jump) allows it.
    pub fn jump(&mut self) {
        if !self.can_jump() {
            log::debug!(
                "Jump rejected: grounded = {}, jumping = {}, stamina = {:.2}",
                self.is_grounded(),
                self.is_jumping(),
                self.stats.stamina.current()
            );
            return;
        }

        if let Some(cost) = self.settings.jump_cost {
            self.stats.stamina.drain(cost, DrainMode::Instant, 0.0);
        }
        self.velocity.y = self.settings.jump_speed();
        log::debug!("Jump at {:.2} m/s", self.velocity.y);
    }

    /// Keeps sprinting for this frame, draining stamina, or stops when not allowed.
    pub fn sprint(&mut self) {
        if !self.can_sprint() {
            self.stop_sprint();
            return;
        }

        self.stats
            .stamina
            .drain(self.settings.sprint_drain_rate, DrainMode::Constant, self.frame_dt);
        if !self.sprinting {
            log::debug!("Sprint started");
        }
        self.sprinting = true;
    }

    pub fn stop_sprint(&mut self) {
        if self.sprinting {
            log::debug!("Sprint stopped");
        }
        self.sprinting = false;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.probe.is_grounded()
    }

    /// Moving upward.
    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.velocity.y > 0.0
    }

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn target_rotation(&self) -> Option<Quat> {
        self.target_rotation
    }

    #[inline]
    pub fn shape(&self) -> &ShapeDescriptor {
        &self.shape
    }

    #[inline]
    pub fn settings(&self) -> &ValidatedSettings {
        &self.settings
    }

    #[inline]
    pub fn stamina(&self) -> &ResourceGauge {
        &self.stats.stamina
    }

    #[inline]
    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    #[inline]
    pub fn stats_mut(&mut self) -> &mut CharacterStats {
        &mut self.stats
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        DebugSnapshot {
            probe_rays: *self.probe.rays(),
            ground: self.probe.state(),
            obstacle_sweep: self.slide.last_sweep().copied(),
            velocity: self.velocity,
        }
    }
}
