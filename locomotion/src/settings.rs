/*!
Locomotion settings.

`LocomotionSettings` is the plain, serializable tuning record. It is turned into an
immutable [`ValidatedSettings`] once at construction; the simulation only ever reads
the validated form, so no tunable can change after a character is spawned.

Notes
- Values are expressed in meters, seconds and units-per-second.
- Gravity and jump speed are derived from `max_jump_height` and `jump_peak_time`:
  `gravity = 2 * h / t^2`, `jump_speed = gravity * t`.
*/

use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        DEFAULT_BASE_SPEED, DEFAULT_GROUND_PROBE_MARGIN, DEFAULT_JUMP_COST,
        DEFAULT_JUMP_PEAK_TIME, DEFAULT_MAX_GROUND_SPEED_FOR_FULL_CONTACT,
        DEFAULT_MAX_JUMP_HEIGHT, DEFAULT_MOVEMENT_ACCELERATION, DEFAULT_OBSTACLE_PROBE_DISTANCE,
        DEFAULT_RESOURCE_MAX, DEFAULT_RESOURCE_REGEN_DELAY, DEFAULT_RESOURCE_REGEN_RATE,
        DEFAULT_RESOURCE_REGEN_SPEED, DEFAULT_ROTATION_ACCELERATION, DEFAULT_SPRINT_DRAIN_RATE,
        DEFAULT_SPRINT_SPEED,
    },
    error::InvalidConfigurationError,
    layers::LayerMask,
};

/// How the four lateral ground probe rays are oriented.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeAxes {
    /// World X and Z axes.
    World,
    /// The last non-zero horizontal velocity direction and its perpendicular.
    #[default]
    Velocity,
}

/// Character locomotion tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Walking speed (m/s).
    pub base_speed: f32,
    /// Sprinting speed (m/s).
    pub sprint_speed: f32,
    /// Max change of planar velocity per second (m/s^2).
    pub movement_acceleration: f32,
    /// Rotation interpolation factor per second.
    pub rotation_acceleration: f32,

    /// Jump apex height (meters). Must be positive.
    pub max_jump_height: f32,
    /// Time to reach the apex (seconds). Must be positive.
    pub jump_peak_time: f32,
    /// Instant resource cost of a jump. `None` makes jumping free.
    pub jump_cost: Option<f32>,

    /// Layers considered ground by the downward probe.
    pub ground_layer_mask: LayerMask,
    /// Extra ray length below the capsule bottom (meters).
    pub ground_probe_margin: f32,
    /// Horizontal speed above which every probe ray must hit (m/s).
    pub max_ground_speed_for_full_contact: f32,
    /// Orientation policy for the lateral probe rays.
    pub probe_axes: ProbeAxes,

    /// Layers that block movement.
    pub obstacle_layer_mask: LayerMask,
    /// Length of the forward obstacle sphere-cast (meters).
    pub obstacle_probe_distance: f32,

    /// Resource gauge capacity. Must be positive.
    pub resource_max: f32,
    /// Passive regeneration (units per second).
    pub resource_regen_rate: f32,
    /// Regeneration multiplier.
    pub resource_regen_speed: f32,
    /// Quiet time after a drain before regeneration resumes (seconds).
    pub resource_regen_delay: f32,
    /// Continuous sprint cost (units per second).
    pub sprint_drain_rate: f32,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            base_speed: DEFAULT_BASE_SPEED,
            sprint_speed: DEFAULT_SPRINT_SPEED,
            movement_acceleration: DEFAULT_MOVEMENT_ACCELERATION,
            rotation_acceleration: DEFAULT_ROTATION_ACCELERATION,
            max_jump_height: DEFAULT_MAX_JUMP_HEIGHT,
            jump_peak_time: DEFAULT_JUMP_PEAK_TIME,
            jump_cost: Some(DEFAULT_JUMP_COST),
            ground_layer_mask: LayerMask::GROUND,
            ground_probe_margin: DEFAULT_GROUND_PROBE_MARGIN,
            max_ground_speed_for_full_contact: DEFAULT_MAX_GROUND_SPEED_FOR_FULL_CONTACT,
            probe_axes: ProbeAxes::default(),
            obstacle_layer_mask: LayerMask::OBSTACLE,
            obstacle_probe_distance: DEFAULT_OBSTACLE_PROBE_DISTANCE,
            resource_max: DEFAULT_RESOURCE_MAX,
            resource_regen_rate: DEFAULT_RESOURCE_REGEN_RATE,
            resource_regen_speed: DEFAULT_RESOURCE_REGEN_SPEED,
            resource_regen_delay: DEFAULT_RESOURCE_REGEN_DELAY,
            sprint_drain_rate: DEFAULT_SPRINT_DRAIN_RATE,
        }
    }
}

impl LocomotionSettings {
    /// Checks every value and derives the jump constants.
    ///
    /// Fails on the first offending field; nothing is defaulted.
    pub fn validate(self) -> Result<ValidatedSettings, InvalidConfigurationError> {
        require_positive("max_jump_height", self.max_jump_height)?;
        require_positive("jump_peak_time", self.jump_peak_time)?;
        require_positive("resource_max", self.resource_max)?;

        require_non_negative("base_speed", self.base_speed)?;
        require_non_negative("sprint_speed", self.sprint_speed)?;
        require_non_negative("movement_acceleration", self.movement_acceleration)?;
        require_non_negative("rotation_acceleration", self.rotation_acceleration)?;
        require_non_negative("ground_probe_margin", self.ground_probe_margin)?;
        require_non_negative(
            "max_ground_speed_for_full_contact",
            self.max_ground_speed_for_full_contact,
        )?;
        require_non_negative("obstacle_probe_distance", self.obstacle_probe_distance)?;
        require_non_negative("resource_regen_rate", self.resource_regen_rate)?;
        require_non_negative("resource_regen_speed", self.resource_regen_speed)?;
        require_non_negative("resource_regen_delay", self.resource_regen_delay)?;
        require_non_negative("sprint_drain_rate", self.sprint_drain_rate)?;
        if let Some(cost) = self.jump_cost {
            require_non_negative("jump_cost", cost)?;
        }

        let gravity = 2.0 * self.max_jump_height / (self.jump_peak_time * self.jump_peak_time);
        require_positive("gravity", gravity)?;
        let jump_speed = gravity * self.jump_peak_time;

        Ok(ValidatedSettings {
            settings: self,
            gravity,
            jump_speed,
        })
    }
}

/// Settings that passed validation, plus the constants derived from them.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSettings {
    settings: LocomotionSettings,
    gravity: f32,
    jump_speed: f32,
}

impl ValidatedSettings {
    /// Downward acceleration magnitude applied while airborne (m/s^2).
    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Initial vertical speed that reaches `max_jump_height` in `jump_peak_time` (m/s).
    #[inline]
    pub fn jump_speed(&self) -> f32 {
        self.jump_speed
    }

    #[inline]
    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }
}

impl std::ops::Deref for ValidatedSettings {
    type Target = LocomotionSettings;

    fn deref(&self) -> &LocomotionSettings {
        &self.settings
    }
}

pub(crate) fn require_positive(
    field: &'static str,
    value: f32,
) -> Result<(), InvalidConfigurationError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }

    log::warn!("Rejecting locomotion setting {field} = {value}");
    Err(InvalidConfigurationError {
        field,
        value,
        reason: "must be finite and greater than zero",
    })
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), InvalidConfigurationError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }

    log::warn!("Rejecting locomotion setting {field} = {value}");
    Err(InvalidConfigurationError {
        field,
        value,
        reason: "must be finite and non-negative",
    })
}
