/*!
Locomotion defaults and tolerances.

Defaults are the baseline tuning used by [`crate::LocomotionSettings::default`]. Keeping
them together makes tuning easier and keeps test fixtures in sync with the runtime.

Notes
- Distances are in meters, time in seconds, rates per second.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
*/

/// Practical small distance for comparisons (meters).
/// Use for normalization guards and dot-product checks.
pub const DIST_EPS: f32 = 1.0e-6;

/// Number of downward rays cast by the ground probe (center + four lateral offsets).
pub const GROUND_PROBE_RAYS: usize = 5;

/// Lateral ray offset as a fraction of the capsule radius.
pub const PROBE_OFFSET_RADIUS_FRACTION: f32 = 0.5;

/// A gauge within this distance of its max is considered full and stops regenerating.
pub const REGEN_CEILING_EPSILON: f32 = 0.01;

/// Default walking speed (m/s).
pub const DEFAULT_BASE_SPEED: f32 = 10.0;

/// Default sprinting speed (m/s).
pub const DEFAULT_SPRINT_SPEED: f32 = 15.0;

/// Default planar acceleration toward the desired velocity (m/s^2).
pub const DEFAULT_MOVEMENT_ACCELERATION: f32 = 100.0;

/// Default rotation interpolation rate (fraction per second, scaled by dt).
pub const DEFAULT_ROTATION_ACCELERATION: f32 = 10.0;

/// Default apex height of a jump (meters).
pub const DEFAULT_MAX_JUMP_HEIGHT: f32 = 4.0;

/// Default time to reach the jump apex (seconds).
pub const DEFAULT_JUMP_PEAK_TIME: f32 = 0.4;

/// Default resource cost of a single jump.
pub const DEFAULT_JUMP_COST: f32 = 10.0;

/// Default continuous sprint drain (units per second).
pub const DEFAULT_SPRINT_DRAIN_RATE: f32 = 2.0;

/// Extra ray length below the capsule bottom used to detect ground (meters).
/// Small values keep the controller from latching onto ground it is leaving.
pub const DEFAULT_GROUND_PROBE_MARGIN: f32 = 0.1;

/// Above this horizontal speed every probe ray must hit to count as ground contact (m/s).
pub const DEFAULT_MAX_GROUND_SPEED_FOR_FULL_CONTACT: f32 = 10.0;

/// Length of the forward obstacle sphere-cast (meters).
pub const DEFAULT_OBSTACLE_PROBE_DISTANCE: f32 = 0.1;

/// Default gauge capacity.
pub const DEFAULT_RESOURCE_MAX: f32 = 100.0;

/// Default passive regeneration (units per second).
pub const DEFAULT_RESOURCE_REGEN_RATE: f32 = 5.0;

/// Default regeneration multiplier.
pub const DEFAULT_RESOURCE_REGEN_SPEED: f32 = 1.0;

/// Default quiet time after a drain before regeneration resumes (seconds).
pub const DEFAULT_RESOURCE_REGEN_DELAY: f32 = 1.0;

/// Default health capacity for [`crate::CharacterStats`].
pub const DEFAULT_HEALTH_MAX: f32 = 100.0;
