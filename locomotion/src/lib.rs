pub mod constants;
pub mod error;
pub mod gauge;
pub mod integrator;
pub mod layers;
pub mod math;
pub mod mover;
pub mod probe;
pub mod rapier_world;
pub mod scene;
pub mod settings;
pub mod shape;
pub mod slide;
pub mod stats;

pub use error::{InvalidConfigurationError, LocomotionError, UnsupportedShapeError};
pub use gauge::{DrainMode, ResourceGauge};
pub use integrator::{DebugSnapshot, LocomotionIntegrator};
pub use layers::LayerMask;
pub use math::{Point, Quat, Vec3};
pub use mover::{BodyMover, Pose};
pub use probe::{GroundContactProbe, GroundProbeSettings, GroundState, ProbeRay};
pub use rapier_world::{ColliderShapeDef, StaticQueryWorld, WorldStaticDef};
pub use scene::{RayHit, SceneQuery, SweepHit};
pub use settings::{LocomotionSettings, ProbeAxes, ValidatedSettings};
pub use shape::{CapsuleShape, ShapeDescriptor};
pub use slide::{ObstacleSlideResolver, ObstacleSweep, slide_velocity};
pub use stats::CharacterStats;
