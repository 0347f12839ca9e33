//! Shared fixtures for the locomotion integration tests.

#![allow(dead_code)]

use locomotion::{
    CapsuleShape, ColliderShapeDef, LayerMask, LocomotionIntegrator, LocomotionSettings, Pose,
    StaticQueryWorld, Vec3, WorldStaticDef,
};

pub const DT: f32 = 1.0 / 60.0;

pub fn ground_plane(id: u32) -> WorldStaticDef {
    WorldStaticDef::new(
        id,
        Vec3::zeros(),
        ColliderShapeDef::Plane {
            offset_along_normal: 0.0,
        },
        LayerMask::GROUND,
    )
}

/// Obstacle wall spanning X, its near face at `z = face_z`.
pub fn wall_at(id: u32, face_z: f32) -> WorldStaticDef {
    WorldStaticDef::new(
        id,
        Vec3::new(0.0, 2.0, face_z + 0.5),
        ColliderShapeDef::Cuboid {
            half_extents: Vec3::new(50.0, 2.0, 0.5),
        },
        LayerMask::OBSTACLE,
    )
}

pub fn flat_world() -> StaticQueryWorld {
    StaticQueryWorld::build([ground_plane(1)])
}

pub fn character(settings: LocomotionSettings) -> LocomotionIntegrator {
    LocomotionIntegrator::new(settings, CapsuleShape::standing(0.5, 2.0).into())
        .expect("valid character")
}

/// Runs simulation ticks until the character is grounded, at most `max_ticks`.
pub fn settle(
    character: &mut LocomotionIntegrator,
    world: &StaticQueryWorld,
    pose: &mut Pose,
    max_ticks: usize,
) -> bool {
    for _ in 0..max_ticks {
        character.simulation_tick(world, pose, DT);
        if character.is_grounded() {
            return true;
        }
    }
    false
}

/// One input frame followed by one simulation tick.
pub fn step(
    character: &mut LocomotionIntegrator,
    world: &StaticQueryWorld,
    pose: &mut Pose,
    direction: Vec3,
) {
    character.input_tick(DT);
    character.set_velocity(direction);
    character.set_rotation(direction);
    character.simulation_tick(world, pose, DT);
}
