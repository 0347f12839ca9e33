//! Full-tick behavior against a real rapier query world.

mod common;

use common::*;
use locomotion::{
    ColliderShapeDef, LayerMask, LocomotionSettings, Pose, StaticQueryWorld, Vec3,
    WorldStaticDef,
};

#[test]
fn falling_character_lands_and_stops() {
    let world = flat_world();
    let mut character = character(LocomotionSettings::default());
    let mut pose = Pose::at(Vec3::new(0.0, 1.0, 0.0));

    assert!(settle(&mut character, &world, &mut pose, 120));
    assert_eq!(character.velocity().y, 0.0);
    assert!(pose.translation.y < 0.1 && pose.translation.y > -0.5, "{pose:?}");

    let landed = pose;
    for _ in 0..30 {
        character.simulation_tick(&world, &mut pose, DT);
    }
    assert_eq!(pose, landed);
    assert!(character.is_grounded());
}

#[test]
fn trigger_ground_is_not_ground() {
    let world = StaticQueryWorld::build([ground_plane(1).as_sensor()]);
    let mut character = character(LocomotionSettings::default());
    let mut pose = Pose::default();

    assert!(!settle(&mut character, &world, &mut pose, 60));
    assert!(pose.translation.y < -5.0);
}

#[test]
fn walking_into_wall_slides_along_it() {
    let world = StaticQueryWorld::build([ground_plane(1), wall_at(2, 2.5)]);
    let mut character = character(LocomotionSettings::default());
    let mut pose = Pose::default();
    assert!(settle(&mut character, &world, &mut pose, 10));

    let diagonal = Vec3::new(1.0, 0.0, 1.0);
    let mut slid = false;
    for _ in 0..120 {
        step(&mut character, &world, &mut pose, diagonal);
        // Capsule surface never gets past the sweep distance into the wall.
        assert!(pose.translation.z + 0.5 < 2.5 + 0.1, "{pose:?}");
        slid |= character
            .debug_snapshot()
            .obstacle_sweep
            .is_some_and(|sweep| sweep.hit);
    }

    assert!(slid);
    assert!(pose.translation.x > 5.0, "{pose:?}");
    assert!(character.is_grounded());
}

#[test]
fn trigger_wall_does_not_block() {
    let world = StaticQueryWorld::build([ground_plane(1), wall_at(2, 2.5).as_sensor()]);
    let mut character = character(LocomotionSettings::default());
    let mut pose = Pose::default();
    assert!(settle(&mut character, &world, &mut pose, 10));

    for _ in 0..90 {
        step(&mut character, &world, &mut pose, Vec3::z());
    }
    assert!(pose.translation.z > 5.0, "{pose:?}");
    assert!(pose.translation.x.abs() < 1.0e-4);
}

#[test]
fn walking_off_a_ledge_falls() {
    let world = StaticQueryWorld::build([WorldStaticDef::new(
        1,
        Vec3::new(0.0, -0.5, 0.0),
        ColliderShapeDef::Cuboid {
            half_extents: Vec3::new(2.0, 0.5, 2.0),
        },
        LayerMask::GROUND,
    )]);
    let mut character = character(LocomotionSettings::default());
    let mut pose = Pose::default();
    assert!(settle(&mut character, &world, &mut pose, 10));

    for _ in 0..120 {
        step(&mut character, &world, &mut pose, Vec3::x());
    }

    assert!(!character.is_grounded());
    assert!(pose.translation.x > 3.0);
    assert!(pose.translation.y < -1.0, "{pose:?}");
    // Airborne steering is ignored, so the run-up speed is kept.
    assert!((character.velocity().x - 10.0).abs() < 1.0e-3);
}

#[test]
fn jump_reaches_configured_height_and_lands() {
    let world = flat_world();
    let mut character = character(LocomotionSettings::default());
    let mut pose = Pose::default();
    assert!(settle(&mut character, &world, &mut pose, 10));
    let floor = pose.translation.y;

    character.input_tick(DT);
    character.jump();
    assert!(character.is_jumping());

    let mut peak = floor;
    let mut landed = false;
    for _ in 0..240 {
        character.simulation_tick(&world, &mut pose, DT);
        peak = peak.max(pose.translation.y);
        if character.is_grounded() && !character.is_jumping() {
            landed = true;
            break;
        }
    }

    assert!(landed);
    let apex = peak - floor;
    assert!(apex > 3.8 && apex < 4.8, "apex {apex}");
    // No snapping: the capsule may sink by up to two landing ticks of travel.
    assert!(pose.translation.y > -1.0, "{pose:?}");
}

#[test]
fn sprint_drains_stamina_until_exhausted() {
    let world = flat_world();
    let mut character = character(LocomotionSettings {
        resource_max: 1.0,
        ..Default::default()
    });
    let mut pose = Pose::default();
    assert!(settle(&mut character, &world, &mut pose, 10));

    let mut sprinted_ticks = 0;
    for _ in 0..60 {
        character.input_tick(DT);
        character.sprint();
        if character.is_sprinting() {
            sprinted_ticks += 1;
        }
        character.set_velocity(Vec3::z());
        character.simulation_tick(&world, &mut pose, DT);
    }

    // 1 unit at 2 units/s lasts half a second.
    assert!((29..=31).contains(&sprinted_ticks), "{sprinted_ticks}");
    assert!(!character.is_sprinting());
    assert_eq!(character.stamina().current(), 0.0);
}

#[test]
fn identical_inputs_replay_identically() {
    fn run() -> Pose {
        let world = StaticQueryWorld::build([ground_plane(1), wall_at(2, 4.0)]);
        let mut character = character(LocomotionSettings::default());
        let mut pose = Pose::at(Vec3::new(0.0, 0.5, 0.0));

        for tick in 0..300 {
            let direction = if tick % 90 < 45 {
                Vec3::new(0.3, 0.0, 1.0)
            } else {
                Vec3::new(-1.0, 0.0, 0.2)
            };
            if tick % 70 == 0 {
                character.jump();
            }
            step(&mut character, &world, &mut pose, direction);
        }
        pose
    }

    assert_eq!(run(), run());
}
