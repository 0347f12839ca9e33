//! Headless locomotion sandbox.
//!
//! Builds a small static scene (floor, wall, trigger volume), spawns one capsule and
//! plays a scripted input track through the two locomotion ticks: input frames at
//! `--input-hz` and fixed simulation steps at `--tick-hz`, both on a virtual clock.
//!
//! Run with `RUST_LOG=debug` to see ground transitions and ability gating.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use locomotion::{
    BodyMover, CapsuleShape, ColliderShapeDef, LayerMask, LocomotionIntegrator,
    LocomotionSettings, Pose, StaticQueryWorld, Vec3, WorldStaticDef,
};

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(about = "Fixed-step capsule locomotion sandbox", long_about = None)]
struct Cli {
    /// Locomotion settings (JSON); missing fields use defaults
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Simulated duration in seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,

    /// Fixed simulation rate
    #[arg(long, default_value_t = 60.0)]
    tick_hz: f32,

    /// Input (frame) rate
    #[arg(long, default_value_t = 144.0)]
    input_hz: f32,
}

/// What the scripted player does during one input frame.
#[derive(Default, Debug, Clone, Copy)]
struct Input {
    direction: Vec3,
    sprint: bool,
    jump: bool,
}

/// Scripted input track keyed on simulated time.
fn scripted_input(time: f32, previous_time: f32) -> Input {
    let pressed = |at: f32| previous_time < at && time >= at;

    match time {
        t if t < 1.0 => Input::default(),
        t if t < 3.0 => Input {
            direction: Vec3::z(),
            ..Default::default()
        },
        t if t < 5.0 => Input {
            direction: Vec3::new(1.0, 0.0, 1.0),
            sprint: true,
            ..Default::default()
        },
        t if t < 7.0 => Input {
            direction: Vec3::new(1.0, 0.0, 1.0),
            jump: pressed(5.5) || pressed(6.5),
            ..Default::default()
        },
        t if t < 9.0 => Input {
            direction: -Vec3::x(),
            ..Default::default()
        },
        _ => Input::default(),
    }
}

fn build_scene() -> StaticQueryWorld {
    StaticQueryWorld::build([
        WorldStaticDef::new(
            1,
            Vec3::zeros(),
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
            LayerMask::GROUND,
        ),
        WorldStaticDef::new(
            2,
            Vec3::new(0.0, 2.0, 30.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vec3::new(100.0, 2.0, 0.5),
            },
            LayerMask::OBSTACLE,
        ),
        WorldStaticDef::new(
            3,
            Vec3::new(0.0, 1.0, 10.0),
            ColliderShapeDef::Sphere { radius: 2.0 },
            LayerMask::OBSTACLE,
        )
        .as_sensor(),
    ])
}

fn load_settings(path: Option<&PathBuf>) -> Result<LocomotionSettings> {
    let Some(path) = path else {
        return Ok(LocomotionSettings::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid settings in {}", path.display()))
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.tick_hz > 0.0 && cli.input_hz > 0.0, "rates must be positive");

    let settings = load_settings(cli.settings.as_ref())?;
    let world = build_scene();
    let mut character =
        LocomotionIntegrator::new(settings, CapsuleShape::standing(0.5, 2.0).into())
            .context("Failed to spawn character")?;
    let mut pose = Pose::at(Vec3::new(0.0, 0.5, 0.0));

    let fixed_dt = 1.0 / cli.tick_hz;
    let frame_dt = 1.0 / cli.input_hz;

    log::info!(
        "Running {:.1}s: {} statics, tick {:.0} Hz, input {:.0} Hz",
        cli.seconds,
        world.len(),
        cli.tick_hz,
        cli.input_hz
    );

    let mut time = 0.0_f32;
    let mut accumulator = 0.0_f32;
    let mut ticks = 0_u64;
    let mut was_grounded = character.is_grounded();

    while time < cli.seconds {
        let previous_time = time;
        time += frame_dt;

        let input = scripted_input(time, previous_time);
        character.input_tick(frame_dt);
        if input.sprint {
            character.sprint();
        } else {
            character.stop_sprint();
        }
        if input.jump {
            character.jump();
        }
        character.set_velocity(input.direction);
        character.set_rotation(input.direction);

        accumulator += frame_dt;
        while accumulator >= fixed_dt {
            accumulator -= fixed_dt;
            character.simulation_tick(&world, &mut pose, fixed_dt);
            ticks += 1;

            if character.is_grounded() != was_grounded {
                was_grounded = character.is_grounded();
                let at = pose.translation();
                log::info!(
                    "t={time:.2}s {} at ({:.2}, {:.2}, {:.2})",
                    if was_grounded { "landed" } else { "airborne" },
                    at.x,
                    at.y,
                    at.z
                );
            }
        }

        log::trace!("t={time:.3}s {:?}", character.debug_snapshot());
    }

    let at = pose.translation();
    log::info!(
        "Done after {ticks} ticks: position ({:.2}, {:.2}, {:.2}), velocity {:?}, \
         stamina {:.1}/{:.1}",
        at.x,
        at.y,
        at.z,
        character.velocity(),
        character.stamina().current(),
        character.stamina().max()
    );

    Ok(())
}
