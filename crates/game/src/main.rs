//! Headless dogfight: flies a scripted sortie against the bandit and reports the result.
//!
//! Usage: `dogfight [seed]` or `dogfight --write-config`. Tuning comes from `sim.ron` in the
//! working directory when present.

use anyhow::{Context, Result};
use engine_core::{Transform, Vec3};
use game::{Objective, SimConfig, SimWorld};
use input::{ButtonLatch, ControlAxes, ControlInput};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u64 = 60 * 60 * 5;
const HUD_EVERY: u64 = 120;

/// Gun range for the scripted pilot.
const GUN_RANGE: f32 = 800.0;
/// Cosine of the aiming cone the pilot needs before squeezing the trigger.
const GUN_CONE: f32 = 0.98;
const MIN_ALTITUDE: f32 = 200.0;

/// Minimal pilot: points the nose at a goal, keeps the wings level, pulls up near the ground.
struct Autopilot {
    trigger: ButtonLatch,
    camera: ButtonLatch,
}

impl Autopilot {
    fn new() -> Self {
        Self {
            trigger: ButtonLatch::new(),
            camera: ButtonLatch::new(),
        }
    }

    fn fly(&mut self, world: &SimWorld, frame: u64) -> ControlInput {
        let me = world.player_pose();
        let altitude = world.altitude_of(me.position);

        let (goal, throttle, want_fire) = match (world.player().objective, world.npc_pose()) {
            (Objective::Engage, Some(npc)) => {
                let to_npc = npc.position - me.position;
                let aligned = to_npc.normalize_or_zero().dot(me.forward()) > GUN_CONE;
                (npc.position, 1.0, aligned && to_npc.length() < GUN_RANGE)
            }
            _ => (approach_point(world, &me), approach_throttle(world, &me), false),
        };

        let mut axes = steer_towards(&me, goal);
        axes.throttle = throttle;
        if altitude < MIN_ALTITUDE && world.player().objective == Objective::Engage {
            axes.pitch = 1.0;
        }

        // Hold the trigger in short pulses so each pulse is a fresh press.
        let fire_pressed = self.trigger.update(want_fire && frame % 6 < 3);
        // Peek from the cockpit once, halfway through the first minute.
        let camera_toggle_pressed = self.camera.update(frame == 1800);

        ControlInput {
            axes,
            boost: want_fire,
            fire_pressed,
            camera_toggle_pressed,
        }
    }
}

/// Glide slope target: a point short of the runway centre, lower the closer we get.
fn approach_point(world: &SimWorld, me: &Transform) -> Vec3 {
    let runway = world.terrain().runway_center();
    let flat = Vec3::new(me.position.x - runway.x, 0.0, me.position.z - runway.z);
    let distance = flat.length();
    let height = (distance * 0.08).min(600.0);
    Vec3::new(runway.x, runway.y + height, runway.z)
}

fn approach_throttle(world: &SimWorld, me: &Transform) -> f32 {
    let distance = world.hud().runway_distance;
    if distance < 600.0 && me.position.y - world.terrain().runway_center().y < 60.0 {
        -1.0
    } else {
        0.2
    }
}

/// Pitch and yaw toward `goal` in the body frame, rolling to keep the wings level.
fn steer_towards(me: &Transform, goal: Vec3) -> ControlAxes {
    let local = me.rotation.inverse() * (goal - me.position).normalize_or_zero();
    let pitch = (local.y * 3.0).clamp(-1.0, 1.0);
    let yaw = (local.x * 3.0).clamp(-1.0, 1.0);
    let roll = (-me.left().y * 2.0).clamp(-1.0, 1.0);
    ControlAxes::new(0.0, pitch, roll, yaw)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::load();

    let seed = match std::env::args().nth(1) {
        Some(arg) if arg == "--write-config" => {
            config.save();
            log::info!("Wrote current tuning to sim.ron");
            return Ok(());
        }
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("seed must be an unsigned integer, got {arg:?}"))?,
        None => 7,
    };

    log::info!("Starting dogfight sortie (seed {seed})");

    let mut world = SimWorld::new(config, seed);
    let mut pilot = Autopilot::new();

    for frame in 0..MAX_FRAMES {
        let input = pilot.fly(&world, frame);
        world.set_control_input(input);
        world.update(FRAME_DT);

        if frame % HUD_EVERY == 0 {
            log::info!("[{:7.2}s] {}", world.elapsed_seconds(), world.hud());
        }
        if world.outcome().is_some() {
            break;
        }
    }

    let hud = world.hud();
    log::info!("Final: {}", hud);
    match world.outcome() {
        Some(outcome) => log::info!(
            "Sortie ended after {:.1}s: {:?}",
            world.elapsed_seconds(),
            outcome
        ),
        None => log::info!(
            "Sortie still undecided after {:.1}s ({} projectiles, {} particles in flight)",
            world.elapsed_seconds(),
            world.projectiles().len(),
            world.particles().len()
        ),
    }

    Ok(())
}
