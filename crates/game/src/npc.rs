//! NPC pilot: chase/evade state machine, steering, terrain avoidance, and trigger discipline.

use engine_core::{look_rotation, Quat, Transform, Vec3};
use physics::{step_gliding, SoftWall};
use procgen::HeightField;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aircraft::NpcAircraft;
use crate::config::NpcConfig;

/// What the NPC is currently trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcBehavior {
    /// Fly at the player.
    Chase,
    /// Fly away from the player to open distance.
    Evade,
}

/// Decision state: current behaviour and the countdown to the next re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcBrain {
    pub behavior: NpcBehavior,
    /// Seconds until the next re-evaluation.
    pub timer: f32,
}

impl NpcBrain {
    pub fn new(behavior: NpcBehavior, timer: f32) -> Self {
        Self { behavior, timer }
    }

    /// Count down; on expiry pick a behaviour from `distance_to_player` and reseed the timer.
    ///
    /// Returns true when a re-evaluation happened this call.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        distance_to_player: f32,
        config: &NpcConfig,
        rng: &mut R,
    ) -> bool {
        self.timer -= dt;
        if self.timer > 0.0 {
            return false;
        }
        let next = if distance_to_player < config.evade_threshold {
            NpcBehavior::Evade
        } else {
            NpcBehavior::Chase
        };
        if next != self.behavior {
            log::debug!(
                "NPC {:?} -> {:?} at {:.0} units",
                self.behavior,
                next,
                distance_to_player
            );
        }
        self.behavior = next;
        self.timer = rng.gen_range(config.reevaluate_min..config.reevaluate_max);
        true
    }

    /// Point the NPC steers toward this frame.
    pub fn target_point(&self, npc: Vec3, player: Vec3, standoff: f32) -> Vec3 {
        match self.behavior {
            NpcBehavior::Chase => player,
            NpcBehavior::Evade => {
                let away = (npc - player).normalize_or_zero();
                npc + away * standoff
            }
        }
    }
}

/// Orientation blended from `rotation` toward facing `target`, banked into the turn.
///
/// Falls back to `rotation` when the target direction is degenerate.
pub fn steer(rotation: Quat, position: Vec3, target: Vec3, config: &NpcConfig) -> Quat {
    let desired = target - position;
    let Some(look) = look_rotation(desired, Vec3::Y) else {
        return rotation;
    };
    let forward = rotation * Vec3::Z;
    let turn = forward.cross(desired.normalize_or_zero());
    // Turning toward the left wing (turn.y > 0) drops the left wing.
    let bank = (-turn.y * config.bank_gain).clamp(-config.max_bank, config.max_bank);
    let goal = look * Quat::from_rotation_z(bank);
    rotation.slerp(goal, config.turn_blend).normalize()
}

/// Where the player is, as far as the NPC cares.
#[derive(Debug, Clone, Copy)]
pub struct PlayerContact {
    pub position: Vec3,
    /// Whether the player can still be shot at.
    pub targetable: bool,
}

/// Drives the NPC aircraft each frame.
pub struct NpcController {
    config: NpcConfig,
    rng: StdRng,
}

impl NpcController {
    pub fn new(config: NpcConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &NpcConfig {
        &self.config
    }

    /// Initial brain for a freshly spawned NPC.
    pub fn spawn_brain(&mut self) -> NpcBrain {
        let timer = self
            .rng
            .gen_range(self.config.reevaluate_min..self.config.reevaluate_max);
        NpcBrain::new(NpcBehavior::Chase, timer)
    }

    /// Advance one frame. Returns true if the NPC fires this frame.
    ///
    /// A dead NPC is left untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        npc: &mut NpcAircraft,
        player: PlayerContact,
        terrain: &HeightField,
        wall: &SoftWall,
        distance_scale: f32,
        dt: f32,
        now: f64,
    ) -> bool {
        if npc.aircraft.is_dead() {
            return false;
        }
        let cfg = &self.config;

        let distance = npc.aircraft.position().distance(player.position);
        npc.brain.tick(dt, distance, cfg, &mut self.rng);

        let transform: &mut Transform = &mut npc.aircraft.flight.transform;
        let target = npc
            .brain
            .target_point(transform.position, player.position, cfg.standoff);

        let ground = terrain.height_at(transform.position.x, transform.position.z);
        if transform.position.y - ground < cfg.terrain_margin {
            transform.pitch_local(cfg.pull_up_rate * dt);
        } else {
            transform.rotation = steer(transform.rotation, transform.position, target, cfg);
        }

        let band = (npc.aircraft.min_speed, npc.aircraft.max_speed);
        let moved = step_gliding(
            &mut npc.aircraft.flight,
            cfg.gravity_coupling,
            band,
            distance_scale,
            dt,
        );
        wall.enforce(&mut npc.aircraft.flight.transform, moved);

        let distance = npc.aircraft.position().distance(player.position);
        let cooled = npc
            .last_fire
            .map_or(true, |t| now - t >= cfg.fire_cooldown as f64);
        if player.targetable && distance <= cfg.weapon_range && cooled {
            npc.last_fire = Some(now);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::Aircraft;
    use engine_core::Role;
    use procgen::TerrainConfig;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn close_player_at_expiry_means_evade() {
        let cfg = NpcConfig::default();
        let mut brain = NpcBrain::new(NpcBehavior::Chase, 0.01);
        assert!(brain.tick(0.02, 300.0, &cfg, &mut rng()));
        assert_eq!(brain.behavior, NpcBehavior::Evade);
    }

    #[test]
    fn distant_player_at_expiry_means_chase() {
        let cfg = NpcConfig::default();
        let mut brain = NpcBrain::new(NpcBehavior::Evade, 0.01);
        assert!(brain.tick(0.02, 500.0, &cfg, &mut rng()));
        assert_eq!(brain.behavior, NpcBehavior::Chase);
    }

    #[test]
    fn no_transition_before_expiry() {
        let cfg = NpcConfig::default();
        let mut brain = NpcBrain::new(NpcBehavior::Chase, 1.0);
        assert!(!brain.tick(0.5, 10.0, &cfg, &mut rng()));
        assert_eq!(brain.behavior, NpcBehavior::Chase);
        assert!((brain.timer - 0.5).abs() < 1e-6);
    }

    #[test]
    fn timer_reseeds_within_bounds() {
        let cfg = NpcConfig::default();
        let mut r = rng();
        let mut brain = NpcBrain::new(NpcBehavior::Chase, 0.0);
        for _ in 0..50 {
            brain.timer = 0.0;
            brain.tick(0.0, 1000.0, &cfg, &mut r);
            assert!(brain.timer >= cfg.reevaluate_min && brain.timer < cfg.reevaluate_max);
        }
    }

    #[test]
    fn evade_target_points_away_from_player() {
        let brain = NpcBrain::new(NpcBehavior::Evade, 1.0);
        let npc = Vec3::new(0.0, 500.0, 0.0);
        let player = Vec3::new(0.0, 500.0, -300.0);
        let target = brain.target_point(npc, player, 600.0);
        assert!((target - Vec3::new(0.0, 500.0, 600.0)).length() < 1e-3);

        let chase = NpcBrain::new(NpcBehavior::Chase, 1.0);
        assert_eq!(chase.target_point(npc, player, 600.0), player);
    }

    #[test]
    fn steering_turns_gradually_and_banks_into_turn() {
        let cfg = NpcConfig::default();
        let target = Vec3::new(1000.0, 0.0, 0.0);
        let once = steer(Quat::IDENTITY, Vec3::ZERO, target, &cfg);
        let fwd = once * Vec3::Z;
        assert!(fwd.x > 0.0, "nose swings toward the target");
        assert!(fwd.x < 0.5, "but not in a single frame");
        assert!((once * Vec3::X).y < 0.0, "left wing drops in a left turn");

        let mut q = Quat::IDENTITY;
        for _ in 0..400 {
            q = steer(q, Vec3::ZERO, target, &cfg);
        }
        assert!((q * Vec3::Z).x > 0.95);
    }

    fn npc_at(position: Vec3) -> NpcAircraft {
        let mut controller = NpcController::new(NpcConfig::default(), 1);
        let aircraft = Aircraft::new(Role::Npc, Transform::from_position(position), 1.8, (1.2, 2.4));
        NpcAircraft::new(aircraft, controller.spawn_brain())
    }

    #[test]
    fn pulls_up_near_terrain() {
        let terrain = HeightField::new(TerrainConfig::default());
        let wall = SoftWall::from_world_size(10_000.0, 0.48);
        let mut controller = NpcController::new(NpcConfig::default(), 3);
        // Over the runway, 50 units up, player far below and ahead.
        let mut npc = npc_at(Vec3::new(0.0, 50.0, 0.0));
        let player = PlayerContact {
            position: Vec3::new(0.0, -500.0, 2000.0),
            targetable: false,
        };
        for _ in 0..10 {
            controller.update(&mut npc, player, &terrain, &wall, 100.0, 1.0 / 60.0, 0.0);
        }
        assert!(npc.aircraft.transform().forward().y > 0.0);
    }

    #[test]
    fn fires_in_range_after_cooldown() {
        let terrain = HeightField::new(TerrainConfig::default());
        let wall = SoftWall::from_world_size(10_000.0, 0.48);
        let mut controller = NpcController::new(NpcConfig::default(), 5);
        let mut npc = npc_at(Vec3::new(0.0, 800.0, 0.0));
        let player = PlayerContact {
            position: Vec3::new(0.0, 800.0, 500.0),
            targetable: true,
        };
        let dt = 1.0 / 60.0;
        assert!(controller.update(&mut npc, player, &terrain, &wall, 100.0, dt, 10.0));
        assert!(!controller.update(&mut npc, player, &terrain, &wall, 100.0, dt, 10.1));
        assert!(controller.update(&mut npc, player, &terrain, &wall, 100.0, dt, 10.9));
    }

    #[test]
    fn holds_fire_on_untargetable_player() {
        let terrain = HeightField::new(TerrainConfig::default());
        let wall = SoftWall::from_world_size(10_000.0, 0.48);
        let mut controller = NpcController::new(NpcConfig::default(), 5);
        let mut npc = npc_at(Vec3::new(0.0, 800.0, 0.0));
        let player = PlayerContact {
            position: Vec3::new(0.0, 800.0, 200.0),
            targetable: false,
        };
        assert!(!controller.update(&mut npc, player, &terrain, &wall, 100.0, 1.0 / 60.0, 10.0));
    }

    #[test]
    fn dead_npc_is_frozen() {
        let terrain = HeightField::new(TerrainConfig::default());
        let wall = SoftWall::from_world_size(10_000.0, 0.48);
        let mut controller = NpcController::new(NpcConfig::default(), 5);
        let mut npc = npc_at(Vec3::new(0.0, 800.0, 0.0));
        npc.aircraft.mark_dead();
        let before = *npc.aircraft.transform();
        let player = PlayerContact {
            position: Vec3::new(0.0, 800.0, 200.0),
            targetable: true,
        };
        assert!(!controller.update(&mut npc, player, &terrain, &wall, 100.0, 1.0 / 60.0, 10.0));
        assert_eq!(*npc.aircraft.transform(), before);
    }
}
