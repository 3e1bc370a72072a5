//! Simulation world: every piece of mutable state the frame driver touches.
//!
//! There are no globals. The host owns one `SimWorld`, feeds it input, calls
//! [`SimWorld::update`](crate::SimWorld::update) once per frame, and reads snapshots back.

use engine_core::{FrameClock, Role, Transform, Vec3};
use hecs::World;
use input::ControlInput;
use physics::{horizontal_distance, FlightControls, SoftWall};
use procgen::HeightField;

use crate::aircraft::{heading_rotation, Aircraft, NpcAircraft, Outcome, PlayerAircraft};
use crate::camera::{CameraPose, CameraRig};
use crate::config::SimConfig;
use crate::effects::{ExplosionSystem, ParticleView};
use crate::hud::HudSnapshot;
use crate::npc::NpcController;
use crate::weapons::{ProjectileView, WeaponSystem};

/// The whole encounter.
pub struct SimWorld {
    pub(crate) config: SimConfig,
    pub(crate) terrain: HeightField,
    pub(crate) wall: SoftWall,
    pub(crate) clock: FrameClock,
    pub(crate) player: PlayerAircraft,
    /// `None` until spawned.
    pub(crate) npc: Option<NpcAircraft>,
    /// Projectile and explosion particle entities.
    pub(crate) entities: World,
    pub(crate) weapons: WeaponSystem,
    pub(crate) explosions: ExplosionSystem,
    pub(crate) npc_ai: NpcController,
    pub(crate) camera: CameraRig,
    pub(crate) camera_pose: CameraPose,
    pub(crate) input: ControlInput,
}

impl SimWorld {
    /// Build the encounter: generate terrain and spawn both aircraft.
    ///
    /// `seed` drives every random draw (NPC timers, explosion spread), so equal seeds and
    /// equal input replay the same encounter. A config that fails
    /// [`SimConfig::validate`] is replaced by the defaults.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Rejected simulation config: {}, using defaults", e);
                SimConfig::default()
            }
        };
        let terrain = HeightField::new(config.terrain.clone());
        let wall = SoftWall::from_world_size(config.world.world_size, config.world.boundary_fraction);

        let w = &config.world;
        let player_transform =
            Transform::from_position_rotation(w.player_spawn, heading_rotation(w.player_heading));
        let player = PlayerAircraft::new(
            Aircraft::new(
                Role::Player,
                player_transform,
                w.player_speed,
                (config.flight.min_speed, config.flight.max_speed),
            ),
            config.weapons.player_ammo,
        );

        let mut camera = CameraRig::new(config.camera.clone());
        let camera_pose = camera.update(&player_transform, player.camera_mode);

        let mut world = Self {
            clock: FrameClock::new(config.world.max_frame_dt),
            weapons: WeaponSystem::new(config.weapons.clone()),
            explosions: ExplosionSystem::new(&config.combat, seed.wrapping_add(1)),
            npc_ai: NpcController::new(config.npc.clone(), seed),
            entities: World::new(),
            npc: None,
            input: ControlInput::default(),
            terrain,
            wall,
            player,
            camera,
            camera_pose,
            config,
        };

        let npc_transform = Transform::from_position_rotation(
            world.config.world.npc_spawn,
            heading_rotation(world.config.world.npc_heading),
        );
        world.spawn_npc(npc_transform);
        log::info!(
            "Encounter ready: player at {:?}, bandit at {:?}",
            world.player.aircraft.position(),
            npc_transform.position
        );
        world
    }

    /// Spawn (or replace) the NPC at `transform` with full health.
    pub fn spawn_npc(&mut self, transform: Transform) {
        let cfg = self.npc_ai.config();
        let aircraft = Aircraft::new(
            Role::Npc,
            transform,
            self.config.world.npc_speed,
            (cfg.min_speed, cfg.max_speed),
        );
        let brain = self.npc_ai.spawn_brain();
        self.npc = Some(NpcAircraft::new(aircraft, brain));
    }

    /// Input for the next `update`. Edges are consumed by that frame.
    pub fn set_control_input(&mut self, input: ControlInput) {
        self.input = input;
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn terrain(&self) -> &HeightField {
        &self.terrain
    }

    /// Ground elevation, identical to what physics collides against.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.terrain.height_at(x, z)
    }

    pub fn player(&self) -> &PlayerAircraft {
        &self.player
    }

    pub fn player_pose(&self) -> Transform {
        *self.player.aircraft.transform()
    }

    /// Live NPC, if spawned and not destroyed.
    pub fn npc(&self) -> Option<&NpcAircraft> {
        self.npc.as_ref().filter(|npc| !npc.aircraft.is_dead())
    }

    pub fn npc_pose(&self) -> Option<Transform> {
        self.npc().map(|npc| *npc.aircraft.transform())
    }

    pub fn projectiles(&self) -> Vec<ProjectileView> {
        WeaponSystem::views(&self.entities)
    }

    pub fn particles(&self) -> Vec<ParticleView> {
        ExplosionSystem::views(&self.entities)
    }

    pub fn camera(&self) -> CameraPose {
        self.camera_pose
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.player.outcome()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.clock.elapsed_seconds()
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Height of `position` above the terrain directly below it.
    pub fn altitude_of(&self, position: Vec3) -> f32 {
        position.y - self.terrain.height_at(position.x, position.z)
    }

    pub fn hud(&self) -> HudSnapshot {
        let a = &self.player.aircraft;
        let npc = self.npc();
        HudSnapshot {
            health: a.health.current(),
            ammo: self.player.ammo,
            speed: a.speed(),
            altitude: self.altitude_of(a.position()),
            stalling: a.flight.stalling,
            boosting: self.input.boost && self.player.is_controllable(),
            objective: self.player.objective,
            camera_mode: self.player.camera_mode,
            outcome: self.player.outcome(),
            npc_health: npc.map(|n| n.aircraft.health.current()),
            npc_distance: npc.map(|n| n.aircraft.position().distance(a.position())),
            runway_distance: horizontal_distance(a.position(), self.terrain.runway_center()),
        }
    }
}

/// Map pilot input onto flight-model controls.
pub(crate) fn flight_controls(input: &ControlInput) -> FlightControls {
    FlightControls {
        throttle: input.axes.throttle,
        pitch: input.axes.pitch,
        roll: input.axes.roll,
        yaw: input.axes.yaw,
        boost: input.boost,
    }
}
