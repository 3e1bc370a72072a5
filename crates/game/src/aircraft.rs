//! Aircraft state for the player and the NPC.

use engine_core::{Health, Quat, Role, Transform, Vec3};
use physics::FlightState;

use crate::npc::NpcBrain;

/// Player mission objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Shoot down the NPC.
    Engage,
    /// NPC is down; bring the aircraft back onto the runway.
    ReturnAndLand,
}

/// Player viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Chase,
    Cockpit,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Chase => CameraMode::Cockpit,
            CameraMode::Cockpit => CameraMode::Chase,
        }
    }
}

/// How the encounter ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Crashed,
    ShotDown,
    MissionAccomplished,
}

/// State shared by both aircraft.
#[derive(Debug, Clone)]
pub struct Aircraft {
    pub role: Role,
    pub flight: FlightState,
    pub min_speed: f32,
    pub max_speed: f32,
    pub health: Health,
    is_dead: bool,
}

impl Aircraft {
    pub fn new(role: Role, transform: Transform, speed: f32, speed_band: (f32, f32)) -> Self {
        let (min_speed, max_speed) = speed_band;
        Self {
            role,
            flight: FlightState::new(transform, speed.clamp(min_speed, max_speed)),
            min_speed,
            max_speed,
            health: Health::default(),
            is_dead: false,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.flight.transform
    }

    pub fn position(&self) -> Vec3 {
        self.flight.transform.position
    }

    pub fn speed(&self) -> f32 {
        self.flight.speed
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Mark dead. Returns false if it already was; death happens exactly once.
    pub(crate) fn mark_dead(&mut self) -> bool {
        if self.is_dead {
            return false;
        }
        self.is_dead = true;
        self.health.deplete();
        self.flight.speed = 0.0;
        self.flight.stalling = false;
        true
    }
}

/// Player aircraft and mission state.
#[derive(Debug, Clone)]
pub struct PlayerAircraft {
    pub aircraft: Aircraft,
    pub ammo: u32,
    pub is_landed: bool,
    pub camera_mode: CameraMode,
    pub objective: Objective,
    outcome: Option<Outcome>,
}

impl PlayerAircraft {
    pub fn new(aircraft: Aircraft, ammo: u32) -> Self {
        Self {
            aircraft,
            ammo,
            is_landed: false,
            camera_mode: CameraMode::Chase,
            objective: Objective::Engage,
            outcome: None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Alive and the encounter not yet decided: input still steers the aircraft.
    pub fn is_controllable(&self) -> bool {
        !self.aircraft.is_dead() && self.outcome.is_none()
    }

    /// Record the terminal outcome. The first one wins.
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            log::info!("Encounter over: {:?}", outcome);
            self.outcome = Some(outcome);
        }
    }

    /// One-way switch from engaging to returning to base. Frozen once the encounter is over.
    pub(crate) fn npc_destroyed(&mut self) {
        if self.objective == Objective::Engage && self.outcome.is_none() {
            log::info!("Objective: return to base and land");
            self.objective = Objective::ReturnAndLand;
        }
    }

    /// Settle on the runway after a good touchdown.
    pub(crate) fn land(&mut self, ground_elevation: f32, clearance: f32) {
        let t = &mut self.aircraft.flight.transform;
        t.position.y = ground_elevation + clearance;
        let heading = t.forward();
        let flat = Vec3::new(heading.x, 0.0, heading.z);
        if let Some(level) = engine_core::look_rotation(flat, Vec3::Y) {
            t.rotation = level;
        }
        self.aircraft.flight.speed = 0.0;
        self.aircraft.flight.stalling = false;
        self.is_landed = true;
        self.finish(Outcome::MissionAccomplished);
    }
}

/// NPC aircraft with its decision state.
#[derive(Debug, Clone)]
pub struct NpcAircraft {
    pub aircraft: Aircraft,
    pub brain: NpcBrain,
    /// Simulation time of the last shot.
    pub last_fire: Option<f64>,
}

impl NpcAircraft {
    pub fn new(aircraft: Aircraft, brain: NpcBrain) -> Self {
        Self {
            aircraft,
            brain,
            last_fire: None,
        }
    }
}

/// Rotation facing `heading` radians about +Y (0 faces +Z).
pub fn heading_rotation(heading: f32) -> Quat {
    Quat::from_rotation_y(heading)
}
