//! Simulation tuning. Loaded from `sim.ron` at startup.
//!
//! Every field has a default, so a config file only needs the values it changes.

use std::path::{Path, PathBuf};

use glam::Vec3;
use physics::FlightParams;
use procgen::TerrainConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// World extent, frame timing, and spawn points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of the playable square, in world units.
    pub world_size: f32,
    /// Soft wall radius as a fraction of `world_size`.
    pub boundary_fraction: f32,
    /// Largest step a single frame may integrate, in seconds.
    pub max_frame_dt: f32,
    pub player_spawn: Vec3,
    /// Initial heading of the player, radians about +Y (0 faces +Z).
    pub player_heading: f32,
    pub player_speed: f32,
    pub npc_spawn: Vec3,
    pub npc_heading: f32,
    pub npc_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: 10_000.0,
            boundary_fraction: 0.48,
            max_frame_dt: 0.1,
            player_spawn: Vec3::new(0.0, 400.0, -3000.0),
            player_heading: 0.0,
            player_speed: 1.5,
            npc_spawn: Vec3::new(0.0, 600.0, 1500.0),
            npc_heading: std::f32::consts::PI,
            npc_speed: 1.8,
        }
    }
}

/// NPC pilot behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    /// Closer than this at re-evaluation the NPC evades, otherwise it chases.
    pub evade_threshold: f32,
    /// Re-evaluation interval is drawn from `[reevaluate_min, reevaluate_max)` seconds.
    pub reevaluate_min: f32,
    pub reevaluate_max: f32,
    /// How far past itself (away from the player) the NPC aims when evading.
    pub standoff: f32,
    /// Slerp factor toward the desired orientation, applied once per frame.
    pub turn_blend: f32,
    pub bank_gain: f32,
    /// Bank angle limit in radians.
    pub max_bank: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub gravity_coupling: f32,
    pub weapon_range: f32,
    /// Seconds between NPC shots.
    pub fire_cooldown: f32,
    /// Height above ground below which the NPC pulls up regardless of state.
    pub terrain_margin: f32,
    /// Pull-up pitch rate in radians per second.
    pub pull_up_rate: f32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            evade_threshold: 400.0,
            reevaluate_min: 1.5,
            reevaluate_max: 4.0,
            standoff: 600.0,
            turn_blend: 0.04,
            bank_gain: 1.5,
            max_bank: 0.8,
            min_speed: 1.2,
            max_speed: 2.4,
            gravity_coupling: 0.6,
            weapon_range: 900.0,
            fire_cooldown: 0.8,
            terrain_margin: 120.0,
            pull_up_rate: 1.5,
        }
    }
}

/// Gun and projectile tuning, shared by both aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Spawn distance ahead of the nose.
    pub muzzle_offset: f32,
    pub muzzle_speed: f32,
    /// Seconds a projectile lives.
    pub lifetime: f32,
    pub hit_radius: f32,
    pub damage: u32,
    pub player_ammo: u32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            muzzle_offset: 12.0,
            muzzle_speed: 1200.0,
            lifetime: 2.0,
            hit_radius: 25.0,
            damage: 10,
            player_ammo: 300,
        }
    }
}

/// Ground contact, landing, and explosion tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Altitude above the terrain sample that counts as ground contact.
    pub ground_clearance: f32,
    /// Horizontal distance from the runway centre within which a touchdown can succeed.
    pub landing_radius: f32,
    /// Touchdown speed must be below this.
    pub landing_speed: f32,
    /// Touchdown vertical speed magnitude must be below this.
    pub landing_vertical_speed: f32,
    pub burst_size: usize,
    pub particle_life_min: f32,
    pub particle_life_max: f32,
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    pub particle_gravity: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            ground_clearance: 2.0,
            landing_radius: 300.0,
            landing_speed: 0.5,
            landing_vertical_speed: 0.05,
            burst_size: 48,
            particle_life_min: 0.8,
            particle_life_max: 2.0,
            particle_speed_min: 20.0,
            particle_speed_max: 90.0,
            particle_gravity: 30.0,
        }
    }
}

/// Chase and cockpit camera placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Chase camera offset in the aircraft body frame (+Z is the nose).
    pub chase_offset: Vec3,
    pub chase_look_ahead: f32,
    /// Lerp factor toward the chase target, applied once per frame.
    pub chase_blend: f32,
    pub cockpit_offset: Vec3,
    pub cockpit_look_ahead: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            chase_offset: Vec3::new(0.0, 12.0, -45.0),
            chase_look_ahead: 60.0,
            chase_blend: 0.1,
            cockpit_offset: Vec3::new(0.0, 2.5, 4.0),
            cockpit_look_ahead: 200.0,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub flight: FlightParams,
    pub npc: NpcConfig,
    pub weapons: WeaponConfig,
    pub combat: CombatConfig,
    pub camera: CameraConfig,
}

impl SimConfig {
    /// Load config from `sim.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load and validate config from `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data)
    }

    /// Parse and validate config from a RON string.
    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tunings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {v}"),
                })
            }
        }
        fn ordered(field: &'static str, lo: f32, hi: f32) -> Result<(), ConfigError> {
            if lo.is_finite() && hi.is_finite() && lo < hi {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("range [{lo}, {hi}) is empty"),
                })
            }
        }
        fn fraction(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be in (0, 1], got {v}"),
                })
            }
        }

        positive("world.world_size", self.world.world_size)?;
        fraction("world.boundary_fraction", self.world.boundary_fraction)?;
        positive("world.max_frame_dt", self.world.max_frame_dt)?;
        positive("terrain.ramp_width", self.terrain.ramp_width)?;
        ordered("flight.min_speed..max_speed", self.flight.min_speed, self.flight.max_speed)?;
        if self.flight.min_speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "flight.min_speed",
                reason: "speed must never go negative".into(),
            });
        }
        if !(self.flight.boost_max_speed >= self.flight.max_speed) {
            return Err(ConfigError::Invalid {
                field: "flight.boost_max_speed",
                reason: "boost ceiling below normal ceiling".into(),
            });
        }
        ordered("npc.reevaluate_min..reevaluate_max", self.npc.reevaluate_min, self.npc.reevaluate_max)?;
        positive("npc.reevaluate_min", self.npc.reevaluate_min)?;
        ordered("npc.min_speed..max_speed", self.npc.min_speed, self.npc.max_speed)?;
        fraction("npc.turn_blend", self.npc.turn_blend)?;
        if !(self.npc.max_bank.is_finite() && self.npc.max_bank >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "npc.max_bank",
                reason: format!("must be a non-negative angle, got {}", self.npc.max_bank),
            });
        }
        positive("weapons.lifetime", self.weapons.lifetime)?;
        positive("weapons.hit_radius", self.weapons.hit_radius)?;
        ordered(
            "combat.particle_life_min..particle_life_max",
            self.combat.particle_life_min,
            self.combat.particle_life_max,
        )?;
        ordered(
            "combat.particle_speed_min..particle_speed_max",
            self.combat.particle_speed_min,
            self.combat.particle_speed_max,
        )?;
        fraction("camera.chase_blend", self.camera.chase_blend)?;
        Ok(())
    }

    /// Save current config to `sim.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialise config: {}", e),
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("sim.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().expect("defaults must validate");
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let config = SimConfig::from_ron("(npc: (evade_threshold: 250.0), weapons: (damage: 25))")
            .expect("valid config");
        assert_eq!(config.npc.evade_threshold, 250.0);
        assert_eq!(config.weapons.damage, 25);
        assert_eq!(config.npc.standoff, NpcConfig::default().standoff);
        assert_eq!(config.world.world_size, 10_000.0);
    }

    #[test]
    fn round_trips_through_ron() {
        let s = ron::ser::to_string_pretty(&SimConfig::default(), ron::ser::PrettyConfig::default())
            .expect("serialise");
        let back = SimConfig::from_ron(&s).expect("parse");
        assert_eq!(back.combat.burst_size, CombatConfig::default().burst_size);
        assert_eq!(back.camera.chase_offset, CameraConfig::default().chase_offset);
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = SimConfig::from_ron("(npc: (reevaluate_min: 5.0, reevaluate_max: 1.0))")
            .expect_err("inverted range");
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_nan_ceilings() {
        let mut config = SimConfig::default();
        config.flight.boost_max_speed = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.npc.max_bank = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_ron() {
        let err = SimConfig::from_ron("(world: (world_size: ))").expect_err("bad syntax");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimConfig::load_from(Path::new("/definitely/not/here/sim.ron"))
            .expect_err("missing");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
