//! HUD values handed to the presentation layer each frame.

use std::fmt;

use crate::aircraft::{CameraMode, Objective, Outcome};

/// All HUD data for a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub health: u32,
    pub ammo: u32,
    pub speed: f32,
    /// Height above the terrain directly below.
    pub altitude: f32,
    pub stalling: bool,
    pub boosting: bool,
    pub objective: Objective,
    pub camera_mode: CameraMode,
    pub outcome: Option<Outcome>,
    /// NPC health while it is alive.
    pub npc_health: Option<u32>,
    /// Distance to the NPC while it is alive.
    pub npc_distance: Option<f32>,
    /// Horizontal distance to the runway centre.
    pub runway_distance: f32,
}

impl HudSnapshot {
    /// Banner text for the objective line.
    pub fn objective_text(&self) -> &'static str {
        match (self.outcome, self.objective) {
            (Some(Outcome::MissionAccomplished), _) => "MISSION ACCOMPLISHED",
            (Some(Outcome::ShotDown), _) => "SHOT DOWN",
            (Some(Outcome::Crashed), _) => "CRASHED",
            (None, Objective::Engage) => "DESTROY THE ENEMY FIGHTER",
            (None, Objective::ReturnAndLand) => "RETURN TO BASE AND LAND",
        }
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP {:3} | AMMO {:3} | SPD {:4.2} | ALT {:6.0}",
            self.health, self.ammo, self.speed, self.altitude
        )?;
        if self.stalling {
            write!(f, " | STALL")?;
        }
        if let (Some(hp), Some(dist)) = (self.npc_health, self.npc_distance) {
            write!(f, " | BANDIT {hp:3} @ {dist:.0}")?;
        }
        write!(f, " | {}", self.objective_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> HudSnapshot {
        HudSnapshot {
            health: 100,
            ammo: 300,
            speed: 1.5,
            altitude: 400.0,
            stalling: false,
            boosting: false,
            objective: Objective::Engage,
            camera_mode: CameraMode::Chase,
            outcome: None,
            npc_health: Some(100),
            npc_distance: Some(4500.0),
            runway_distance: 3000.0,
        }
    }

    #[test]
    fn outcome_overrides_objective_text() {
        let mut hud = snapshot();
        assert_eq!(hud.objective_text(), "DESTROY THE ENEMY FIGHTER");
        hud.outcome = Some(Outcome::Crashed);
        assert_eq!(hud.objective_text(), "CRASHED");
    }

    #[test]
    fn display_flags_stall() {
        let mut hud = snapshot();
        hud.stalling = true;
        let line = hud.to_string();
        assert!(line.contains("STALL"));
        assert!(line.contains("BANDIT"));
    }
}
