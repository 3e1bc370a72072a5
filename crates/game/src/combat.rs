//! Damage, death, and touchdown rules.

use engine_core::Damage;

use crate::aircraft::{Aircraft, Objective};
use crate::config::CombatConfig;

/// Result of applying damage to an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Ignored,
    Damaged,
    /// This hit brought health to zero. Reported once per aircraft.
    Killed,
}

/// Apply `damage` to `target`. Damage after death is a no-op.
pub fn apply_damage(target: &mut Aircraft, damage: Damage) -> DamageOutcome {
    if target.is_dead() {
        return DamageOutcome::Ignored;
    }
    target.health.take_damage(damage.amount);
    log::debug!(
        "{:?} hit by {:?} for {} ({} left)",
        target.role,
        damage.source,
        damage.amount,
        target.health.current()
    );
    if target.health.is_depleted() && target.mark_dead() {
        DamageOutcome::Killed
    } else {
        DamageOutcome::Damaged
    }
}

/// Force a crash. Returns true if this call killed the aircraft.
pub fn crash(target: &mut Aircraft) -> bool {
    target.mark_dead()
}

/// Result of touching the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touchdown {
    Landed,
    Crashed,
}

/// Decide whether a ground contact is a landing or a crash.
///
/// A landing needs the return-to-base objective, the runway within reach, and a slow,
/// shallow touchdown. Anything else is a crash.
pub fn resolve_touchdown(
    objective: Objective,
    distance_to_runway: f32,
    speed: f32,
    vertical_speed: f32,
    config: &CombatConfig,
) -> Touchdown {
    let landed = objective == Objective::ReturnAndLand
        && distance_to_runway <= config.landing_radius
        && speed < config.landing_speed
        && vertical_speed.abs() < config.landing_vertical_speed;
    if landed {
        Touchdown::Landed
    } else {
        Touchdown::Crashed
    }
}
