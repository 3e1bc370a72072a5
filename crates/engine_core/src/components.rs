//! Common components shared by aircraft, projectiles, and effects.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which side an entity fights for. Used for projectile ownership and targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Player,
    Npc,
}

impl Role {
    /// The side this role shoots at.
    pub fn opponent(self) -> Self {
        match self {
            Role::Player => Role::Npc,
            Role::Npc => Role::Player,
        }
    }
}

/// Velocity component for moving entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub linear: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }
}

/// Integer hit points. Only ever decreases, saturating at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: u32,
}

impl Health {
    pub const FULL: u32 = 100;

    pub fn new(initial: u32) -> Self {
        Self { current: initial }
    }

    /// Subtract `amount`, saturating at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Drop straight to zero (crash).
    pub fn deplete(&mut self) {
        self.current = 0;
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(Self::FULL)
    }
}

/// Lifetime component for temporary entities (explosion particles).
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Tick down; returns true once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

/// Damage carried by a hit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub amount: u32,
    pub source: Role,
}

impl Damage {
    pub fn bullet(amount: u32, source: Role) -> Self {
        Self { amount, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_saturates_at_zero() {
        let mut h = Health::default();
        h.take_damage(60);
        assert_eq!(h.current(), 40);
        h.take_damage(60);
        assert_eq!(h.current(), 0);
        assert!(h.is_depleted());
    }

    #[test]
    fn roles_oppose_each_other() {
        assert_eq!(Role::Player.opponent(), Role::Npc);
        assert_eq!(Role::Npc.opponent(), Role::Player);
    }

    #[test]
    fn lifetime_expires() {
        let mut l = Lifetime::new(0.5);
        assert!(!l.update(0.25));
        assert!(l.update(0.25));
    }
}
