//! Explosion particle bursts. Cosmetic only: nothing in physics or AI reads them.

use engine_core::{Lifetime, Transform, Velocity, Vec3};
use hecs::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CombatConfig;

/// Marker for explosion particle entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplosionParticle;

/// Read-only view of a live particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: Vec3,
    /// Seconds of life left.
    pub life: f32,
}

/// Spawns and ages explosion particles.
pub struct ExplosionSystem {
    burst_size: usize,
    life: (f32, f32),
    speed: (f32, f32),
    gravity: f32,
    rng: StdRng,
}

impl ExplosionSystem {
    pub fn new(config: &CombatConfig, seed: u64) -> Self {
        Self {
            burst_size: config.burst_size,
            life: (config.particle_life_min, config.particle_life_max),
            speed: (config.particle_speed_min, config.particle_speed_max),
            gravity: config.particle_gravity,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn one fixed-size burst at `position`. Returns the number spawned.
    pub fn spawn_burst(&mut self, world: &mut World, position: Vec3) -> usize {
        for _ in 0..self.burst_size {
            let dir = Vec3::new(
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-0.3..1.0),
                self.rng.gen_range(-1.0..1.0),
            )
            .try_normalize()
            .unwrap_or(Vec3::Y);
            let speed = self.rng.gen_range(self.speed.0..self.speed.1);
            let life = self.rng.gen_range(self.life.0..self.life.1);

            world.spawn((
                Transform::from_position(position),
                Velocity::new(dir * speed),
                ExplosionParticle,
                Lifetime::new(life),
            ));
        }
        log::debug!("explosion: {} particles at {:?}", self.burst_size, position);
        self.burst_size
    }

    /// Move and age particles, removing those whose life ran out.
    pub fn update(&self, world: &mut World, dt: f32) {
        let gravity = Vec3::new(0.0, -self.gravity, 0.0);
        let mut expired = Vec::new();

        for (entity, (transform, velocity, lifetime, _)) in
            world.query_mut::<(&mut Transform, &mut Velocity, &mut Lifetime, &ExplosionParticle)>()
        {
            velocity.linear += gravity * dt;
            transform.position += velocity.linear * dt;
            if lifetime.update(dt) {
                expired.push(entity);
            }
        }

        for entity in expired {
            world.despawn(entity).ok();
        }
    }

    /// Snapshot of all live particles.
    pub fn views(world: &World) -> Vec<ParticleView> {
        world
            .query::<(&Transform, &Lifetime, &ExplosionParticle)>()
            .iter()
            .map(|(_, (transform, lifetime, _))| ParticleView {
                position: transform.position,
                life: lifetime.remaining,
            })
            .collect()
    }

    pub fn count(world: &World) -> usize {
        world.query::<&ExplosionParticle>().iter().count()
    }
}
