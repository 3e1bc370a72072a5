//! Guns and projectiles.
//!
//! Live projectiles are hecs entities carrying `Projectile`, `Transform`, and `Velocity`.
//! Only this module spawns or despawns them.

use engine_core::{look_rotation, Damage, Role, Transform, Velocity, Vec3};
use hecs::{Entity, World};
use physics::sphere_hit;
use procgen::HeightField;

use crate::config::WeaponConfig;

/// Projectile component.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Side that fired it. A tag, not a reference: the shooter may die first.
    pub owner: Role,
    /// Simulation time of the shot.
    pub born_at: f64,
}

/// A projectile reached an opposing aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEvent {
    pub target: Role,
    pub damage: Damage,
    pub position: Vec3,
}

/// Read-only view of a live projectile for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileView {
    pub position: Vec3,
    pub velocity: Vec3,
    pub owner: Role,
}

/// Manages projectile spawning, flight, expiry, and hit tests.
pub struct WeaponSystem {
    config: WeaponConfig,
}

impl WeaponSystem {
    pub fn new(config: WeaponConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    /// Fire from `source`. `ammo` is the shooter's magazine, `None` for unlimited.
    ///
    /// Returns `None` (and spawns nothing) when the magazine is empty.
    pub fn fire(
        &self,
        world: &mut World,
        source: &Transform,
        owner: Role,
        ammo: Option<&mut u32>,
        now: f64,
    ) -> Option<Entity> {
        if let Some(ammo) = ammo {
            if *ammo == 0 {
                log::trace!("{:?} trigger pulled on empty magazine", owner);
                return None;
            }
            *ammo -= 1;
        }
        let forward = source.forward();
        let position = source.position + forward * self.config.muzzle_offset;
        let velocity = forward * self.config.muzzle_speed;
        Some(self.spawn(world, position, velocity, owner, now))
    }

    /// Spawn a projectile with explicit kinematics.
    pub fn spawn(
        &self,
        world: &mut World,
        position: Vec3,
        velocity: Vec3,
        owner: Role,
        now: f64,
    ) -> Entity {
        let rotation = look_rotation(velocity, Vec3::Y).unwrap_or_default();
        world.spawn((
            Projectile { owner, born_at: now },
            Transform::from_position_rotation(position, rotation),
            Velocity::new(velocity),
        ))
    }

    /// Move every projectile, then remove expired, grounded, and hitting ones.
    ///
    /// `targets` lists the live aircraft a projectile may hit. A projectile is only tested
    /// against the side opposing its owner, and registers at most one hit.
    pub fn update(
        &self,
        world: &mut World,
        dt: f32,
        now: f64,
        targets: &[(Role, Vec3)],
        terrain: &HeightField,
    ) -> Vec<HitEvent> {
        let lifetime = self.config.lifetime as f64;
        let mut hits = Vec::new();
        let mut spent = Vec::new();

        for (entity, (projectile, transform, velocity)) in
            world.query_mut::<(&Projectile, &mut Transform, &Velocity)>()
        {
            transform.position += velocity.linear * dt;

            if now - projectile.born_at > lifetime {
                spent.push(entity);
                continue;
            }

            let opponent = projectile.owner.opponent();
            let hit = targets.iter().find(|(role, pos)| {
                *role == opponent && sphere_hit(transform.position, *pos, self.config.hit_radius)
            });
            if let Some(&(target, _)) = hit {
                hits.push(HitEvent {
                    target,
                    damage: Damage::bullet(self.config.damage, projectile.owner),
                    position: transform.position,
                });
                spent.push(entity);
                continue;
            }

            let p = transform.position;
            if p.y < terrain.height_at(p.x, p.z) {
                spent.push(entity);
            }
        }

        for entity in spent {
            world.despawn(entity).ok();
        }
        hits
    }

    /// Snapshot of all live projectiles.
    pub fn views(world: &World) -> Vec<ProjectileView> {
        world
            .query::<(&Projectile, &Transform, &Velocity)>()
            .iter()
            .map(|(_, (projectile, transform, velocity))| ProjectileView {
                position: transform.position,
                velocity: velocity.linear,
                owner: projectile.owner,
            })
            .collect()
    }

    pub fn count(world: &World) -> usize {
        world.query::<&Projectile>().iter().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procgen::TerrainConfig;

    const DT: f32 = 1.0 / 60.0;

    fn system() -> WeaponSystem {
        WeaponSystem::new(WeaponConfig::default())
    }

    fn terrain() -> HeightField {
        HeightField::new(TerrainConfig::default())
    }

    fn high() -> Transform {
        Transform::from_position(Vec3::new(0.0, 1000.0, -2000.0))
    }

    #[test]
    fn fire_spawns_at_muzzle_and_spends_ammo() {
        let weapons = system();
        let mut world = World::new();
        let mut ammo = 2;
        weapons
            .fire(&mut world, &high(), Role::Player, Some(&mut ammo), 0.0)
            .expect("loaded");
        assert_eq!(ammo, 1);
        let views = WeaponSystem::views(&world);
        assert_eq!(views.len(), 1);
        let expected = high().position + Vec3::Z * weapons.config().muzzle_offset;
        assert!((views[0].position - expected).length() < 1e-3);
        assert!((views[0].velocity - Vec3::Z * weapons.config().muzzle_speed).length() < 1e-2);
    }

    #[test]
    fn empty_magazine_is_a_no_op() {
        let weapons = system();
        let mut world = World::new();
        let mut ammo = 0;
        assert!(weapons
            .fire(&mut world, &high(), Role::Player, Some(&mut ammo), 0.0)
            .is_none());
        assert_eq!(ammo, 0);
        assert_eq!(WeaponSystem::count(&world), 0);
    }

    #[test]
    fn npc_fire_needs_no_ammo() {
        let weapons = system();
        let mut world = World::new();
        assert!(weapons.fire(&mut world, &high(), Role::Npc, None, 0.0).is_some());
    }

    #[test]
    fn projectile_lives_for_its_lifetime() {
        let weapons = system();
        let terrain = terrain();
        let mut world = World::new();
        let lifetime = weapons.config().lifetime as f64;
        weapons.fire(&mut world, &high(), Role::Player, None, 0.0);

        weapons.update(&mut world, DT, lifetime / 2.0, &[], &terrain);
        assert_eq!(WeaponSystem::count(&world), 1);

        weapons.update(&mut world, DT, lifetime + 0.01, &[], &terrain);
        assert_eq!(WeaponSystem::count(&world), 0);
    }

    #[test]
    fn hit_on_opponent_removes_projectile() {
        let weapons = system();
        let terrain = terrain();
        let mut world = World::new();
        let npc = Vec3::new(0.0, 900.0, 0.0);
        weapons.spawn(&mut world, npc + Vec3::X * 5.0, Vec3::ZERO, Role::Player, 0.0);

        let hits = weapons.update(&mut world, DT, 0.1, &[(Role::Npc, npc)], &terrain);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, Role::Npc);
        assert_eq!(hits[0].damage.amount, weapons.config().damage);
        assert_eq!(hits[0].damage.source, Role::Player);
        assert!((hits[0].position - npc).length() < weapons.config().hit_radius);
        assert_eq!(WeaponSystem::count(&world), 0);
    }

    #[test]
    fn own_side_is_never_hit() {
        let weapons = system();
        let terrain = terrain();
        let mut world = World::new();
        let npc = Vec3::new(0.0, 900.0, 0.0);
        weapons.spawn(&mut world, npc, Vec3::ZERO, Role::Npc, 0.0);

        let hits = weapons.update(&mut world, DT, 0.1, &[(Role::Npc, npc)], &terrain);
        assert!(hits.is_empty());
        assert_eq!(WeaponSystem::count(&world), 1);
    }

    #[test]
    fn removal_during_pass_skips_nothing() {
        let weapons = system();
        let terrain = terrain();
        let mut world = World::new();
        let npc = Vec3::new(0.0, 900.0, 0.0);
        for i in 0..6 {
            // Alternate hitting and missing projectiles.
            let offset = if i % 2 == 0 { 0.0 } else { 500.0 };
            weapons.spawn(&mut world, npc + Vec3::X * offset, Vec3::ZERO, Role::Player, 0.0);
        }
        let hits = weapons.update(&mut world, DT, 0.1, &[(Role::Npc, npc)], &terrain);
        assert_eq!(hits.len(), 3);
        assert_eq!(WeaponSystem::count(&world), 3);
    }

    #[test]
    fn ground_impact_removes_projectile() {
        let weapons = system();
        let terrain = terrain();
        let mut world = World::new();
        weapons.spawn(&mut world, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -600.0, 0.0), Role::Npc, 0.0);
        let hits = weapons.update(&mut world, DT, 0.1, &[], &terrain);
        assert!(hits.is_empty());
        assert_eq!(WeaponSystem::count(&world), 0);
    }
}
