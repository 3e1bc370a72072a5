//! Per-frame simulation advancement.
//!
//! Each stage sees the poses the earlier stages produced this frame: the player moves
//! first, then the NPC, then projectiles are tested against both updated poses.

use engine_core::{Role, Vec3};
use physics::{horizontal_distance, touches_ground};

use crate::aircraft::Outcome;
use crate::combat::{apply_damage, crash, resolve_touchdown, DamageOutcome, Touchdown};
use crate::npc::PlayerContact;
use crate::world::{flight_controls, SimWorld};

impl SimWorld {
    /// Advance the encounter by one frame of `raw_dt` seconds (clamped to the configured max).
    pub fn update(&mut self, raw_dt: f32) {
        let dt = self.clock.advance(raw_dt);
        let now = self.clock.elapsed_seconds();
        log::trace!("frame {} dt={:.4}", self.clock.frame_count(), dt);

        // Camera toggle works in every state, including after the encounter ends
        if self.input.camera_toggle_pressed {
            self.player.camera_mode = self.player.camera_mode.toggled();
            log::debug!("camera: {:?}", self.player.camera_mode);
        }

        self.update_player(dt, now);
        self.update_npc(dt, now);
        self.update_projectiles(dt, now);
        self.explosions.update(&mut self.entities, dt);

        self.camera_pose = self
            .camera
            .update(self.player.aircraft.transform(), self.player.camera_mode);

        self.input.consume_edges();
    }

    fn update_player(&mut self, dt: f32, now: f64) {
        // Terminal states ignore flight input
        if !self.player.is_controllable() {
            return;
        }

        let controls = flight_controls(&self.input);
        let moved = physics::step(
            &mut self.player.aircraft.flight,
            &controls,
            &self.config.flight,
            dt,
        );
        if self.wall.enforce(&mut self.player.aircraft.flight.transform, moved) {
            log::trace!("player held at boundary");
        }

        self.player_ground_contact();

        if self.input.fire_pressed && self.player.is_controllable() {
            let source = *self.player.aircraft.transform();
            self.weapons.fire(
                &mut self.entities,
                &source,
                Role::Player,
                Some(&mut self.player.ammo),
                now,
            );
        }
    }

    fn player_ground_contact(&mut self) {
        let clearance = self.config.combat.ground_clearance;
        let position = self.player.aircraft.position();
        let ground = self.terrain.height_at(position.x, position.z);
        if !touches_ground(position, ground, clearance) {
            return;
        }

        let flight = &self.player.aircraft.flight;
        let runway_distance = horizontal_distance(position, self.terrain.runway_center());
        let touchdown = resolve_touchdown(
            self.player.objective,
            runway_distance,
            flight.speed,
            flight.vertical_speed(),
            &self.config.combat,
        );
        match touchdown {
            Touchdown::Landed => {
                log::info!("Touchdown {:.0} from runway centre", runway_distance);
                self.player.land(ground, clearance);
            }
            Touchdown::Crashed => {
                log::info!(
                    "Player hit the ground at speed {:.2}, vertical {:.3}",
                    flight.speed,
                    flight.vertical_speed()
                );
                if crash(&mut self.player.aircraft) {
                    self.explosions.spawn_burst(&mut self.entities, position);
                }
                self.player.finish(Outcome::Crashed);
            }
        }
    }

    fn update_npc(&mut self, dt: f32, now: f64) {
        let Some(npc) = self.npc.as_mut() else {
            return;
        };
        if npc.aircraft.is_dead() {
            return;
        }

        let contact = PlayerContact {
            position: self.player.aircraft.position(),
            targetable: self.player.is_controllable(),
        };
        let fire = self.npc_ai.update(
            npc,
            contact,
            &self.terrain,
            &self.wall,
            self.config.flight.distance_scale,
            dt,
            now,
        );

        let position = npc.aircraft.position();
        let ground = self.terrain.height_at(position.x, position.z);
        if touches_ground(position, ground, self.config.combat.ground_clearance) {
            log::info!("Bandit flew into the ground");
            if crash(&mut npc.aircraft) {
                self.npc_killed(position);
            }
            return;
        }

        if fire {
            let source = *npc.aircraft.transform();
            self.weapons
                .fire(&mut self.entities, &source, Role::Npc, None, now);
        }
    }

    fn update_projectiles(&mut self, dt: f32, now: f64) {
        let mut targets = Vec::with_capacity(2);
        if self.player.is_controllable() {
            targets.push((Role::Player, self.player.aircraft.position()));
        }
        if let Some(npc) = self.npc.as_ref().filter(|n| !n.aircraft.is_dead()) {
            targets.push((Role::Npc, npc.aircraft.position()));
        }

        let hits = self
            .weapons
            .update(&mut self.entities, dt, now, &targets, &self.terrain);

        for hit in hits {
            log::debug!("{:?} hit at {:?}", hit.target, hit.position);
            match hit.target {
                Role::Player => {
                    let position = self.player.aircraft.position();
                    if apply_damage(&mut self.player.aircraft, hit.damage) == DamageOutcome::Killed {
                        log::info!("Player shot down");
                        self.explosions.spawn_burst(&mut self.entities, position);
                        self.player.finish(Outcome::ShotDown);
                    }
                }
                Role::Npc => {
                    let Some(npc) = self.npc.as_mut() else {
                        continue;
                    };
                    let position = npc.aircraft.position();
                    if apply_damage(&mut npc.aircraft, hit.damage) == DamageOutcome::Killed {
                        log::info!("Bandit shot down");
                        self.npc_killed(position);
                    }
                }
            }
        }
    }

    fn npc_killed(&mut self, position: Vec3) {
        self.explosions.spawn_burst(&mut self.entities, position);
        self.player.npc_destroyed();
    }
}
