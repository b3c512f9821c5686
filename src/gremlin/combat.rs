//! Damage exchange with the player, death and its aftermath.

use bevy::prelude::*;
use micromegas_tracing::prelude::*;
use micromegas_tracing::prelude::info;
use rand::{Rng, RngCore};

use super::{AttackPhase, Gremlin, TickContext};
use crate::components::{Explosion, LootDrop, LootKind};
use crate::effects::{Effect, Effects};
use crate::events::SoundCue;
use crate::plugins::particles::{ColorSpec, Particle, ParticleConfig};
use crate::resources::PlayerState;

const DEATH_RAMP: [u8; 6] = [16, 15, 14, 13, 12, 11];
const EXPLOSION_RADIUS: f32 = 50.0;
const EXPLOSION_COLOR: u8 = 5;

/// Strict overlap; touching edges do not count.
pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

impl Gremlin {
    /// Take a hit if the player's attack box is live and covers us.
    /// Knockback is spent at the next integration; hits taken before then
    /// (while telegraphing) replace it rather than stacking.
    pub(super) fn receive_attack(&mut self, ctx: &mut TickContext) {
        let player = &*ctx.player;
        if !player.is_attacking || !overlaps(self.bounds(), player.attack_box) {
            return;
        }
        self.knockback = -Vec2::from_angle(self.angle_to_player) * self.config.hit_knockback;
        ctx.effects.sound(SoundCue::GremlinHurt);
        self.apply_damage(player.attack_damage, ctx.effects, ctx.rng);
    }

    /// Subtract health; the first drop to zero or below kills.
    pub fn apply_damage(&mut self, amount: i32, effects: &mut Effects, rng: &mut dyn RngCore) {
        if !self.alive {
            return;
        }
        self.health -= amount;
        if self.health <= 0 {
            self.die(effects, rng);
        }
    }

    fn die(&mut self, effects: &mut Effects, rng: &mut dyn RngCore) {
        self.alive = false;
        self.phase = AttackPhase::Idle;
        self.attack_box = Rect::default();
        info!("gremlin died at ({:.1}, {:.1})", self.position.x, self.position.y);

        effects.push(Effect::Explosion(Explosion::new(
            self.position,
            EXPLOSION_RADIUS,
            EXPLOSION_COLOR,
        )));
        let drops = rng.gen_range(self.config.death_drops());
        for _ in 0..drops {
            let velocity = Vec2::new(rng.gen_range(-0.1..0.1), rng.gen_range(-0.1..0.1));
            effects.particle(Particle::new(
                self.position,
                velocity,
                ParticleConfig {
                    color: ColorSpec::Ramp(DEATH_RAMP.to_vec()),
                    lifespan: 50,
                    ..default()
                },
            ));
            let scatter = Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            effects.push(Effect::Loot(LootDrop {
                kind: LootKind::GremlinBlood,
                position: self.position + scatter,
            }));
        }
    }

    /// Body contact hurts the player a little every tick it lasts.
    pub(super) fn collide_with_player(&self, player: &mut PlayerState) {
        if overlaps(self.bounds(), player.bounds()) {
            player.health -= self.config.contact_damage;
            player.acceleration +=
                Vec2::from_angle(self.angle_to_player) * self.config.contact_knockback;
        }
    }
}
