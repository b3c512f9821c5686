//! Attack cycle: idle, telegraph, strike, cooldown.

use std::time::Duration;

use bevy::prelude::*;
use micromegas_tracing::prelude::*;
use micromegas_tracing::prelude::{debug, info};
use rand::{Rng, RngCore};

use super::{Gremlin, TickContext};
use crate::ai::targeting::Target;
use crate::effects::Effects;
use crate::events::SoundCue;
use crate::plugins::particles::{ColorSpec, Particle, ParticleConfig, Perturbation};

const IMPACT_RAMP: [u8; 9] = [22, 8, 7, 6, 5, 4, 3, 2, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackPhase {
    #[default]
    Idle,
    /// Winding up; nothing but hit detection runs until the telegraph ends.
    Telegraphing { started_at: Duration },
}

impl Gremlin {
    pub fn is_attacking(&self) -> bool {
        matches!(self.phase, AttackPhase::Telegraphing { .. })
    }

    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub fn telegraph_started_at(&self) -> Option<Duration> {
        match self.phase {
            AttackPhase::Telegraphing { started_at } => Some(started_at),
            AttackPhase::Idle => None,
        }
    }

    /// When the last strike resolved. None until the first one.
    pub fn last_attack_at(&self) -> Option<Duration> {
        self.last_attack_at
    }

    pub(super) fn can_start_attack(&self, now: Duration) -> bool {
        let in_range = self.position.distance(self.target.point()) <= self.config.attack_range;
        let cooled_down = self
            .last_attack_at
            .is_none_or(|at| now.saturating_sub(at) >= self.config.attack_cooldown());
        in_range && cooled_down
    }

    pub(super) fn start_telegraph(&mut self, now: Duration) {
        self.phase = AttackPhase::Telegraphing { started_at: now };
        self.acceleration = Vec2::ZERO;
        self.attack_box =
            Rect::from_center_size(self.center(), Vec2::splat(self.config.attack_range * 2.0));
        debug!(
            "gremlin telegraph: pos=({:.1}, {:.1}) target={:?}",
            self.position.x, self.position.y, self.target
        );
    }

    /// Resolve the strike against whatever was targeted when the telegraph
    /// began. A dodged or missing target still consumes the cooldown.
    pub(super) fn perform_attack(&mut self, ctx: &mut TickContext) {
        span_scope!("gremlin_attack");
        self.phase = AttackPhase::Idle;
        self.attack_box = Rect::default();
        self.last_attack_at = Some(ctx.now);

        match self.target {
            Target::Player(_) => {
                let player = &mut *ctx.player;
                if player.is_attacking
                    || self.position.distance(player.position) > self.config.attack_range
                {
                    debug!("gremlin attack missed the player");
                    return;
                }
                player.health -= self.config.attack_damage;
                player.acceleration +=
                    Vec2::from_angle(self.angle_to_player) * self.config.attack_knockback;
                ctx.effects.sound(SoundCue::PlayerHurt);
                emit_impact_burst(
                    player.position,
                    self.config.impact_particles,
                    ctx.effects,
                    ctx.rng,
                );
                debug!("gremlin hit player: health={}", player.health);
            }
            Target::Torch(point) => {
                let torch = ctx
                    .rooms
                    .get_mut(ctx.player.current_room)
                    .and_then(|room| room.altar.as_mut())
                    .and_then(|altar| altar.torches.iter_mut().find(|t| t.position == point));
                let Some(torch) = torch else {
                    debug!("gremlin attack found no torch at ({}, {})", point.x, point.y);
                    return;
                };
                let was_lit = torch.is_lit();
                torch.health -= self.config.attack_damage;
                if was_lit && !torch.is_lit() {
                    info!("torch extinguished at ({}, {})", point.x, point.y);
                    ctx.effects.sound(SoundCue::TorchExtinguished);
                }
            }
        }
    }

    /// Occasional random nudge so idle gremlins never stand perfectly still.
    pub(super) fn wander(&mut self, rng: &mut dyn RngCore) {
        let chance = self.config.wander_chance;
        if chance > 0.0 && rng.gen_bool(chance.min(1.0)) {
            let speed = self.config.speed;
            self.acceleration = Vec2::new(
                rng.gen_range(-0.5f32..0.5) * speed,
                rng.gen_range(-0.5f32..0.5) * speed,
            );
        }
    }
}

fn emit_impact_burst(at: Vec2, count: usize, effects: &mut Effects, rng: &mut dyn RngCore) {
    for _ in 0..count {
        let position = at + Vec2::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.0..2.0));
        let velocity = Vec2::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5));
        effects.particle(Particle::new(
            position,
            velocity,
            ParticleConfig {
                color: ColorSpec::Ramp(IMPACT_RAMP.to_vec()),
                lifespan: 100,
                perturbation: Perturbation::Jitter { amount: 0.3 },
                ..default()
            },
        ));
    }
}
