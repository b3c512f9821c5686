//! Short-lived visual particles and explosion effects.
//!
//! Particles are emitted by gremlin behavior through `Effects` and spawned
//! as entities when the tick system flushes. They advance once per frame
//! and despawn when their life runs out or they leave the `Viewport`.

use bevy::prelude::*;
use micromegas_tracing::prelude::*;
use rand::{Rng, RngCore};

use crate::app_state::SimulationState;
use crate::components::{Explosion, LootDrop, LootKind};
use crate::plugins::gremlins::GremlinSet;
use crate::resources::{EncounterRng, Viewport};

pub struct ParticlePlugin;

impl Plugin for ParticlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (update_particles, update_explosions)
                .in_set(GremlinSet::Effects)
                .run_if(in_state(SimulationState::Running)),
        );
    }
}

// ---------------------------------------------------------------------------
// Emission config
// ---------------------------------------------------------------------------

/// Either a fixed palette index or a ramp sampled by consumed life.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Solid(u8),
    Ramp(Vec<u8>),
}

/// Per-tick velocity perturbation, chosen at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Perturbation {
    #[default]
    None,
    /// Add a uniform random offset in `[-amount/2, amount/2)` to each
    /// velocity axis every tick.
    Jitter { amount: f32 },
}

const DEFAULT_COLOR: u8 = 22;

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub color: ColorSpec,
    pub lifespan: u32,
    pub drop: Option<LootKind>,
    pub drop_chance: f64,
    pub perturbation: Perturbation,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            color: ColorSpec::Solid(DEFAULT_COLOR),
            lifespan: 100,
            drop: None,
            drop_chance: 0.0,
            perturbation: Perturbation::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Particle
// ---------------------------------------------------------------------------

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub color: u8,
    pub life: u32,
    pub max_life: u32,
    pub alive: bool,
    ramp: Option<Vec<u8>>,
    drop: Option<LootKind>,
    drop_chance: f64,
    perturbation: Perturbation,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, config: ParticleConfig) -> Self {
        let (color, ramp) = match config.color {
            ColorSpec::Solid(c) => (c, None),
            // An empty ramp has nothing to sample; treat it as the default solid color.
            ColorSpec::Ramp(ramp) if ramp.is_empty() => (DEFAULT_COLOR, None),
            ColorSpec::Ramp(ramp) => (ramp[0], Some(ramp)),
        };
        let life = config.lifespan.max(1);
        Self {
            position,
            previous_position: position,
            velocity,
            color,
            life,
            max_life: life,
            alive: true,
            ramp,
            drop: config.drop,
            drop_chance: config.drop_chance,
            perturbation: config.perturbation,
        }
    }

    /// Advance one tick. Returns a loot drop if the particle expired and
    /// rolled its drop chance.
    pub fn update(&mut self, viewport: Rect, rng: &mut dyn RngCore) -> Option<LootDrop> {
        if !self.alive {
            return None;
        }
        self.previous_position = self.position;
        if !viewport.contains(self.position) {
            self.alive = false;
            return None;
        }

        self.position += self.velocity;
        if let Perturbation::Jitter { amount } = self.perturbation {
            self.velocity.x += rng.gen_range(-0.5f32..0.5) * amount;
            self.velocity.y += rng.gen_range(-0.5f32..0.5) * amount;
        }
        self.life = self.life.saturating_sub(1);

        if let Some(ramp) = &self.ramp {
            let consumed = 1.0 - self.life as f32 / self.max_life as f32;
            let index = (consumed * (ramp.len() - 1) as f32).floor() as usize;
            self.color = ramp[index.min(ramp.len() - 1)];
        }

        if !viewport.contains(self.position) {
            self.alive = false;
            return None;
        }
        if self.life == 0 {
            self.alive = false;
            if let Some(kind) = self.drop {
                if self.drop_chance > 0.0 && rng.gen_bool(self.drop_chance.min(1.0)) {
                    return Some(LootDrop {
                        kind,
                        position: self.position,
                    });
                }
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

#[span_fn]
fn update_particles(
    mut commands: Commands,
    viewport: Res<Viewport>,
    mut rng: ResMut<EncounterRng>,
    mut query: Query<(Entity, &mut Particle)>,
) {
    for (entity, mut particle) in &mut query {
        if let Some(drop) = particle.update(viewport.0, &mut rng.0) {
            commands.spawn(drop);
        }
        if !particle.alive {
            commands.entity(entity).despawn();
        }
    }
}

fn update_explosions(mut commands: Commands, mut query: Query<(Entity, &mut Explosion)>) {
    for (entity, mut explosion) in &mut query {
        explosion.ttl = explosion.ttl.saturating_sub(1);
        if explosion.ttl == 0 {
            commands.entity(entity).despawn();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEW: Rect = Rect {
        min: Vec2::new(0.0, 0.0),
        max: Vec2::new(100.0, 100.0),
    };

    fn ramp_config() -> ParticleConfig {
        ParticleConfig {
            color: ColorSpec::Ramp(vec![22, 8, 7, 6, 5, 4, 3, 2, 1]),
            lifespan: 100,
            ..default()
        }
    }

    #[test]
    fn defaults_match_emission_contract() {
        let p = Particle::new(Vec2::ONE, Vec2::ZERO, ParticleConfig::default());
        assert_eq!(p.color, 22);
        assert_eq!(p.life, 100);
        assert!(p.alive);
    }

    #[test]
    fn moves_by_velocity_and_tracks_previous() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, -0.5), ParticleConfig::default());
        p.update(VIEW, &mut rng);
        assert_eq!(p.previous_position, Vec2::new(10.0, 10.0));
        assert_eq!(p.position, Vec2::new(11.0, 9.5));
        assert_eq!(p.life, 99);
    }

    #[test]
    fn ramp_is_sampled_by_consumed_life() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, ramp_config());
        assert_eq!(p.color, 22);
        p.update(VIEW, &mut rng);
        assert_eq!(p.color, 22);
        for _ in 0..49 {
            p.update(VIEW, &mut rng);
        }
        // Half the life consumed: floor(0.5 * 8) = 4
        assert_eq!(p.life, 50);
        assert_eq!(p.color, 5);
    }

    #[test]
    fn empty_ramp_keeps_fallback_color() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ParticleConfig {
            color: ColorSpec::Ramp(Vec::new()),
            lifespan: 4,
            ..default()
        };
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, config);
        assert_eq!(p.color, 22);
        for _ in 0..4 {
            p.update(VIEW, &mut rng);
            assert_eq!(p.color, 22);
        }
        assert!(!p.alive);
    }

    #[test]
    fn dies_when_life_runs_out() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ParticleConfig {
            lifespan: 3,
            ..default()
        };
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, config);
        p.update(VIEW, &mut rng);
        p.update(VIEW, &mut rng);
        assert!(p.alive);
        p.update(VIEW, &mut rng);
        assert!(!p.alive);
    }

    #[test]
    fn dies_when_leaving_viewport() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::new(Vec2::new(99.5, 50.0), Vec2::new(2.0, 0.0), ParticleConfig::default());
        p.update(VIEW, &mut rng);
        assert!(!p.alive);
        assert_eq!(p.life, 99);
    }

    #[test]
    fn jitter_perturbs_velocity_within_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let config = ParticleConfig {
            perturbation: Perturbation::Jitter { amount: 0.3 },
            ..default()
        };
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, config);
        p.update(VIEW, &mut rng);
        assert!(p.velocity.x.abs() <= 0.15);
        assert!(p.velocity.y.abs() <= 0.15);
        assert_ne!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn certain_drop_is_emitted_on_expiry() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = ParticleConfig {
            lifespan: 1,
            drop: Some(LootKind::GremlinBlood),
            drop_chance: 1.0,
            ..default()
        };
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ZERO, config);
        let drop = p.update(VIEW, &mut rng);
        assert_eq!(
            drop,
            Some(LootDrop {
                kind: LootKind::GremlinBlood,
                position: Vec2::new(50.0, 50.0),
            })
        );
    }

    #[test]
    fn dead_particle_is_inert() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::ONE, ParticleConfig::default());
        p.alive = false;
        let before = p.clone();
        p.update(VIEW, &mut rng);
        assert_eq!(p, before);
    }
}
