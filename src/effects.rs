//! Effect sink handed to gremlins during a tick.
//!
//! Behavior code never touches the world directly for visuals or audio; it
//! pushes effects here and the host flushes them after all gremlins ran.

use bevy::prelude::*;

use crate::components::{Explosion, LootDrop};
use crate::events::SoundCue;
use crate::plugins::particles::Particle;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Particle(Particle),
    Explosion(Explosion),
    Loot(LootDrop),
    Sound(SoundCue),
}

#[derive(Debug, Default)]
pub struct Effects {
    queue: Vec<Effect>,
}

impl Effects {
    pub fn push(&mut self, effect: Effect) {
        self.queue.push(effect);
    }

    pub fn particle(&mut self, particle: Particle) {
        self.push(Effect::Particle(particle));
    }

    pub fn sound(&mut self, cue: SoundCue) {
        self.push(Effect::Sound(cue));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.queue.iter()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Effect> + '_ {
        self.queue.drain(..)
    }

    pub fn count_sounds(&self, cue: SoundCue) -> usize {
        self.iter()
            .filter(|e| matches!(e, Effect::Sound(c) if *c == cue))
            .count()
    }

    pub fn count_particles(&self) -> usize {
        self.iter().filter(|e| matches!(e, Effect::Particle(_))).count()
    }

    pub fn count_explosions(&self) -> usize {
        self.iter().filter(|e| matches!(e, Effect::Explosion(_))).count()
    }

    pub fn count_loot(&self) -> usize {
        self.iter().filter(|e| matches!(e, Effect::Loot(_))).count()
    }

    /// Spawn queued visuals as entities and trigger queued sound cues.
    pub fn flush(&mut self, commands: &mut Commands) {
        for effect in self.drain() {
            match effect {
                Effect::Particle(particle) => {
                    commands.spawn(particle);
                }
                Effect::Explosion(explosion) => {
                    commands.spawn(explosion);
                }
                Effect::Loot(drop) => {
                    commands.spawn(drop);
                }
                Effect::Sound(cue) => commands.trigger(cue),
            }
        }
    }
}
