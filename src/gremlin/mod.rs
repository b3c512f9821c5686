//! The gremlin actor: perception, steering, attack cycle, combat and legs.
//!
//! A `Gremlin` is plain data driven by [`Gremlin::update`], one call per
//! simulation frame. Everything it reads or mutates outside itself comes in
//! through a [`TickContext`], so the same code runs under the Bevy host
//! system and in unit tests with a hand-built world.

mod attack;
mod combat;
mod legs;
mod motion;

#[cfg(test)]
pub(crate) mod test_support;

use std::time::Duration;

use bevy::prelude::*;
use rand::RngCore;

pub use attack::AttackPhase;
pub use legs::Legs;

use crate::ai::avoidance;
use crate::ai::bearing;
use crate::ai::separation::Peer;
use crate::ai::targeting::{Target, select_target};
use crate::components::Facing;
use crate::effects::Effects;
use crate::plugins::tilemap::TileMap;
use crate::resources::{GremlinConfig, PlayerState, RoomId, Rooms};

/// Everything outside the gremlin that one tick may read or touch.
pub struct TickContext<'a> {
    /// Monotonic time shared by every gremlin in the frame.
    pub now: Duration,
    pub player: &'a mut PlayerState,
    pub rooms: &'a mut Rooms,
    pub map: &'a dyn TileMap,
    /// Snapshot of all gremlins, this one included.
    pub peers: &'a [Peer],
    pub effects: &'a mut Effects,
    pub rng: &'a mut dyn RngCore,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Gremlin {
    pub position: Vec2,
    /// Position at the start of the last moving tick; collision rolls back to it.
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub health: i32,
    pub alive: bool,
    pub facing: Facing,
    pub target: Target,
    /// Bearing from the gremlin to the player, refreshed every live tick.
    pub angle_to_player: f32,
    pub current_room: Option<RoomId>,
    /// Telegraphed strike area; empty outside a telegraph.
    pub attack_box: Rect,
    pub config: GremlinConfig,
    phase: AttackPhase,
    last_attack_at: Option<Duration>,
    /// Hit impulse waiting for the next integration step.
    knockback: Vec2,
    legs: Legs,
}

impl Gremlin {
    pub fn new(position: Vec2, config: GremlinConfig) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            health: config.health,
            alive: true,
            facing: Facing::default(),
            target: Target::Player(position),
            angle_to_player: 0.0,
            current_room: None,
            attack_box: Rect::default(),
            phase: AttackPhase::Idle,
            last_attack_at: None,
            knockback: Vec2::ZERO,
            legs: Legs::new(position, &config),
            config,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.config.size())
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.config.size() / 2.0
    }

    pub fn peer(&self) -> Peer {
        Peer {
            position: self.position,
            alive: self.alive,
        }
    }

    pub fn legs(&self) -> &Legs {
        &self.legs
    }

    /// Advance one simulation frame.
    pub fn update(&mut self, ctx: &mut TickContext) {
        if !self.alive {
            return;
        }

        self.angle_to_player = bearing(self.position, ctx.player.position);
        let left_torch_room = self.track_room(ctx.player);

        self.receive_attack(ctx);
        if !self.alive {
            return;
        }

        if let AttackPhase::Telegraphing { started_at } = self.phase {
            if ctx.now.saturating_sub(started_at) >= self.config.attack_telegraph() {
                self.perform_attack(ctx);
            }
            return;
        }

        self.previous_position = self.position;

        self.target = if left_torch_room {
            Target::Player(ctx.player.position)
        } else {
            select_target(self.position, ctx.player, ctx.rooms)
        };

        if let Some(steering) = avoidance::steer(
            ctx.map,
            self.position,
            self.target.point(),
            self.config.speed,
            self.config.avoidance_angle,
        ) {
            self.acceleration = steering.acceleration;
        }

        if let Some(facing) = Facing::from_velocity(self.velocity) {
            self.facing = facing;
        }
        self.legs
            .step(self.position, self.facing, &self.config, ctx.effects);

        if self.can_start_attack(ctx.now) {
            self.start_telegraph(ctx.now);
        } else {
            self.wander(ctx.rng);
        }

        self.collide_with_player(ctx.player);
        self.integrate(ctx.map, ctx.peers);
    }

    /// Follow the player into a new room. Returns true when a torch target
    /// had to be dropped, in which case this tick chases the player.
    fn track_room(&mut self, player: &PlayerState) -> bool {
        if self.current_room == Some(player.current_room) {
            return false;
        }
        let was_torch = self.target.is_torch();
        if was_torch {
            self.target = Target::Player(player.position);
        }
        self.current_room = Some(player.current_room);
        was_torch
    }
}
