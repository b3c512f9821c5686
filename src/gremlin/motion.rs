//! Integration: acceleration into velocity into position, one axis at a time.

use bevy::prelude::*;

use super::Gremlin;
use crate::ai::separation::{Peer, separation};
use crate::plugins::tilemap::TileMap;

impl Gremlin {
    /// Layer separation and pending knockback on top of the steering
    /// acceleration, then move. A blocked axis snaps back to the tick's
    /// starting coordinate and loses its velocity; the other axis still moves.
    pub(super) fn integrate(&mut self, map: &dyn TileMap, peers: &[Peer]) {
        self.acceleration += separation(
            self.position,
            self.velocity,
            peers,
            self.config.separation_distance,
            self.config.max_speed,
        );
        self.acceleration += std::mem::take(&mut self.knockback);

        self.velocity += self.acceleration;
        self.velocity *= self.config.drag;

        self.position.x += self.velocity.x;
        if map.is_blocked(self.bounds()) {
            self.position.x = self.previous_position.x;
            self.velocity.x = 0.0;
        }

        self.position.y += self.velocity.y;
        if map.is_blocked(self.bounds()) {
            self.position.y = self.previous_position.y;
            self.velocity.y = 0.0;
        }
    }
}
