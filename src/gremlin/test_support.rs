use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Gremlin, TickContext};
use crate::ai::separation::Peer;
use crate::effects::Effects;
use crate::plugins::tilemap::TileGrid;
use crate::resources::{GremlinConfig, PlayerState, Room, RoomId, Rooms};

/// Hand-built world a single gremlin can be ticked against.
pub(crate) struct World {
    pub map: TileGrid,
    pub player: PlayerState,
    pub rooms: Rooms,
    pub peers: Vec<Peer>,
    pub effects: Effects,
    pub rng: StdRng,
}

impl World {
    /// 512x512 open floor, player parked far away in room 1.
    pub fn open() -> Self {
        Self::with_map(TileGrid::open(64, 64))
    }

    pub fn with_map(map: TileGrid) -> Self {
        Self {
            map,
            player: PlayerState::new(Vec2::new(400.0, 400.0), RoomId(1)),
            rooms: Rooms::new(vec![Room::new(RoomId(1))]),
            peers: Vec::new(),
            effects: Effects::default(),
            rng: StdRng::seed_from_u64(7),
        }
    }

    pub fn tick(&mut self, gremlin: &mut Gremlin, now_ms: u64) {
        let mut ctx = TickContext {
            now: Duration::from_millis(now_ms),
            player: &mut self.player,
            rooms: &mut self.rooms,
            map: &self.map,
            peers: &self.peers,
            effects: &mut self.effects,
            rng: &mut self.rng,
        };
        gremlin.update(&mut ctx);
    }
}

/// Default tuning without random wander impulses.
pub(crate) fn calm_config() -> GremlinConfig {
    GremlinConfig {
        wander_chance: 0.0,
        ..default()
    }
}
