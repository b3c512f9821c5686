//! Perception: decide whether a gremlin chases the player or a torch.

use bevy::prelude::*;

use crate::resources::{PlayerState, Rooms};

/// What a gremlin is currently pursuing, always resolved to a world point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Player(Vec2),
    Torch(Vec2),
}

impl Target {
    pub fn point(&self) -> Vec2 {
        match *self {
            Target::Player(p) | Target::Torch(p) => p,
        }
    }

    pub fn is_torch(&self) -> bool {
        matches!(self, Target::Torch(_))
    }
}

/// Nearest lit torch (measured from `position`) on the unconsecrated altar
/// of the player's room, or the player when there is none.
/// The first torch in altar order wins distance ties.
pub fn select_target(position: Vec2, player: &PlayerState, rooms: &Rooms) -> Target {
    let nearest_torch = rooms
        .get(player.current_room)
        .and_then(|room| room.unconsecrated_altar())
        .and_then(|altar| {
            let mut best: Option<(Vec2, f32)> = None;
            for torch in altar.torches.iter().filter(|t| t.is_lit()) {
                let distance = position.distance(torch.position);
                if best.is_none_or(|(_, d)| distance < d) {
                    best = Some((torch.position, distance));
                }
            }
            best
        });

    match nearest_torch {
        Some((point, _)) => Target::Torch(point),
        None => Target::Player(player.position),
    }
}
