//! Seek with raycast obstacle avoidance.
//!
//! A blocked straight line is answered by trying a heading rotated by the
//! avoidance angle, left (counter-bearing) first, then right. If both probes
//! are blocked too, the direct heading is kept and the entity may stall
//! against the wall until geometry or the target changes.

use bevy::prelude::*;

use super::{bearing, ray_blocked, seek};
use crate::plugins::tilemap::TileMap;

/// Which heading the steering step settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Direct,
    DeflectedLeft,
    DeflectedRight,
    /// Every probe was blocked; the direct heading is kept anyway.
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub acceleration: Vec2,
    pub heading: Heading,
}

/// Compute the acceleration toward `target`. Deflection probes reach
/// `speed` units along the rotated heading.
/// Returns None when `position == target`.
pub fn steer(
    map: &dyn TileMap,
    position: Vec2,
    target: Vec2,
    speed: f32,
    avoidance_angle: f32,
) -> Option<Steering> {
    let direct = seek(position, target, speed)?;
    if !ray_blocked(map, position, target) {
        return Some(Steering {
            acceleration: direct,
            heading: Heading::Direct,
        });
    }

    let base = bearing(position, target);
    let candidates = [
        (base - avoidance_angle, Heading::DeflectedLeft),
        (base + avoidance_angle, Heading::DeflectedRight),
    ];
    for (angle, heading) in candidates {
        let dir = Vec2::from_angle(angle);
        if !ray_blocked(map, position, position + dir * speed) {
            return Some(Steering {
                acceleration: dir * speed,
                heading,
            });
        }
    }

    Some(Steering {
        acceleration: direct,
        heading: Heading::Stalled,
    })
}
