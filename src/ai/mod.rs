//! Steering primitives shared by gremlin behavior: seek, line-of-sight
//! raycasting, obstacle avoidance, target selection and separation.

pub mod avoidance;
pub mod separation;
pub mod targeting;

use bevy::prelude::*;
use bresenham::Bresenham;

use crate::plugins::tilemap::TileMap;

/// Acceleration of magnitude `speed` from `from` toward `to`.
/// None when the two points coincide, so callers keep their current value.
pub fn seek(from: Vec2, to: Vec2, speed: f32) -> Option<Vec2> {
    let offset = to - from;
    let distance = offset.length();
    if distance > 0.0 {
        Some(offset / distance * speed)
    } else {
        None
    }
}

/// Bearing from `from` to `to` in radians.
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let offset = to - from;
    offset.y.atan2(offset.x)
}

/// Walk the grid line from `from` to `to` (both rounded to whole units)
/// and report whether any visited point is solid. The end point is checked.
pub fn ray_blocked(map: &dyn TileMap, from: Vec2, to: Vec2) -> bool {
    let start = (from.x.round() as isize, from.y.round() as isize);
    let end = (to.x.round() as isize, to.y.round() as isize);

    Bresenham::new(start, end)
        .chain(std::iter::once(end))
        .any(|(x, y)| map.is_point_blocked(Vec2::new(x as f32, y as f32)))
}
