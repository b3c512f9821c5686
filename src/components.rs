use bevy::prelude::*;

// ---------------------------------------------------------------------------
// Facing
// ---------------------------------------------------------------------------

/// Cardinal facing of a gremlin, derived from its velocity.
/// World Y grows downward (screen space), so `Down` is +Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Classify a velocity by its dominant axis. Ties go vertical.
    /// Returns None for a zero vector so callers keep their previous facing.
    pub fn from_velocity(velocity: Vec2) -> Option<Facing> {
        if velocity == Vec2::ZERO {
            return None;
        }
        let dir = velocity.normalize();
        if dir.x.abs() > dir.y.abs() {
            Some(if dir.x > 0.0 { Facing::Right } else { Facing::Left })
        } else {
            Some(if dir.y > 0.0 { Facing::Down } else { Facing::Up })
        }
    }
}

// ---------------------------------------------------------------------------
// Effect entities
// ---------------------------------------------------------------------------

/// What a loot drop gives the player when collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LootKind {
    GremlinBlood,
}

/// A dropped pickup lying in the world.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct LootDrop {
    pub kind: LootKind,
    pub position: Vec2,
}

/// One-shot burst effect. Lives for `ttl` frames.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub position: Vec2,
    pub radius: f32,
    pub color: u8,
    pub ttl: u32,
}

impl Explosion {
    pub const DEFAULT_TTL: u32 = 30;

    pub fn new(position: Vec2, radius: f32, color: u8) -> Self {
        Self {
            position,
            radius,
            color,
            ttl: Self::DEFAULT_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_follows_dominant_axis() {
        assert_eq!(Facing::from_velocity(Vec2::new(2.0, 1.0)), Some(Facing::Right));
        assert_eq!(Facing::from_velocity(Vec2::new(-2.0, 1.0)), Some(Facing::Left));
        assert_eq!(Facing::from_velocity(Vec2::new(0.5, 3.0)), Some(Facing::Down));
        assert_eq!(Facing::from_velocity(Vec2::new(0.5, -3.0)), Some(Facing::Up));
    }

    #[test]
    fn facing_tie_goes_vertical() {
        assert_eq!(Facing::from_velocity(Vec2::new(1.0, 1.0)), Some(Facing::Down));
        assert_eq!(Facing::from_velocity(Vec2::new(1.0, -1.0)), Some(Facing::Up));
    }

    #[test]
    fn zero_velocity_has_no_facing() {
        assert_eq!(Facing::from_velocity(Vec2::ZERO), None);
    }
}
