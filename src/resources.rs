use std::ops::RangeInclusive;
use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Gremlin config
// ---------------------------------------------------------------------------

/// Tunables shared by every gremlin spawned in an encounter.
/// Each gremlin keeps its own copy, so changing the resource only
/// affects gremlins spawned afterwards.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GremlinConfig {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub speed: f32,
    pub max_speed: f32,
    pub drag: f32,

    pub attack_range: f32,
    pub attack_cooldown_ms: u64,
    pub attack_telegraph_ms: u64,
    pub attack_damage: i32,
    pub attack_knockback: f32,
    pub contact_damage: i32,
    pub contact_knockback: f32,
    pub hit_knockback: f32,

    pub separation_distance: f32,
    pub avoidance_angle: f32,
    pub wander_chance: f64,

    pub step_distance: f32,
    pub leg_step_offset: u32,
    pub leg_reach: f32,
    pub leg_drop: f32,
    pub leg_segments: usize,
    pub leg_segment_length: f32,

    pub impact_particles: usize,
    pub death_drops_min: usize,
    pub death_drops_max: usize,
}

impl Default for GremlinConfig {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 10.0,
            health: 30,
            speed: 0.25,
            max_speed: 0.3,
            drag: 0.8,

            attack_range: 30.0,
            attack_cooldown_ms: 1000,
            attack_telegraph_ms: 500,
            attack_damage: 10,
            attack_knockback: 6.0,
            contact_damage: 1,
            contact_knockback: 4.0,
            hit_knockback: 12.0,

            separation_distance: 20.0,
            avoidance_angle: 0.1,
            wander_chance: 0.1,

            step_distance: 30.0,
            leg_step_offset: 15,
            leg_reach: 12.0,
            leg_drop: 6.0,
            leg_segments: 3,
            leg_segment_length: 6.0,

            impact_particles: 100,
            death_drops_min: 2,
            death_drops_max: 5,
        }
    }
}

impl GremlinConfig {
    /// Parse a JSON config. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: GremlinConfig =
            serde_json::from_str(text).map_err(|e| format!("Failed to parse gremlin config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(format!(
                "Gremlin size must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.speed <= 0.0 || self.max_speed <= 0.0 {
            return Err("Gremlin speed and max_speed must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.drag) {
            return Err(format!("Drag must be within [0, 1], got {}", self.drag));
        }
        if !(0.0..=1.0).contains(&self.wander_chance) {
            return Err(format!(
                "Wander chance must be within [0, 1], got {}",
                self.wander_chance
            ));
        }
        if self.death_drops_min > self.death_drops_max {
            return Err(format!(
                "Death drop range is empty: {}..={}",
                self.death_drops_min, self.death_drops_max
            ));
        }
        if self.leg_segments == 0 {
            return Err("Legs need at least one segment".to_string());
        }
        Ok(())
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn attack_cooldown(&self) -> Duration {
        Duration::from_millis(self.attack_cooldown_ms)
    }

    pub fn attack_telegraph(&self) -> Duration {
        Duration::from_millis(self.attack_telegraph_ms)
    }

    /// An inverted range collapses to the minimum.
    pub fn death_drops(&self) -> RangeInclusive<usize> {
        self.death_drops_min..=self.death_drops_max.max(self.death_drops_min)
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The slice of player state gremlins read and push on.
/// Owned by the host; gremlins only touch health and acceleration.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub health: i32,
    /// True while the player's own attack is active.
    pub is_attacking: bool,
    pub attack_box: Rect,
    pub attack_damage: i32,
    pub current_room: RoomId,
}

impl PlayerState {
    pub fn new(position: Vec2, room: RoomId) -> Self {
        Self {
            position,
            size: Vec2::new(8.0, 8.0),
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            health: 100,
            is_attacking: false,
            attack_box: Rect::default(),
            attack_damage: 10,
            current_room: room,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }
}

// ---------------------------------------------------------------------------
// Rooms, altars and torches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Torch {
    pub position: Vec2,
    pub health: i32,
}

impl Torch {
    pub fn new(position: Vec2, health: i32) -> Self {
        Self { position, health }
    }

    pub fn is_lit(&self) -> bool {
        self.health > 0
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Altar {
    pub consecrated: bool,
    pub torches: Vec<Torch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub altar: Option<Altar>,
}

impl Room {
    pub fn new(id: RoomId) -> Self {
        Self { id, altar: None }
    }

    pub fn with_altar(mut self, altar: Altar) -> Self {
        self.altar = Some(altar);
        self
    }

    /// The altar, if present and still waiting to be consecrated.
    pub fn unconsecrated_altar(&self) -> Option<&Altar> {
        self.altar.as_ref().filter(|a| !a.consecrated)
    }
}

/// All rooms of the current level, looked up by id.
#[derive(Resource, Debug, Clone, Default)]
pub struct Rooms {
    rooms: Vec<Room>,
}

impl Rooms {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn insert(&mut self, room: Room) {
        match self.rooms.iter_mut().find(|r| r.id == room.id) {
            Some(existing) => *existing = room,
            None => self.rooms.push(room),
        }
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn get_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.id == id)
    }
}

// ---------------------------------------------------------------------------
// Simulation services
// ---------------------------------------------------------------------------

/// Randomness for wander impulses and effect scatter.
#[derive(Resource)]
pub struct EncounterRng(pub StdRng);

impl Default for EncounterRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl EncounterRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Running totals for the current encounter.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct EncounterStats {
    pub kills: u64,
    pub frames: u64,
}

/// Visible world area. Particles leaving it die.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport(pub Rect);

impl Default for Viewport {
    fn default() -> Self {
        Self(Rect::new(0.0, 0.0, 480.0, 270.0))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
