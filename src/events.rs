//! Events triggered by gremlin behavior and observed by audio/telemetry.

use bevy::prelude::*;

/// Fire-and-forget audio cue.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Footstep,
    GremlinHurt,
    PlayerHurt,
    TorchExtinguished,
}

/// A gremlin crossed from alive to dead this frame.
#[derive(Event, Debug, Clone, Copy)]
pub struct GremlinKilled {
    pub entity: Entity,
    pub position: Vec2,
}
