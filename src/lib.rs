pub mod ai;
pub mod app_state;
pub mod components;
pub mod effects;
pub mod events;
pub mod gremlin;
pub mod plugins;
pub mod resources;
pub mod rig;

use bevy::prelude::*;

use app_state::SimulationState;
use plugins::gremlins::GremlinBehaviorPlugin;
use plugins::particles::ParticlePlugin;
use plugins::telemetry::TelemetryPlugin;
use resources::{EncounterRng, EncounterStats, GremlinConfig, Viewport};

/// Gremlin simulation: behavior tick, particles and telemetry.
///
/// The host provides `StatesPlugin` (part of `DefaultPlugins`) and the
/// world resources gremlins act on: `TileGrid`, `PlayerState` and `Rooms`.
/// Audio is separate, see `plugins::audio::GremlinAudioPlugin`.
pub struct GremlinPlugin;

impl Plugin for GremlinPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SimulationState>();

        app.init_resource::<GremlinConfig>();
        app.init_resource::<EncounterRng>();
        app.init_resource::<EncounterStats>();
        app.init_resource::<Viewport>();

        app.add_plugins(GremlinBehaviorPlugin);
        app.add_plugins(ParticlePlugin);
        app.add_plugins(TelemetryPlugin);
    }
}
