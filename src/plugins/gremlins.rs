//! Gremlin hosting: per-frame behavior tick, spawning, kill bookkeeping.

use bevy::prelude::*;
use micromegas_tracing::prelude::*;
use micromegas_tracing::prelude::debug;

use crate::ai::separation::Peer;
use crate::app_state::SimulationState;
use crate::effects::Effects;
use crate::events::GremlinKilled;
use crate::gremlin::{Gremlin, TickContext};
use crate::plugins::tilemap::TileGrid;
use crate::resources::{EncounterRng, EncounterStats, GremlinConfig, PlayerState, Rooms};

/// Ordering inside `Update`: behavior first, then the effects it spawned.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GremlinSet {
    Behavior,
    Effects,
}

pub struct GremlinBehaviorPlugin;

impl Plugin for GremlinBehaviorPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, (GremlinSet::Behavior, GremlinSet::Effects).chain());
        app.add_systems(
            Update,
            update_gremlins
                .in_set(GremlinSet::Behavior)
                .run_if(in_state(SimulationState::Running)),
        );
    }
}

/// Spawn a gremlin entity at `position` with its own copy of `config`.
pub fn spawn_gremlin(commands: &mut Commands, position: Vec2, config: &GremlinConfig) -> Entity {
    commands
        .spawn((Name::new("Gremlin"), Gremlin::new(position, config.clone())))
        .id()
}

/// Tick every gremlin once against a shared world.
///
/// Gremlins run one after another and each sees the player, torches and
/// peer positions as left by the ones before it. Effects are collected
/// and flushed once everyone has moved.
#[span_fn]
#[allow(clippy::too_many_arguments)]
fn update_gremlins(
    mut commands: Commands,
    time: Res<Time<Real>>,
    player: Option<ResMut<PlayerState>>,
    rooms: Option<ResMut<Rooms>>,
    map: Option<Res<TileGrid>>,
    mut rng: ResMut<EncounterRng>,
    mut stats: ResMut<EncounterStats>,
    mut gremlins: Query<(Entity, &mut Gremlin)>,
) {
    let (Some(mut player), Some(mut rooms), Some(map)) = (player, rooms, map) else {
        return;
    };

    let now = time.elapsed();
    let mut peers: Vec<Peer> = gremlins.iter().map(|(_, g)| g.peer()).collect();
    let mut effects = Effects::default();

    for (index, (entity, mut gremlin)) in gremlins.iter_mut().enumerate() {
        let was_alive = gremlin.alive;
        let mut ctx = TickContext {
            now,
            player: &mut player,
            rooms: &mut rooms,
            map: &*map,
            peers: &peers,
            effects: &mut effects,
            rng: &mut rng.0,
        };
        gremlin.update(&mut ctx);
        peers[index] = gremlin.peer();

        if was_alive && !gremlin.alive {
            stats.kills += 1;
            imetric!("gremlin_kills", "count", stats.kills);
            commands.trigger(GremlinKilled {
                entity,
                position: gremlin.position,
            });
        }
    }

    effects.flush(&mut commands);
}

/// Despawn gremlins that have died. Not scheduled by default; hosts that
/// want corpses cleared add it themselves.
pub fn purge_dead_gremlins(mut commands: Commands, gremlins: Query<(Entity, &Gremlin)>) {
    for (entity, gremlin) in &gremlins {
        if !gremlin.alive {
            debug!("purging dead gremlin {:?}", entity);
            commands.entity(entity).despawn();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
