//! Frame-level telemetry: frame time and live gremlin count.

use bevy::prelude::*;
use micromegas_tracing::prelude::{fmetric, imetric, span_scope};

use crate::gremlin::Gremlin;
use crate::resources::EncounterStats;

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Last, frame_telemetry);
    }
}

fn frame_telemetry(
    time: Res<Time>,
    mut stats: ResMut<EncounterStats>,
    gremlins: Query<&Gremlin>,
) {
    span_scope!("frame");
    let dt_ms = time.delta_secs_f64() * 1000.0;
    fmetric!("frame_time_ms", "ms", dt_ms);

    let alive = gremlins.iter().filter(|g| g.alive).count() as u64;
    imetric!("gremlins_alive", "count", alive);
    stats.frames += 1;
}
