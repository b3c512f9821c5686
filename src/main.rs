use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::tasks::{ComputeTaskPool, TaskPoolBuilder};
use micromegas_telemetry_sink::TelemetryGuardBuilder;
use micromegas_tracing::dispatch::{flush_thread_buffer, init_thread_stream, unregister_thread_stream};
use micromegas_tracing::prelude::*;
use micromegas_tracing::prelude::{error, info};

use gremlins::GremlinPlugin;
use gremlins::gremlin::Gremlin;
use gremlins::plugins::gremlins::{GremlinSet, purge_dead_gremlins, spawn_gremlin};
use gremlins::plugins::tilemap::TileGrid;
use gremlins::resources::{
    Altar, EncounterStats, GremlinConfig, PlayerState, Room, RoomId, Rooms, Torch,
};

/// 40x24 tiles: an outer wall, a pillar block and a partition with a gap.
const ARENA: &str = "\
########################################
#......................................#
#......................................#
#..............#.......................#
#..............#.......................#
#..............#..........####.........#
#..............#..........####.........#
#..............#.......................#
#..............#.......................#
#......................................#
#......................................#
#..............#.......................#
#..............#.......................#
#..............#.......................#
#..............#.......................#
#..............#.......................#
#..............#.......................#
#......................................#
#......................................#
#......................................#
#......................................#
#......................................#
#......................................#
########################################";

const FRAME_LIMIT: u64 = 900;
const PLAYER_DRAG: f32 = 0.8;
const SWING_PERIOD: u64 = 45;
const SWING_FRAMES: u64 = 6;
const SWING_REACH: f32 = 16.0;

fn main() {
    // Spans need MICROMEGAS_ENABLE_CPU_TRACING=true; logs and metrics always flow.
    let _telemetry_guard = TelemetryGuardBuilder::default()
        .with_install_tracing_capture(true)
        .build()
        .expect("failed to initialize telemetry");

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("{}", e);
                return;
            }
        },
        None => GremlinConfig::default(),
    };
    let map = match TileGrid::parse(ARENA) {
        Ok(map) => map,
        Err(e) => {
            error!("arena: {}", e);
            return;
        }
    };

    info!("gremlin demo starting: {} frames", FRAME_LIMIT);

    // Worker threads need their own Micromegas streams before Bevy starts.
    ComputeTaskPool::get_or_init(|| {
        TaskPoolBuilder::new()
            .on_thread_spawn(|| {
                init_thread_stream();
            })
            .on_thread_destroy(|| {
                flush_thread_buffer();
                unregister_thread_stream();
            })
            .build()
    });

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(16))))
        .add_plugins(StatesPlugin)
        .add_plugins(GremlinPlugin)
        .insert_resource(config)
        .insert_resource(map)
        .insert_resource(PlayerState::new(Vec2::new(200.0, 90.0), RoomId(1)))
        .insert_resource(demo_rooms())
        .add_systems(Startup, spawn_pack)
        .add_systems(Update, drive_player.before(GremlinSet::Behavior))
        .add_systems(Update, purge_dead_gremlins.after(GremlinSet::Behavior))
        .add_systems(Last, finish_demo)
        .run();
}

fn load_config(path: &str) -> Result<GremlinConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read gremlin config {}: {}", path, e))?;
    GremlinConfig::from_json(&text)
}

fn demo_rooms() -> Rooms {
    Rooms::new(vec![
        Room::new(RoomId(1)),
        Room::new(RoomId(2)).with_altar(Altar {
            consecrated: false,
            torches: vec![
                Torch::new(Vec2::new(240.0, 140.0), 30),
                Torch::new(Vec2::new(280.0, 160.0), 30),
            ],
        }),
    ])
}

#[span_fn]
fn spawn_pack(mut commands: Commands, config: Res<GremlinConfig>) {
    let spawns = [
        Vec2::new(40.0, 40.0),
        Vec2::new(56.0, 48.0),
        Vec2::new(40.0, 150.0),
        Vec2::new(300.0, 40.0),
        Vec2::new(290.0, 160.0),
    ];
    for position in spawns {
        spawn_gremlin(&mut commands, position, &config);
    }
    info!("spawned {} gremlins", spawns.len());
}

/// Scripted stand-in for a player: circles the arena, swings periodically
/// and walks into the altar room for the second half of the run.
#[span_fn]
fn drive_player(mut player: ResMut<PlayerState>, stats: Res<EncounterStats>) {
    let frame = stats.frames;
    let angle = frame as f32 * 0.01;
    let orbit = Vec2::new(200.0, 100.0) + Vec2::new(angle.cos(), angle.sin()) * 60.0;
    let drift = orbit - player.position;
    player.acceleration += drift.clamp_length_max(0.5);

    let acceleration = player.acceleration;
    player.velocity += acceleration;
    player.velocity *= PLAYER_DRAG;
    let velocity = player.velocity;
    player.position += velocity;
    player.acceleration = Vec2::ZERO;

    let room = if frame < FRAME_LIMIT / 2 { RoomId(1) } else { RoomId(2) };
    if room != player.current_room {
        info!("player entered room {:?}", room);
        player.current_room = room;
    }

    player.is_attacking = frame % SWING_PERIOD < SWING_FRAMES;
    player.attack_box = if player.is_attacking {
        let center = player.position + player.size / 2.0;
        Rect::from_center_half_size(center, Vec2::splat(SWING_REACH))
    } else {
        Rect::default()
    };
}

fn finish_demo(
    stats: Res<EncounterStats>,
    player: Res<PlayerState>,
    gremlins: Query<&Gremlin>,
    mut exit: MessageWriter<AppExit>,
) {
    if stats.frames < FRAME_LIMIT {
        return;
    }
    info!(
        "demo finished: frames={} kills={} gremlins_left={} player_health={}",
        stats.frames,
        stats.kills,
        gremlins.iter().filter(|g| g.alive).count(),
        player.health
    );
    exit.write(AppExit::Success);
}
