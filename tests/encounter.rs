//! Headless encounters: the full plugin stack driven with a manual clock.

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use gremlins::GremlinPlugin;
use gremlins::app_state::SimulationState;
use gremlins::components::{Explosion, LootDrop};
use gremlins::events::{GremlinKilled, SoundCue};
use gremlins::gremlin::Gremlin;
use gremlins::plugins::gremlins::{GremlinSet, purge_dead_gremlins};
use gremlins::plugins::particles::Particle;
use gremlins::plugins::tilemap::TileGrid;
use gremlins::resources::{
    Altar, EncounterRng, EncounterStats, GremlinConfig, PlayerState, Room, RoomId, Rooms, Torch,
};

#[derive(Resource, Default)]
struct Heard(Vec<SoundCue>);

#[derive(Resource, Default)]
struct Kills(u32);

/// 100ms per frame, so the 500ms telegraph spans five frames.
fn setup_app(player_at: Vec2) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.add_plugins(GremlinPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    app.insert_resource(TileGrid::open(60, 34));
    app.insert_resource(PlayerState::new(player_at, RoomId(1)));
    app.insert_resource(Rooms::new(vec![Room::new(RoomId(1))]));
    app.insert_resource(EncounterRng::seeded(11));
    app.insert_resource(GremlinConfig {
        wander_chance: 0.0,
        ..default()
    });
    app.init_resource::<Heard>();
    app.init_resource::<Kills>();
    app.add_observer(|trigger: On<SoundCue>, mut heard: ResMut<Heard>| {
        heard.0.push(*trigger.event());
    });
    app.add_observer(|_trigger: On<GremlinKilled>, mut kills: ResMut<Kills>| {
        kills.0 += 1;
    });
    app
}

fn spawn(app: &mut App, position: Vec2) -> Entity {
    let config = app.world().resource::<GremlinConfig>().clone();
    app.world_mut().spawn(Gremlin::new(position, config)).id()
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn count<T: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&T>().iter(world).count()
}

#[test]
fn telegraphed_strike_lands_after_half_a_second() {
    let mut app = setup_app(Vec2::new(120.0, 100.0));
    let g = spawn(&mut app, Vec2::new(100.0, 100.0));

    app.update();
    assert!(app.world().get::<Gremlin>(g).unwrap().is_attacking());

    // 100..400ms: still winding up
    run(&mut app, 4);
    assert_eq!(app.world().resource::<PlayerState>().health, 100);
    assert!(app.world().get::<Gremlin>(g).unwrap().is_attacking());

    // 500ms: strike
    app.update();
    assert_eq!(app.world().resource::<PlayerState>().health, 90);
    assert!(!app.world().get::<Gremlin>(g).unwrap().is_attacking());
    assert_eq!(count::<Particle>(&mut app), 100);
    assert!(app.world().resource::<Heard>().0.contains(&SoundCue::PlayerHurt));

    // Cooldown holds for the next second
    run(&mut app, 4);
    assert_eq!(app.world().resource::<PlayerState>().health, 90);
    assert!(!app.world().get::<Gremlin>(g).unwrap().is_attacking());
}

#[test]
fn impact_particles_expire() {
    let mut app = setup_app(Vec2::new(120.0, 100.0));
    spawn(&mut app, Vec2::new(100.0, 100.0));
    run(&mut app, 6);
    assert_eq!(count::<Particle>(&mut app), 100);

    // Player retreats out of reach; the burst burns out after its lifespan
    app.world_mut().resource_mut::<PlayerState>().position = Vec2::new(460.0, 260.0);
    run(&mut app, 101);
    assert_eq!(count::<Particle>(&mut app), 0);
}

#[test]
fn slain_gremlin_leaves_remains_and_is_purged() {
    let mut app = setup_app(Vec2::new(300.0, 200.0));
    app.add_systems(Update, purge_dead_gremlins.after(GremlinSet::Behavior));
    let g = spawn(&mut app, Vec2::new(100.0, 100.0));
    {
        let mut player = app.world_mut().resource_mut::<PlayerState>();
        player.is_attacking = true;
        player.attack_damage = 30;
        player.attack_box = Rect::new(96.0, 96.0, 112.0, 112.0);
    }

    app.update();

    assert!(app.world().get_entity(g).is_err());
    assert_eq!(app.world().resource::<Kills>().0, 1);
    assert_eq!(app.world().resource::<EncounterStats>().kills, 1);
    assert_eq!(count::<Explosion>(&mut app), 1);
    let drops = count::<LootDrop>(&mut app);
    assert!((2..=5).contains(&drops), "{drops} drops");
    assert!(app.world().resource::<Heard>().0.contains(&SoundCue::GremlinHurt));
}

#[test]
fn gremlins_put_out_torches_in_the_player_room() {
    let mut app = setup_app(Vec2::new(400.0, 200.0));
    app.insert_resource(Rooms::new(vec![Room::new(RoomId(1)).with_altar(Altar {
        consecrated: false,
        torches: vec![Torch::new(Vec2::new(120.0, 100.0), 10)],
    })]));
    let g = spawn(&mut app, Vec2::new(100.0, 100.0));

    run(&mut app, 6);

    let rooms = app.world().resource::<Rooms>();
    let torch = &rooms.get(RoomId(1)).unwrap().altar.as_ref().unwrap().torches[0];
    assert!(!torch.is_lit());
    assert!(app.world().resource::<Heard>().0.contains(&SoundCue::TorchExtinguished));
    assert_eq!(app.world().resource::<PlayerState>().health, 100);

    // Nothing left to burn: back to hunting the player
    app.update();
    assert!(!app.world().get::<Gremlin>(g).unwrap().target.is_torch());
}

#[test]
fn pack_spreads_out_while_chasing() {
    let mut app = setup_app(Vec2::new(400.0, 100.0));
    let a = spawn(&mut app, Vec2::new(100.0, 100.0));
    let b = spawn(&mut app, Vec2::new(100.0, 108.0));

    run(&mut app, 20);

    let pa = app.world().get::<Gremlin>(a).unwrap().position;
    let pb = app.world().get::<Gremlin>(b).unwrap().position;
    assert!(pa.x > 100.0 && pb.x > 100.0);
    assert!(pa.distance(pb) > 8.0, "gremlins stayed clumped: {pa} {pb}");
}

#[test]
fn paused_telegraph_resolves_on_resume() {
    let mut app = setup_app(Vec2::new(120.0, 100.0));
    let g = spawn(&mut app, Vec2::new(100.0, 100.0));
    app.update();
    assert!(app.world().get::<Gremlin>(g).unwrap().is_attacking());

    app.world_mut()
        .resource_mut::<NextState<SimulationState>>()
        .set(SimulationState::Paused);
    run(&mut app, 10);
    assert_eq!(app.world().resource::<PlayerState>().health, 100);

    // Wall-clock telegraph: once resumed the strike resolves on the next tick
    app.world_mut()
        .resource_mut::<NextState<SimulationState>>()
        .set(SimulationState::Running);
    app.update();
    assert_eq!(app.world().resource::<PlayerState>().health, 90);
}
