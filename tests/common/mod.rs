#![allow(dead_code)]

use std::time::Duration;

use starscroll::constants::{FACTORIES_ENTITY_ID, STAR_FACTORY_ID};
use starscroll::context::Level;
use starscroll::game::Game;
use starscroll::host::{EngineEvent, Host, LoadStatus};
use starscroll::sim::{SimHost, LEVEL_SCENE_PATH};

/// A session whose engine has come up and whose level load has completed,
/// one tick away from running.
pub fn loaded_game() -> (Game, SimHost) {
    let mut sim = SimHost::star_demo();
    let mut game = Game::with_seed(7);
    game.on_event(&mut sim, EngineEvent::Initialized);
    sim.complete_load(LoadStatus::Loaded);
    (game, sim)
}

/// A session in the running phase, with the zero-dt first tick consumed.
pub fn running_game() -> (Game, SimHost) {
    let (mut game, mut sim) = loaded_game();
    game.update(&mut sim);
    (game, sim)
}

/// Advances the simulated clock by `dt` seconds and runs one tick.
pub fn tick(game: &mut Game, sim: &mut SimHost, dt: f32) {
    sim.advance_clock(Duration::from_secs_f32(dt));
    game.update(sim);
}

/// Resolves the demo level's scene and star factory the way the loader
/// would, for driving the spawner directly.
pub fn resolved_level(sim: &mut SimHost) -> Level {
    let scene = sim.acquire_scene(LEVEL_SCENE_PATH).expect("demo level scene");
    let entity = sim
        .entity_by_id(scene, FACTORIES_ENTITY_ID)
        .expect("factories entity");
    let factory = sim
        .component(entity, STAR_FACTORY_ID)
        .expect("star factory component");
    Level { scene, factory }
}

/// Number of journal entries recording a host-side spawn.
pub fn spawn_count(sim: &SimHost) -> usize {
    sim.journal
        .iter()
        .filter(|entry| entry.starts_with("spawn"))
        .count()
}
