use starscroll::constants::{FACTORIES_ENTITY_ID, LEVELS_ENTITY_ID, LEVEL_PROXY_ID};
use starscroll::game::Game;
use starscroll::host::{EngineEvent, LoadStatus};
use starscroll::sim::{SimHost, LEVEL_SCENE_PATH, MAIN_SCENE_PATH};

mod common;

#[test]
fn test_engine_initialized_issues_async_load() {
    let mut sim = SimHost::star_demo();
    let mut game = Game::with_seed(7);

    game.on_event(&mut sim, EngineEvent::Initialized);

    assert!(sim.has_pending_load());
    assert!(game.context().level.is_none());
    assert!(!game.context().phase.is_halted());
    assert_eq!(
        sim.journal,
        vec![
            format!("acquire {MAIN_SCENE_PATH}"),
            format!("load_async {LEVEL_SCENE_PATH}"),
        ]
    );
}

#[test]
fn test_successful_load_resolves_level_and_activates_scene() {
    let (mut game, mut sim) = common::loaded_game();

    game.update(&mut sim);

    assert!(game.context().level.is_some());
    assert!(game.context().phase.is_running());

    // Initialize must precede enable, and both must precede any spawn.
    let init_at = sim
        .journal
        .iter()
        .position(|entry| entry == "proxy_initialize")
        .expect("scene initialized");
    let enable_at = sim
        .journal
        .iter()
        .position(|entry| entry == "proxy_enable")
        .expect("scene enabled");
    assert!(init_at < enable_at);
    assert!(sim
        .journal
        .iter()
        .take(enable_at + 1)
        .all(|entry| !entry.starts_with("spawn")));
}

#[test]
fn test_level_scene_acquired_from_reported_path() {
    let (mut game, mut sim) = common::loaded_game();

    game.update(&mut sim);

    assert_eq!(sim.refcount(LEVEL_SCENE_PATH), 1);
}

#[test]
fn test_failed_load_halts_session() {
    let mut sim = SimHost::star_demo();
    let mut game = Game::with_seed(7);
    game.on_event(&mut sim, EngineEvent::Initialized);
    sim.complete_load(LoadStatus::Failed);

    game.update(&mut sim);

    assert!(game.context().phase.is_halted());
    assert!(game.context().level.is_none());
    // A failed load is never acquired.
    assert_eq!(sim.refcount(LEVEL_SCENE_PATH), 0);
}

#[test]
fn test_unacquirable_level_scene_halts_session() {
    let mut sim = SimHost::star_demo();
    sim.deny_acquire(LEVEL_SCENE_PATH);
    let mut game = Game::with_seed(7);
    game.on_event(&mut sim, EngineEvent::Initialized);
    sim.complete_load(LoadStatus::Loaded);

    game.update(&mut sim);

    assert!(game.context().phase.is_halted());
    assert!(game.context().level.is_none());
}

#[test]
fn test_missing_levels_entity_halts_before_requesting_load() {
    let mut sim = SimHost::star_demo();
    sim.remove_entity(MAIN_SCENE_PATH, LEVELS_ENTITY_ID);
    let mut game = Game::with_seed(7);

    game.on_event(&mut sim, EngineEvent::Initialized);

    assert!(game.context().phase.is_halted());
    assert!(!sim.has_pending_load());
}

#[test]
fn test_missing_factory_entity_halts_after_load() {
    let mut sim = SimHost::star_demo();
    sim.remove_entity(LEVEL_SCENE_PATH, FACTORIES_ENTITY_ID);
    let mut game = Game::with_seed(7);
    game.on_event(&mut sim, EngineEvent::Initialized);
    sim.complete_load(LoadStatus::Loaded);

    game.update(&mut sim);

    assert!(game.context().phase.is_halted());
    assert!(game.context().level.is_none());
}

#[test]
fn test_proxy_type_mismatch_halts_before_requesting_load() {
    let mut sim = SimHost::star_demo();
    sim.corrupt_component_type(MAIN_SCENE_PATH, LEVELS_ENTITY_ID, LEVEL_PROXY_ID);
    let mut game = Game::with_seed(7);

    game.on_event(&mut sim, EngineEvent::Initialized);

    assert!(game.context().phase.is_halted());
    assert!(!sim.has_pending_load());
}

#[test]
fn test_completion_is_observed_on_the_next_tick() {
    let mut sim = SimHost::star_demo();
    let mut game = Game::with_seed(7);
    game.on_event(&mut sim, EngineEvent::Initialized);

    // Ticks before completion leave the session waiting.
    common::tick(&mut game, &mut sim, 1.0);
    assert!(!game.context().phase.is_running());

    sim.complete_load(LoadStatus::Loaded);
    common::tick(&mut game, &mut sim, 1.0);

    assert!(game.context().phase.is_running());
}
