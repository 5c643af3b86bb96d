use pretty_assertions::assert_eq;

use starscroll::constants::{CONFIG_SCREEN_HEIGHT, CONFIG_SCREEN_WIDTH};
use starscroll::game::Game;
use starscroll::host::EngineEvent;
use starscroll::sim::{SimHost, MAIN_SCENE_PATH};

mod common;

#[test]
fn test_update_before_engine_initialized_is_noop() {
    let mut sim = SimHost::star_demo();
    let mut game = Game::with_seed(7);

    common::tick(&mut game, &mut sim, 1.0);
    common::tick(&mut game, &mut sim, 1.0);

    assert!(game.context().last_frame.is_none());
    assert_eq!(game.context().stars.len(), 0);
    assert!(sim.journal.is_empty());
}

#[test]
fn test_update_while_loading_is_noop() {
    let mut sim = SimHost::star_demo();
    let mut game = Game::with_seed(7);
    game.on_event(&mut sim, EngineEvent::Initialized);

    let journal_len = sim.journal.len();
    for _ in 0..5 {
        common::tick(&mut game, &mut sim, 1.0);
    }

    // No timer decrement, no spawn, no movement, no timestamp capture
    // while the load is pending.
    assert!(game.context().last_frame.is_none());
    assert_eq!(game.context().stars.len(), 0);
    assert_eq!(sim.journal.len(), journal_len);
    assert!(sim.has_pending_load());
}

#[test]
fn test_first_tick_after_load_runs_level_init_once() {
    let (mut game, mut sim) = common::loaded_game();

    common::tick(&mut game, &mut sim, 0.5);

    // The first qualifying tick seeds the timer and the frame baseline,
    // so its own delta time is zero.
    assert!(game.context().phase.is_running());
    assert_eq!(game.context().spawn_timer, game.context().spawn_interval);
    assert!(game.context().last_frame.is_some());

    // Later ticks decrement instead of re-seeding.
    common::tick(&mut game, &mut sim, 0.25);
    assert!((game.context().spawn_timer - 0.75).abs() < 1e-5);
}

#[test]
fn test_spawn_cadence_scenario() {
    let (mut game, mut sim) = common::running_game();

    common::tick(&mut game, &mut sim, 0.5);
    assert_eq!(game.context().stars.len(), 0);
    assert!((game.context().spawn_timer - 0.5).abs() < 1e-5);

    common::tick(&mut game, &mut sim, 0.6);
    assert_eq!(game.context().stars.len(), 1);
    assert!((game.context().spawn_timer - 0.9).abs() < 1e-5);

    common::tick(&mut game, &mut sim, 0.0);
    assert_eq!(game.context().stars.len(), 1);
}

#[test]
fn test_single_spawn_per_tick_without_burst() {
    let (mut game, mut sim) = common::running_game();

    // 3.5 intervals elapse in one tick; only one spawn happens and the
    // timer goes into deficit.
    common::tick(&mut game, &mut sim, 3.5);
    assert_eq!(game.context().stars.len(), 1);
    assert!((game.context().spawn_timer + 1.5).abs() < 1e-5);

    // The deficit catches up one spawn per tick.
    common::tick(&mut game, &mut sim, 0.1);
    assert_eq!(game.context().stars.len(), 2);
}

#[test]
fn test_pool_saturates_at_capacity() {
    let (mut game, mut sim) = common::running_game();

    for _ in 0..40 {
        common::tick(&mut game, &mut sim, 1.0);
    }

    let ctx = game.context();
    assert_eq!(ctx.stars.len(), ctx.stars.capacity());
    assert!(!ctx.phase.is_halted());
    // Once the pool is full the host is never asked to spawn again.
    assert_eq!(common::spawn_count(&sim), ctx.stars.capacity());
}

#[test]
fn test_halted_session_freezes_simulation() {
    let (mut game, mut sim) = common::running_game();
    sim.limit_instances(0);

    common::tick(&mut game, &mut sim, 1.0);
    assert!(game.context().phase.is_halted());
    assert_eq!(game.context().stars.len(), 0);

    let journal_len = sim.journal.len();
    let timer = game.context().spawn_timer;
    let last_frame = game.context().last_frame;

    for _ in 0..10 {
        common::tick(&mut game, &mut sim, 1.0);
    }

    assert_eq!(game.context().spawn_timer, timer);
    assert_eq!(game.context().last_frame, last_frame);
    assert_eq!(sim.journal.len(), journal_len);
}

#[test]
fn test_teardown_releases_main_scene_idempotently() {
    let (mut game, mut sim) = common::running_game();
    assert_eq!(sim.refcount(MAIN_SCENE_PATH), 1);

    game.on_event(&mut sim, EngineEvent::Teardown);
    game.on_event(&mut sim, EngineEvent::Teardown);

    assert_eq!(sim.refcount(MAIN_SCENE_PATH), 0);
    let releases = sim
        .journal
        .iter()
        .filter(|entry| entry.starts_with("release"))
        .count();
    assert_eq!(releases, 1);
}

#[test]
fn test_unacquirable_main_scene_halts_without_retry() {
    let mut sim = SimHost::star_demo();
    sim.deny_acquire(MAIN_SCENE_PATH);
    let mut game = Game::with_seed(7);

    game.on_event(&mut sim, EngineEvent::Initialized);
    assert!(game.context().phase.is_halted());

    // Init counts as having run; ticks stay inert instead of retrying.
    common::tick(&mut game, &mut sim, 1.0);
    assert!(game.context().last_frame.is_none());
    assert!(!sim.has_pending_load());
}

#[test]
fn test_missing_configuration_halts() {
    let mut sim = SimHost::new();
    let mut game = Game::with_seed(7);

    game.on_event(&mut sim, EngineEvent::Initialized);

    assert!(game.context().phase.is_halted());
}

#[test]
fn test_screen_config_is_honored_with_defaults_as_fallback() {
    let mut sim = SimHost::star_demo();
    sim.set_config(CONFIG_SCREEN_WIDTH, "1024");
    sim.set_config(CONFIG_SCREEN_HEIGHT, "not-a-number");
    let mut game = Game::with_seed(7);

    game.on_event(&mut sim, EngineEvent::Initialized);

    assert_eq!(game.context().screen.width, 1024.0);
    assert_eq!(game.context().screen.height, 600.0);
}
