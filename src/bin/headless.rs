//! A self-contained headless run of the game core against the in-memory
//! host: the simulated engine comes up, finishes the level load after a
//! short latency, and the session spawns and scrolls stars for ten
//! seconds of simulated frames.

use anyhow::Result;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;

use starscroll::constants::LOOP_TIME;
use starscroll::game::{app_finalize, app_init, Game};
use starscroll::host::{EngineEvent, LoadStatus};
use starscroll::sim::SimHost;

/// Ticks to run before exiting.
const RUN_TICKS: u32 = 600;
/// Tick at which the simulated host delivers the level-load completion.
const LOAD_LATENCY_TICKS: u32 = 30;

fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)?;

    app_init();

    let mut sim = SimHost::star_demo();
    let mut game = Game::with_seed(0x5EED);

    game.on_event(&mut sim, EngineEvent::Initialized);

    info!(
        "Starting game loop ({:.3}ms per tick)",
        LOOP_TIME.as_secs_f32() * 1000.0
    );

    for tick_no in 0..RUN_TICKS {
        if tick_no == LOAD_LATENCY_TICKS {
            sim.complete_load(LoadStatus::Loaded);
        }

        sim.advance_clock(LOOP_TIME);
        game.update(&mut sim);

        if game.context().phase.is_halted() {
            anyhow::bail!("session halted on tick {tick_no}");
        }

        if tick_no % 60 == 0 {
            info!("tick {:>3}: {} live stars", tick_no, game.context().stars.len());
        }

        spin_sleep::sleep(LOOP_TIME);
    }

    info!(
        "Run finished in phase {} with {} live stars",
        game.context().phase,
        game.context().stars.len()
    );

    game.on_event(&mut sim, EngineEvent::Teardown);
    game.finalize();
    app_finalize();

    Ok(())
}
