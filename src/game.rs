//! The game controller: top-level orchestration and the host-facing
//! lifecycle surface.
//!
//! The host drives a [`Game`] through three entry points: lifecycle events
//! ([`Game::on_event`]), the per-tick update ([`Game::update`]), and
//! teardown ([`Game::finalize`]). The controller owns every phase
//! transition; the loader, spawner and movement modules never touch the
//! phase themselves, they only report errors for the controller to turn
//! into the sticky halted state.

use tracing::{error, info};

use crate::constants::{
    CONFIG_MAIN_SCENE, CONFIG_SCREEN_HEIGHT, CONFIG_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT,
    DEFAULT_SCREEN_WIDTH, SPAWN_INTERVAL,
};
use crate::context::{GameContext, GamePhase, ScreenBounds};
use crate::host::{EngineEvent, Host};
use crate::{loader, movement, spawner};

/// App-level init hook. The host invokes it before any engine subsystem
/// exists; nothing to do at this layer.
pub fn app_init() {}

/// App-level teardown counterpart of [`app_init`].
pub fn app_finalize() {}

/// A game session, driven by the host through its extension lifecycle.
pub struct Game {
    ctx: GameContext,
}

impl Game {
    /// Creates an idle session. Gameplay starts once the host delivers
    /// [`EngineEvent::Initialized`].
    pub fn new() -> Self {
        Self {
            ctx: GameContext::new(),
        }
    }

    /// Creates a session with deterministic spawn randomness.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            ctx: GameContext::with_seed(seed),
        }
    }

    /// Read access to the session state.
    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Reacts to host lifecycle events.
    pub fn on_event<H: Host>(&mut self, host: &mut H, event: EngineEvent) {
        match event {
            EngineEvent::Initialized => self.init_game(host),
            EngineEvent::Teardown => self.exit_game(host),
        }
    }

    /// Extension teardown hook. Host resources are released on
    /// [`EngineEvent::Teardown`]; nothing further to do here.
    pub fn finalize(&mut self) {}

    /// Runs one host tick.
    ///
    /// While the session is halted, not yet initialized, or still waiting
    /// on the level load, the tick is a complete no-op: the clock is not
    /// even read. The first tick after the load resolves runs one-time
    /// level initialization before simulating.
    pub fn update<H: Host>(&mut self, host: &mut H) {
        if matches!(self.ctx.phase, GamePhase::Halted | GamePhase::Uninitialized) {
            return;
        }

        if matches!(self.ctx.phase, GamePhase::Loading { .. }) && !self.resolve_pending_load(host) {
            return;
        }

        if matches!(self.ctx.phase, GamePhase::AwaitingFirstTick) {
            self.init_level(host);
        }

        self.tick(host);
    }

    fn init_game<H: Host>(&mut self, host: &mut H) {
        info!("Initializing game");
        let ctx = &mut self.ctx;

        let main_scene_path = host.config_string(CONFIG_MAIN_SCENE);

        ctx.screen = ScreenBounds {
            width: host.config_int(CONFIG_SCREEN_WIDTH, DEFAULT_SCREEN_WIDTH) as f32,
            height: host.config_int(CONFIG_SCREEN_HEIGHT, DEFAULT_SCREEN_HEIGHT) as f32,
        };

        // Every exit below leaves `Uninitialized` behind, so a failed init
        // is still "init has run" and is never retried; the session parks
        // in `Halted` instead.
        let main_scene = match main_scene_path {
            Some(ref path) => match host.acquire_scene(path) {
                Ok(scene) => scene,
                Err(e) => {
                    error!("Failed to get main collection '{}': {}", path, e);
                    ctx.phase = GamePhase::Halted;
                    return;
                }
            },
            None => {
                error!("No main collection configured under '{}'", CONFIG_MAIN_SCENE);
                ctx.phase = GamePhase::Halted;
                return;
            }
        };
        ctx.main_scene = Some(main_scene);

        ctx.last_frame = None;
        ctx.spawn_interval = SPAWN_INTERVAL;

        match loader::begin_load(host, main_scene) {
            Ok((ticket, proxy)) => ctx.phase = GamePhase::Loading { ticket, proxy },
            Err(e) => {
                error!("Failed to start level load: {}", e);
                ctx.phase = GamePhase::Halted;
            }
        }
    }

    fn exit_game<H: Host>(&mut self, host: &mut H) {
        info!("Exiting game");
        if let Some(scene) = self.ctx.main_scene.take() {
            host.release_scene(scene);
        }
    }

    /// Polls the in-flight load. Returns whether the tick may proceed.
    fn resolve_pending_load<H: Host>(&mut self, host: &mut H) -> bool {
        let GamePhase::Loading { ticket, proxy } = &self.ctx.phase else {
            return true;
        };
        let Some(completion) = ticket.poll() else {
            return false;
        };
        let proxy = *proxy;

        // The request is settled either way; the loading phase must not
        // survive this tick.
        self.ctx.phase = GamePhase::AwaitingFirstTick;

        if let Err(e) = loader::finish_load(&mut self.ctx, host, &proxy, completion) {
            error!("Level load failed: {}", e);
            self.ctx.phase = GamePhase::Halted;
            return false;
        }
        true
    }

    /// One-time level setup on the first tick after the load resolves.
    fn init_level<H: Host>(&mut self, host: &mut H) {
        info!("Initializing level");
        self.ctx.spawn_timer = self.ctx.spawn_interval;
        self.ctx.last_frame = Some(host.now());
        self.ctx.phase = GamePhase::Running;
    }

    fn tick<H: Host>(&mut self, host: &mut H) {
        let now = host.now();
        let last = self.ctx.last_frame.replace(now).unwrap_or(now);
        let dt = now.saturating_sub(last).as_secs_f32();

        self.ctx.spawn_timer -= dt;
        if self.ctx.spawn_timer <= 0.0 {
            // One spawn per tick even when several intervals elapsed; the
            // timer catches up over the following ticks instead of
            // bursting.
            if let Err(e) = spawner::spawn_star(&mut self.ctx, host) {
                error!("Failed to spawn star: {}", e);
                self.ctx.phase = GamePhase::Halted;
            }
            self.ctx.spawn_timer += self.ctx.spawn_interval;
        }

        movement::advance(&self.ctx.stars, self.ctx.screen, dt, host);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
