//! Session state: the single mutable root everything ticks against.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use strum_macros::Display;

use crate::constants::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, SPAWN_INTERVAL, STAR_CAPACITY};
use crate::host::{ComponentRef, LoadTicket, SceneHandle};
use crate::pool::StarPool;

/// Logical viewport bounds, read once from host configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

/// The dynamically loaded level: its scene and the star factory resolved
/// inside it.
///
/// Populated as one unit by a fully successful load completion, so a
/// half-resolved level cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub scene: SceneHandle,
    pub factory: ComponentRef,
}

/// The controller's state machine.
///
/// Phases only move forward, except that any of them can collapse into
/// [`GamePhase::Halted`], which is sticky: there is no recovery path short
/// of a new session.
#[derive(Debug, Display)]
pub enum GamePhase {
    /// The engine-initialized event has not fired yet; ticks are ignored.
    Uninitialized,
    /// A level load is in flight. The ticket is polled at tick start; the
    /// proxy rides along for the activation steps that follow completion.
    Loading {
        ticket: LoadTicket,
        proxy: ComponentRef,
    },
    /// The load resolved; the next qualifying tick runs one-time level
    /// initialization.
    AwaitingFirstTick,
    Running,
    /// A fatal error occurred; every later tick is a no-op.
    Halted,
}

impl GamePhase {
    pub fn is_halted(&self) -> bool {
        matches!(self, GamePhase::Halted)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Running)
    }
}

/// The single mutable root of all session state, owned by the controller
/// for the lifetime of the extension.
pub struct GameContext {
    /// Root scene, acquired during game init and released at teardown.
    pub main_scene: Option<SceneHandle>,
    /// Present only after a successful load completion.
    pub level: Option<Level>,
    pub stars: StarPool,
    /// Monotonic time of the previous tick; `None` until level init.
    pub last_frame: Option<Duration>,
    /// Countdown to the next spawn attempt, in seconds.
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    pub screen: ScreenBounds,
    pub phase: GamePhase,
    pub rng: SmallRng,
}

impl GameContext {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Deterministic variant for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        Self {
            main_scene: None,
            level: None,
            stars: StarPool::new(STAR_CAPACITY),
            last_frame: None,
            spawn_timer: 0.0,
            spawn_interval: SPAWN_INTERVAL,
            screen: ScreenBounds {
                width: DEFAULT_SCREEN_WIDTH as f32,
                height: DEFAULT_SCREEN_HEIGHT as f32,
            },
            phase: GamePhase::Uninitialized,
            rng,
        }
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}
