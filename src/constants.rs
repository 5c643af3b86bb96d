//! This module contains all the constants used in the game core.

use std::time::Duration;

/// Target duration of one host tick at 60 FPS.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Horizontal star velocity, in pixels per second. Negative is leftward.
pub const STAR_SPEED: f32 = -260.0;
/// Stars drifting past this x coordinate have fully left the screen and wrap.
pub const LEFT_EDGE_LIMIT: f32 = -32.0;
/// Margin added past the right edge on wrap, so a star re-enters from
/// off-screen instead of popping in at the border.
pub const WRAP_MARGIN: f32 = 32.0;

/// Depth offset for spawned stars; keeps them in front of the level backdrop.
pub const STAR_DEPTH: f32 = 0.1;
/// Uniform scale applied to spawned stars.
pub const STAR_SCALE: f32 = 2.0;

/// Maximum number of live stars.
pub const STAR_CAPACITY: usize = 16;
/// Seconds between spawn attempts.
pub const SPAWN_INTERVAL: f32 = 1.0;

/// Screen bounds used when the host configuration omits them.
pub const DEFAULT_SCREEN_WIDTH: i32 = 800;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 600;

/// Host configuration key for the main collection's resource path.
pub const CONFIG_MAIN_SCENE: &str = "bootstrap.main_collection";
/// Host configuration keys for the logical display size.
pub const CONFIG_SCREEN_WIDTH: &str = "display.width";
pub const CONFIG_SCREEN_HEIGHT: &str = "display.height";

/// Entity in the main scene that carries the level proxy components.
pub const LEVELS_ENTITY_ID: &str = "/levels";
/// Proxy component on [`LEVELS_ENTITY_ID`] wired to the first level.
pub const LEVEL_PROXY_ID: &str = "level1";
/// Entity in the level scene that carries the factory components.
pub const FACTORIES_ENTITY_ID: &str = "/factories";
/// Factory component on [`FACTORIES_ENTITY_ID`] that instantiates stars.
pub const STAR_FACTORY_ID: &str = "starfactory";

/// Component type extensions, used for defensive type-consistency checks.
pub const PROXY_TYPE_EXTENSION: &str = "proxyc";
pub const FACTORY_TYPE_EXTENSION: &str = "factoryc";
