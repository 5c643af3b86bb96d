//! Star spawning against the host's factory component.

use glam::{Quat, Vec3};
use rand::Rng;
use tracing::warn;

use crate::constants::{STAR_DEPTH, STAR_SCALE};
use crate::context::GameContext;
use crate::error::SpawnError;
use crate::host::Host;

/// Spawns one star into the level, halfway across the screen at a random
/// height.
///
/// A full pool is the expected steady state once the screen saturates; the
/// attempt is skipped with a warning and no state change. Running out of
/// host instance indices is different: that is a hard system limit sized
/// wrong for the spawn volume, and it comes back as an error.
pub fn spawn_star<H: Host>(ctx: &mut GameContext, host: &mut H) -> Result<(), SpawnError> {
    let level = ctx.level.expect("spawn requires a loaded level");

    if ctx.stars.is_full() {
        warn!("Star pool is full, skipping spawn of new star");
        return Ok(());
    }

    let Some(index) = host.acquire_instance_index(level.scene) else {
        return Err(SpawnError::InstanceIndexExhausted);
    };
    let id = host.construct_instance_id(index);

    let y = ctx.rng.random_range(0.0..ctx.screen.height);
    let position = Vec3::new(ctx.screen.width / 2.0, y, STAR_DEPTH);
    let rotation = Quat::IDENTITY;
    let scale = Vec3::splat(STAR_SCALE);

    let star = host.spawn(&level.factory, level.scene, index, id, position, rotation, scale, None)?;

    ctx.stars.push(star);
    Ok(())
}
