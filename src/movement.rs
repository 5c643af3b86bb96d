//! Per-frame star movement.

use crate::constants::{LEFT_EDGE_LIMIT, STAR_SPEED, WRAP_MARGIN};
use crate::context::ScreenBounds;
use crate::host::Host;
use crate::pool::StarPool;

/// Advances every live star by one frame, wrapping stars that scrolled off
/// the left edge back past the right edge.
///
/// Wrapping moves the same entity instead of despawning and respawning
/// one; pool membership never changes here.
pub fn advance<H: Host>(stars: &StarPool, screen: ScreenBounds, dt: f32, host: &mut H) {
    for star in stars.iter() {
        let mut position = host.position(star);
        position.x += STAR_SPEED * dt;

        if position.x < LEFT_EDGE_LIMIT {
            position.x += screen.width + WRAP_MARGIN;
        }

        host.set_position(star, position);
    }
}
