//! # Vision Test
//!
//! The detection band is an axis-aligned rectangle turned to the watcher's
//! facing: `side` tiles either side of the facing axis and `forward` tiles
//! deep. With `dx = target.x - watcher.x` and `dy = target.y - watcher.y`:
//!
//! ```text
//! Down   -side <= dx <= side   and   -forward <= dy < 0
//! Up     -side <= dx <= side   and    0 < dy <= forward
//! Left   -side <= dy <= side   and    0 < dx <= forward
//! Right  -side <= dy <= side   and   -forward <= dx < 0
//! ```
//!
//! The strict bound at zero keeps the watcher's own row (or column) out of
//! the band, so a target on the watcher's tile is never seen. Diagonal
//! facings see nothing.

use sentinel_shared::{Facing, Pose, Target};

use crate::profile::VisionCone;

/// Returns true if `target` stands inside the band of a watcher at `pose`.
#[inline]
#[must_use]
pub fn can_see(pose: Pose, cone: VisionCone, target: &Target) -> bool {
    let (dx, dy) = pose.position.delta_to(target.position);
    let side = i64::from(cone.side);
    let forward = i64::from(cone.forward);

    match pose.facing {
        Facing::Down => within(dx, side) && dy < 0 && dy >= -forward,
        Facing::Up => within(dx, side) && dy > 0 && dy <= forward,
        Facing::Left => within(dy, side) && dx > 0 && dx <= forward,
        Facing::Right => within(dy, side) && dx < 0 && dx >= -forward,
        Facing::DownLeft | Facing::DownRight | Facing::UpLeft | Facing::UpRight => false,
    }
}

#[inline]
fn within(lateral: i64, side: i64) -> bool {
    lateral >= -side && lateral <= side
}
