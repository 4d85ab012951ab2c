use serde::{Deserialize, Serialize};

use crate::avatar::AvatarState;
use crate::config::{AvatarConfig, PhysicsConfig};
use crate::level::Level;

/// Which world bounds acted on the avatar this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryReport {
    /// Snapped onto the ground line.
    pub grounded: bool,
    /// Crossed the right edge and was sent back to spawn.
    pub goal_reached: bool,
    /// Stopped by the left wall.
    pub left_wall: bool,
}

/// Clamp the avatar to the world after collision resolution.
///
/// The ground clamp overrides whatever the resolver did. Crossing the right
/// edge resets the avatar to spawn; the caller is responsible for clearing
/// input and notifying anyone interested.
pub fn apply_bounds(
    avatar: &mut AvatarState,
    level: &Level,
    physics: &PhysicsConfig,
    spawn: &AvatarConfig,
) -> BoundaryReport {
    let mut report = BoundaryReport::default();

    let rest_y = level.ground_y - avatar.height;
    if avatar.y >= rest_y {
        avatar.y = rest_y;
        avatar.vy = 0.0;
        avatar.airborne = false;
        report.grounded = true;
    }

    if avatar.right() > level.world_width {
        avatar.reset_to_spawn(spawn);
        report.goal_reached = true;
    }

    if avatar.x < 0.0 {
        avatar.x = 0.0;
        avatar.vx *= physics.left_wall_bounce;
        report.left_wall = true;
    }

    report
}
