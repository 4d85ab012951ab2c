use crate::avatar::AvatarState;
use crate::config::PhysicsConfig;
use crate::input::InputState;

/// Advance the avatar by one frame with explicit Euler steps.
///
/// Horizontal motion moves by the current vx before friction damps it, so
/// a held direction converges to `acceleration * friction / (1 - friction)`.
/// Gravity is applied on every frame, including the frame a jump starts.
/// Velocity is not clamped here.
pub fn integrate(avatar: &mut AvatarState, input: &InputState, physics: &PhysicsConfig) {
    if input.left {
        avatar.vx -= physics.acceleration;
    }
    if input.right {
        avatar.vx += physics.acceleration;
    }
    avatar.x += avatar.vx;
    avatar.vx *= physics.friction;

    if input.up && !avatar.airborne {
        avatar.vy = -physics.jump_impulse;
        avatar.airborne = true;
    }
    avatar.vy += physics.gravity;
    avatar.y += avatar.vy;
}
