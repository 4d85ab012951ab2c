use serde::{Deserialize, Serialize};

use crate::config::AvatarConfig;
use crate::geometry::Aabb;

/// The player-controlled body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    /// Set by a jump, cleared on landing.
    pub airborne: bool,
}

impl AvatarState {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            airborne: false,
        }
    }

    pub fn spawn(config: &AvatarConfig) -> Self {
        Self::new(config.spawn_x, config.spawn_y, config.width, config.height)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Put the avatar back at the spawn point at rest.
    pub fn reset_to_spawn(&mut self, config: &AvatarConfig) {
        *self = Self::spawn(config);
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
    }
}
