use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming the level file to load.
pub const LEVEL_PATH_ENV: &str = "TILEHOP_LEVEL";
/// Level file used when `TILEHOP_LEVEL` is unset.
pub const DEFAULT_LEVEL_PATH: &str = "config/level.toml";

/// Per-frame acceleration added to vx while left/right is held.
pub const ACCELERATION: f32 = 1.0;
/// Multiplicative horizontal damping applied every frame.
pub const FRICTION: f32 = 0.92;
/// Per-frame downward acceleration.
pub const GRAVITY: f32 = 0.5;
/// Upward speed set when a jump starts.
pub const JUMP_IMPULSE: f32 = 12.5;
/// vx multiplier when the avatar is stopped by the left wall.
pub const LEFT_WALL_BOUNCE: f32 = -0.75;

/// Distance moved per unstick probe, and per magnitude increment.
pub const UNSTICK_STEP: f32 = 1.0;
/// Number of upward probes before a contact is treated as a side hit.
pub const LIFT_STEPS: u32 = 16;
/// Largest horizontal offset tried by the side search.
pub const MAX_SIDE_NUDGE: f32 = 160.0;
/// Downward correction applied after a side hit.
pub const DROP_OFFSET: f32 = 16.0;
/// vx multiplier applied after a side hit.
pub const SIDE_BOUNCE: f32 = -0.5;

/// Upper bound on probes per pass, so a pathological configuration cannot
/// stall a frame.
pub const MAX_PROBES: u32 = 10_000;

/// Accepted frame rate range, in frames per second.
pub const MIN_FRAME_RATE_HZ: f32 = 1.0;
pub const MAX_FRAME_RATE_HZ: f32 = 1000.0;

/// Edge length of a square tile.
pub const TILE_SIZE: f32 = 75.0;

/// Integrator and wall response tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub acceleration: f32,
    pub friction: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub left_wall_bounce: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            friction: FRICTION,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            left_wall_bounce: LEFT_WALL_BOUNCE,
        }
    }
}

/// Limits and responses of the collision resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub unstick_step: f32,
    pub lift_steps: u32,
    pub max_side_nudge: f32,
    pub drop_offset: f32,
    pub side_bounce: f32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            unstick_step: UNSTICK_STEP,
            lift_steps: LIFT_STEPS,
            max_side_nudge: MAX_SIDE_NUDGE,
            drop_offset: DROP_OFFSET,
            side_bounce: SIDE_BOUNCE,
        }
    }
}

/// Avatar size and spawn point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            spawn_x: 50.0,
            spawn_y: 50.0,
            width: 40.0,
            height: 40.0,
        }
    }
}

/// A tile cell addressed as `(column, row)`, rows counted upward from the
/// bottom of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell(pub i32, pub i32);

/// A tile placed directly by its top-left world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TilePlacement(pub f32, pub f32);

/// World bounds and terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub tile_size: f32,
    pub world_width: f32,
    pub view_height: f32,
    pub ground_y: f32,
    pub cells: Vec<GridCell>,
    pub tiles: Vec<TilePlacement>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            world_width: 1200.0,
            view_height: 600.0,
            ground_y: 600.0 - TILE_SIZE,
            cells: vec![
                GridCell(3, 1),
                GridCell(5, 1),
                GridCell(5, 2),
                GridCell(8, 1),
                GridCell(8, 2),
                GridCell(8, 3),
            ],
            tiles: Vec::new(),
        }
    }
}

/// Top-level level configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub physics: PhysicsConfig,
    pub resolver: ResolverConfig,
    pub avatar: AvatarConfig,
    pub world: WorldConfig,
    pub frame_rate_hz: f32,
    pub max_catch_up_frames: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            resolver: ResolverConfig::default(),
            avatar: AvatarConfig::default(),
            world: WorldConfig::default(),
            frame_rate_hz: 60.0,
            max_catch_up_frames: 5,
        }
    }
}

impl LevelConfig {
    /// Load the level named by `TILEHOP_LEVEL`, or `config/level.toml`.
    ///
    /// A missing default file yields the built-in level. A missing file named
    /// by the environment variable, or any unreadable or invalid file, is an
    /// error.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(LEVEL_PATH_ENV) {
            return Self::load_from(&path);
        }
        if !Path::new(DEFAULT_LEVEL_PATH).exists() {
            tracing::debug!("{DEFAULT_LEVEL_PATH} not found, using built-in level");
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        Self::load_from(DEFAULT_LEVEL_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&content, &shown)?;
        tracing::debug!(
            path = %shown,
            tiles = config.world.cells.len() + config.world.tiles.len(),
            "Loaded level"
        );
        Ok(config)
    }

    /// Parse and validate TOML text. `origin` is only used in error messages.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        finite("physics.acceleration", p.acceleration)?;
        finite("physics.friction", p.friction)?;
        finite("physics.gravity", p.gravity)?;
        finite("physics.jump_impulse", p.jump_impulse)?;
        finite("physics.left_wall_bounce", p.left_wall_bounce)?;
        if p.acceleration < 0.0 {
            return Err(ConfigError::invalid(
                "physics.acceleration",
                "must not be negative",
            ));
        }
        if !(0.0..1.0).contains(&p.friction) {
            return Err(ConfigError::invalid(
                "physics.friction",
                format!("must be in [0, 1), got {}", p.friction),
            ));
        }
        positive("physics.gravity", p.gravity)?;
        if p.jump_impulse < 0.0 {
            return Err(ConfigError::invalid(
                "physics.jump_impulse",
                "must not be negative",
            ));
        }
        bounce("physics.left_wall_bounce", p.left_wall_bounce)?;

        let r = &self.resolver;
        positive("resolver.unstick_step", r.unstick_step)?;
        finite("resolver.max_side_nudge", r.max_side_nudge)?;
        finite("resolver.drop_offset", r.drop_offset)?;
        finite("resolver.side_bounce", r.side_bounce)?;
        if r.lift_steps == 0 {
            return Err(ConfigError::invalid(
                "resolver.lift_steps",
                "must be at least 1",
            ));
        }
        if r.max_side_nudge < r.unstick_step {
            return Err(ConfigError::invalid(
                "resolver.max_side_nudge",
                format!(
                    "must be at least unstick_step ({}), got {}",
                    r.unstick_step, r.max_side_nudge
                ),
            ));
        }
        if r.lift_steps > MAX_PROBES {
            return Err(ConfigError::invalid(
                "resolver.lift_steps",
                format!("must be at most {MAX_PROBES}, got {}", r.lift_steps),
            ));
        }
        if r.max_side_nudge / r.unstick_step > MAX_PROBES as f32 {
            return Err(ConfigError::invalid(
                "resolver.max_side_nudge",
                format!("allows more than {MAX_PROBES} probes of {}", r.unstick_step),
            ));
        }
        bounce("resolver.side_bounce", r.side_bounce)?;

        let w = &self.world;
        positive("world.tile_size", w.tile_size)?;
        positive("world.world_width", w.world_width)?;
        positive("world.view_height", w.view_height)?;
        finite("world.ground_y", w.ground_y)?;
        if w.ground_y <= 0.0 || w.ground_y > w.view_height {
            return Err(ConfigError::invalid(
                "world.ground_y",
                format!("must be in (0, {}], got {}", w.view_height, w.ground_y),
            ));
        }
        for t in &w.tiles {
            if !t.0.is_finite() || !t.1.is_finite() {
                return Err(ConfigError::invalid(
                    "world.tiles",
                    format!("tile position ({}, {}) is not finite", t.0, t.1),
                ));
            }
        }

        let a = &self.avatar;
        finite("avatar.spawn_x", a.spawn_x)?;
        finite("avatar.spawn_y", a.spawn_y)?;
        positive("avatar.width", a.width)?;
        positive("avatar.height", a.height)?;
        if a.spawn_x < 0.0 || a.spawn_x + a.width > w.world_width {
            return Err(ConfigError::invalid(
                "avatar.spawn_x",
                format!("avatar must start inside [0, {}]", w.world_width),
            ));
        }
        if a.spawn_y + a.height > w.ground_y {
            return Err(ConfigError::invalid(
                "avatar.spawn_y",
                format!("avatar must start above the ground line {}", w.ground_y),
            ));
        }

        finite("frame_rate_hz", self.frame_rate_hz)?;
        if !(MIN_FRAME_RATE_HZ..=MAX_FRAME_RATE_HZ).contains(&self.frame_rate_hz) {
            return Err(ConfigError::invalid(
                "frame_rate_hz",
                format!(
                    "must be in [{MIN_FRAME_RATE_HZ}, {MAX_FRAME_RATE_HZ}], got {}",
                    self.frame_rate_hz
                ),
            ));
        }
        if self.max_catch_up_frames == 0 {
            return Err(ConfigError::invalid(
                "max_catch_up_frames",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be positive, got {value}"),
        ))
    }
}

fn bounce(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (-1.0..=0.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be in [-1, 0], got {value}"),
        ))
    }
}
