use serde::{Deserialize, Serialize};

use crate::avatar::AvatarState;
use crate::boundary::{BoundaryReport, apply_bounds};
use crate::collision::{Contact, resolve_collisions};
use crate::config::LevelConfig;
use crate::error::ConfigError;
use crate::input::{InputEvent, InputState};
use crate::level::Level;
use crate::physics::integrate;

/// Immutable part of a run: validated configuration and the terrain built
/// from it.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    config: LevelConfig,
    level: Level,
}

impl World {
    pub fn new(config: LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let level = Level::from_config(&config.world);
        Ok(Self { config, level })
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }
}

/// Mutable per-run state, owned by whoever drives the frame loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub avatar: AvatarState,
    /// Latched controls, updated by press/release events between frames.
    pub input: InputState,
    /// Number of frames stepped so far.
    pub frame: u64,
    pub runs_completed: u32,
}

impl GameState {
    pub fn new(world: &World) -> Self {
        Self {
            avatar: AvatarState::spawn(&world.config.avatar),
            input: InputState::default(),
            frame: 0,
            runs_completed: 0,
        }
    }
}

/// Signals the host may want to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The avatar crossed the right edge on `frame`. It is already back at
    /// spawn with input cleared.
    LevelComplete { frame: u64, runs_completed: u32 },
}

/// Everything that happened during one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub frame: u64,
    pub contacts: Vec<Contact>,
    pub bounds: BoundaryReport,
    pub events: Vec<GameEvent>,
}

impl FrameReport {
    pub fn level_complete(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::LevelComplete { .. }))
    }
}

/// Run one frame: integrate, resolve tiles, then clamp to the world.
pub fn step(world: &World, state: &mut GameState, input: InputState) -> FrameReport {
    let config = &world.config;
    state.frame += 1;

    integrate(&mut state.avatar, &input, &config.physics);
    let contacts = resolve_collisions(&mut state.avatar, world.level.tiles(), &config.resolver);
    let bounds = apply_bounds(
        &mut state.avatar,
        &world.level,
        &config.physics,
        &config.avatar,
    );

    let mut events = Vec::new();
    if bounds.goal_reached {
        state.input.clear();
        state.runs_completed += 1;
        tracing::info!(
            frame = state.frame,
            runs = state.runs_completed,
            "Level complete"
        );
        events.push(GameEvent::LevelComplete {
            frame: state.frame,
            runs_completed: state.runs_completed,
        });
    }

    FrameReport {
        frame: state.frame,
        contacts,
        bounds,
        events,
    }
}

/// Value-in, value-out form of [`step`].
pub fn advance(world: &World, state: &GameState, input: InputState) -> (GameState, FrameReport) {
    let mut next = state.clone();
    let report = step(world, &mut next, input);
    (next, report)
}

/// A world plus its running state.
pub struct Tilehop {
    world: World,
    state: GameState,
}

impl Tilehop {
    pub fn new(config: LevelConfig) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        let state = GameState::new(&world);
        Ok(Self { world, state })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn avatar(&self) -> &AvatarState {
        &self.state.avatar
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        self.state.input.apply(event);
    }

    /// Step one frame using the input latched so far.
    pub fn tick(&mut self) -> FrameReport {
        let snapshot = self.state.input;
        step(&self.world, &mut self.state, snapshot)
    }
}
