pub mod avatar;
pub mod boundary;
pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod host;
pub mod input;
pub mod level;
pub mod physics;

pub use config::LevelConfig;
pub use error::ConfigError;
pub use game::{FrameReport, GameEvent, GameState, Tilehop, World};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::avatar::AvatarState;
    use crate::config::{LevelConfig, WorldConfig};
    use crate::game::{FrameReport, Tilehop};
    use crate::host::{Notifier, Renderer};
    use crate::level::Level;

    /// Renderer that records avatar positions per frame.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub tiles_drawn: usize,
        pub frames: Vec<(u64, f32, f32)>,
    }

    impl Renderer for RecordingRenderer {
        fn draw_level(&mut self, level: &Level) {
            self.tiles_drawn += level.tiles().len();
        }

        fn draw_avatar(&mut self, frame: u64, avatar: &AvatarState) {
            self.frames.push((frame, avatar.x, avatar.y));
        }
    }

    /// Notifier that records the frames on which the level was completed.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub completed: Vec<u64>,
    }

    impl Notifier for RecordingNotifier {
        fn level_complete(&mut self, frame: u64) {
            self.completed.push(frame);
        }
    }

    /// Default level with every tile removed.
    pub fn open_level() -> LevelConfig {
        LevelConfig {
            world: WorldConfig {
                cells: Vec::new(),
                tiles: Vec::new(),
                ..WorldConfig::default()
            },
            ..LevelConfig::default()
        }
    }

    /// Tick `game` `n` times with its latched input, returning every report.
    pub fn run_frames(game: &mut Tilehop, n: usize) -> Vec<FrameReport> {
        (0..n).map(|_| game.tick()).collect()
    }
}
