//! Seams to the host environment.
//!
//! The core never draws or blocks. Hosts implement these traits and call
//! [`present`] after each frame.

use crate::avatar::AvatarState;
use crate::game::{FrameReport, GameEvent};
use crate::level::Level;

/// Receives the static level once and the avatar every frame.
pub trait Renderer {
    fn draw_level(&mut self, level: &Level);

    fn draw_avatar(&mut self, frame: u64, avatar: &AvatarState);
}

/// Receives the "level complete" signal. Whether to block (e.g. a modal
/// dialog) is the implementor's decision.
pub trait Notifier {
    fn level_complete(&mut self, frame: u64);
}

/// Forward one frame's results to the host collaborators.
pub fn present(
    report: &FrameReport,
    avatar: &AvatarState,
    renderer: &mut dyn Renderer,
    notifier: &mut dyn Notifier,
) {
    for event in &report.events {
        match *event {
            GameEvent::LevelComplete { frame, .. } => notifier.level_complete(frame),
        }
    }
    renderer.draw_avatar(report.frame, avatar);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;
    use crate::test_helpers::{RecordingNotifier, RecordingRenderer};

    #[test]
    fn present_draws_and_notifies() {
        let avatar = AvatarState::new(1.0, 2.0, 40.0, 40.0);
        let report = FrameReport {
            frame: 7,
            events: vec![GameEvent::LevelComplete {
                frame: 7,
                runs_completed: 1,
            }],
            ..FrameReport::default()
        };
        let mut renderer = RecordingRenderer::default();
        let mut notifier = RecordingNotifier::default();

        present(&report, &avatar, &mut renderer, &mut notifier);

        assert_eq!(renderer.frames, vec![(7, 1.0, 2.0)]);
        assert_eq!(notifier.completed, vec![7]);
    }

    #[test]
    fn quiet_frame_only_draws() {
        let avatar = AvatarState::new(1.0, 2.0, 40.0, 40.0);
        let report = FrameReport {
            frame: 3,
            ..FrameReport::default()
        };
        let mut renderer = RecordingRenderer::default();
        let mut notifier = RecordingNotifier::default();

        present(&report, &avatar, &mut renderer, &mut notifier);

        assert_eq!(renderer.frames.len(), 1);
        assert!(notifier.completed.is_empty());
    }

    #[test]
    fn level_drawn_once_by_host() {
        let level = Level::from_config(&LevelConfig::default().world);
        let mut renderer = RecordingRenderer::default();
        renderer.draw_level(&level);
        assert_eq!(renderer.tiles_drawn, level.tiles().len());
    }
}
