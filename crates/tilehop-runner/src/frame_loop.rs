use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use tilehop_core::Tilehop;
use tilehop_core::clock::FrameClock;
use tilehop_core::host::{Notifier, Renderer, present};

use crate::commands::FrameCommand;

/// Settings for one run of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    pub frame_rate_hz: f32,
    pub max_catch_up_frames: u32,
    /// Stop after this many frames. `None` runs until `quit`.
    pub max_frames: Option<u64>,
}

impl LoopSettings {
    pub fn from_game(game: &Tilehop) -> Self {
        let config = game.world().config();
        Self {
            frame_rate_hz: config.frame_rate_hz,
            max_catch_up_frames: config.max_catch_up_frames,
            max_frames: None,
        }
    }
}

/// Why the loop returned, and how far it got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub levels_completed: u32,
    pub stopped_by: StopReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    FrameLimit,
}

/// Drive `game` at a fixed frame rate until `quit` or the frame limit.
///
/// Commands are applied to the latched input as they arrive; every frame
/// then steps with a snapshot of that input, so a frame never sees a
/// half-applied set of key changes. Pending commands are drained before a
/// due frame runs.
pub async fn run_frame_loop(
    game: &mut Tilehop,
    settings: LoopSettings,
    mut cmd_rx: mpsc::UnboundedReceiver<FrameCommand>,
    renderer: &mut dyn Renderer,
    notifier: &mut dyn Notifier,
) -> LoopSummary {
    let mut summary = LoopSummary {
        frames: 0,
        levels_completed: 0,
        stopped_by: StopReason::Quit,
    };
    if settings.max_frames == Some(0) {
        summary.stopped_by = StopReason::FrameLimit;
        return summary;
    }

    renderer.draw_level(game.world().level());

    let mut clock = FrameClock::new(settings.frame_rate_hz, settings.max_catch_up_frames);
    let mut interval = tokio::time::interval(clock.frame_duration());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();
    let mut commands_open = true;

    tracing::info!(
        frame_rate_hz = settings.frame_rate_hz,
        tiles = game.world().level().tiles().len(),
        "Frame loop started"
    );

    loop {
        tokio::select! {
            biased;
            cmd = cmd_rx.recv(), if commands_open => {
                match cmd {
                    Some(FrameCommand::Input(event)) => game.apply_input(event),
                    Some(FrameCommand::Quit) => {
                        tracing::info!(frames = summary.frames, "Quit requested");
                        return summary;
                    },
                    None => commands_open = false,
                }
            }
            now = interval.tick() => {
                let due = clock.advance(now.saturating_duration_since(last_tick));
                last_tick = now;
                for _ in 0..due {
                    let report = game.tick();
                    summary.frames += 1;
                    if report.level_complete() {
                        summary.levels_completed += 1;
                    }
                    present(&report, game.avatar(), renderer, notifier);

                    if settings.max_frames.is_some_and(|max| summary.frames >= max) {
                        summary.stopped_by = StopReason::FrameLimit;
                        tracing::info!(frames = summary.frames, "Frame limit reached");
                        return summary;
                    }
                }
            }
        }
    }
}
