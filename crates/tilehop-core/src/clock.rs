use std::time::Duration;

use crate::config::LevelConfig;

const MIN_FRAME_DURATION: Duration = Duration::from_nanos(1);

/// Fixed-step frame clock.
///
/// Converts elapsed wall time into a whole number of simulation frames so the
/// frame body never sees a variable `dt`. Backlog beyond `max_catch_up` frames
/// is dropped rather than replayed.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_duration: Duration,
    max_catch_up: u32,
    accumulator: Duration,
}

impl FrameClock {
    /// The frame duration is at least 1ns. Rates too small to represent
    /// saturate to `Duration::MAX`; `LevelConfig::validate` keeps loaded
    /// levels well inside both limits.
    pub fn new(frame_rate_hz: f32, max_catch_up: u32) -> Self {
        let frame_duration = Duration::try_from_secs_f32(1.0 / frame_rate_hz)
            .unwrap_or(Duration::MAX)
            .max(MIN_FRAME_DURATION);
        Self {
            frame_duration,
            max_catch_up: max_catch_up.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn from_config(config: &LevelConfig) -> Self {
        Self::new(config.frame_rate_hz, config.max_catch_up_frames)
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Add `elapsed` wall time and return how many frames are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.frame_duration && due < self.max_catch_up {
            self.accumulator -= self.frame_duration;
            due += 1;
        }
        if due == self.max_catch_up && self.accumulator >= self.frame_duration {
            let dropped = self.accumulator.as_secs_f64() / self.frame_duration.as_secs_f64();
            tracing::debug!(dropped = dropped.floor() as u64, "Frame backlog dropped");
            self.accumulator = Duration::ZERO;
        }
        due
    }

    /// Time accumulated towards the next frame.
    pub fn pending(&self) -> Duration {
        self.accumulator
    }
}
