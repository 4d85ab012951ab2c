use std::io::Write;

use serde::Serialize;

use tilehop_core::avatar::AvatarState;
use tilehop_core::host::{Notifier, Renderer};
use tilehop_core::level::{Level, Tile};

/// One line of runner output.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputLine<'a> {
    Level {
        tiles: &'a [Tile],
        ground_y: f32,
        world_width: f32,
        view_height: f32,
    },
    Frame {
        frame: u64,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        airborne: bool,
    },
    LevelComplete {
        frame: u64,
    },
}

fn write_line<W: Write>(out: &mut W, line: &OutputLine<'_>) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, line)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Renders the level and avatar as JSON lines.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    write_errors: usize,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            write_errors: 0,
        }
    }

    pub fn write_errors(&self) -> usize {
        self.write_errors
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &OutputLine<'_>) {
        if let Err(e) = write_line(&mut self.out, line) {
            self.write_errors += 1;
            tracing::warn!(error = %e, "Failed to write frame output");
        }
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn draw_level(&mut self, level: &Level) {
        self.emit(&OutputLine::Level {
            tiles: level.tiles(),
            ground_y: level.ground_y,
            world_width: level.world_width,
            view_height: level.view_height,
        });
    }

    fn draw_avatar(&mut self, frame: u64, avatar: &AvatarState) {
        self.emit(&OutputLine::Frame {
            frame,
            x: avatar.x,
            y: avatar.y,
            vx: avatar.vx,
            vy: avatar.vy,
            airborne: avatar.airborne,
        });
    }
}

/// Logs level completion and writes it as a JSON line. Never blocks.
pub struct JsonLinesNotifier<W: Write> {
    out: W,
    completed: u32,
}

impl<W: Write> JsonLinesNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out, completed: 0 }
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for JsonLinesNotifier<W> {
    fn level_complete(&mut self, frame: u64) {
        self.completed += 1;
        tracing::info!(frame, total = self.completed, "You won!");
        if let Err(e) = write_line(&mut self.out, &OutputLine::LevelComplete { frame }) {
            tracing::warn!(error = %e, "Failed to write completion");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilehop_core::config::WorldConfig;

    fn lines(bytes: &[u8]) -> Vec<serde_json::Value> {
        std::str::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn level_line_lists_tiles() {
        let level = Level::from_config(&WorldConfig::default());
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        renderer.draw_level(&level);

        let out = lines(&renderer.into_inner());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["type"], "level");
        assert_eq!(out[0]["tiles"].as_array().unwrap().len(), 6);
        assert_eq!(out[0]["tiles"][0]["x"], 225.0);
        assert_eq!(out[0]["ground_y"], 525.0);
    }

    #[test]
    fn frame_lines_carry_position() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        let mut avatar = AvatarState::new(12.5, 40.0, 40.0, 40.0);
        avatar.airborne = true;
        renderer.draw_avatar(1, &avatar);
        avatar.x = 13.0;
        renderer.draw_avatar(2, &avatar);

        assert_eq!(renderer.write_errors(), 0);
        let out = lines(&renderer.into_inner());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["type"], "frame");
        assert_eq!(out[0]["frame"], 1);
        assert_eq!(out[0]["x"], 12.5);
        assert_eq!(out[0]["airborne"], true);
        assert_eq!(out[1]["x"], 13.0);
    }

    #[test]
    fn notifier_writes_completion() {
        let mut notifier = JsonLinesNotifier::new(Vec::new());
        notifier.level_complete(42);
        assert_eq!(notifier.completed(), 1);

        let out = lines(&notifier.into_inner());
        assert_eq!(out[0]["type"], "level_complete");
        assert_eq!(out[0]["frame"], 42);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_are_counted_not_fatal() {
        let mut renderer = JsonLinesRenderer::new(BrokenPipe);
        renderer.draw_avatar(1, &AvatarState::new(0.0, 0.0, 1.0, 1.0));
        renderer.draw_avatar(2, &AvatarState::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(renderer.write_errors(), 2);
    }
}
