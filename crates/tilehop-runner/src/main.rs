use std::process::ExitCode;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use tilehop_core::Tilehop;
use tilehop_runner::commands::read_commands;
use tilehop_runner::frame_loop::{LoopSettings, run_frame_loop};
use tilehop_runner::options::RunnerOptions;
use tilehop_runner::render::{JsonLinesNotifier, JsonLinesRenderer};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Frames go to stdout, logs to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = match RunnerOptions::from_env_and_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        },
    };

    let config = match tilehop_runner::load_level(&options) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Level configuration rejected: {e}");
            return ExitCode::FAILURE;
        },
    };
    let mut game = match Tilehop::new(config) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!("Level configuration rejected: {e}");
            return ExitCode::FAILURE;
        },
    };

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    tokio::spawn(read_commands(tokio::io::stdin(), cmd_tx));

    let settings = LoopSettings {
        max_frames: options.max_frames,
        ..LoopSettings::from_game(&game)
    };
    let mut renderer = JsonLinesRenderer::new(std::io::stdout());
    let mut notifier = JsonLinesNotifier::new(std::io::stdout());

    let summary = run_frame_loop(&mut game, settings, cmd_rx, &mut renderer, &mut notifier).await;

    tracing::info!(
        frames = summary.frames,
        levels_completed = summary.levels_completed,
        stopped_by = ?summary.stopped_by,
        "Tilehop stopped"
    );
    ExitCode::SUCCESS
}
