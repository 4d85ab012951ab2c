pub mod commands;
pub mod frame_loop;
pub mod options;
pub mod render;

use tilehop_core::{ConfigError, LevelConfig};

use options::RunnerOptions;

/// Load the level selected by `options`, applying the frame rate override.
pub fn load_level(options: &RunnerOptions) -> Result<LevelConfig, ConfigError> {
    let mut config = match &options.level_path {
        Some(path) => LevelConfig::load_from(path)?,
        None => LevelConfig::load()?,
    };
    if let Some(rate) = options.frame_rate_hz {
        config.frame_rate_hz = rate;
        config.validate()?;
    }
    Ok(config)
}
