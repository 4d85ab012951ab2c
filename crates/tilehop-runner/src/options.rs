use std::path::PathBuf;

use tilehop_core::config::{MAX_FRAME_RATE_HZ, MIN_FRAME_RATE_HZ};

/// Environment variable overriding the level's frame rate.
pub const FRAME_RATE_ENV: &str = "TILEHOP_FRAME_RATE";
/// Environment variable bounding the number of frames to run.
pub const MAX_FRAMES_ENV: &str = "TILEHOP_MAX_FRAMES";

/// Runner settings taken from the command line and environment.
///
/// Arguments win over environment variables. Without `max_frames` the loop
/// runs until `quit` is read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunnerOptions {
    pub level_path: Option<PathBuf>,
    pub frame_rate_hz: Option<f32>,
    pub max_frames: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    UnknownArgument(String),
    InvalidValue { name: &'static str, value: String },
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "unknown argument `{arg}`"),
            Self::InvalidValue { name, value } => write!(f, "invalid value for {name}: `{value}`"),
        }
    }
}

impl std::error::Error for OptionsError {}

impl RunnerOptions {
    /// Read options from the process environment and arguments.
    pub fn from_env_and_args(args: impl IntoIterator<Item = String>) -> Result<Self, OptionsError> {
        Self::parse(args, |name| std::env::var(name).ok())
    }

    /// Parse `--level=`, `--frame-rate=` and `--max-frames=` arguments on top
    /// of values found through `env`.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, OptionsError> {
        let mut options = Self::default();
        if let Some(v) = env(FRAME_RATE_ENV) {
            options.frame_rate_hz = Some(parse_rate(FRAME_RATE_ENV, &v)?);
        }
        if let Some(v) = env(MAX_FRAMES_ENV) {
            options.max_frames = Some(parse_frames(MAX_FRAMES_ENV, &v)?);
        }

        for arg in args {
            if let Some(v) = arg.strip_prefix("--level=") {
                options.level_path = Some(PathBuf::from(v));
            } else if let Some(v) = arg.strip_prefix("--frame-rate=") {
                options.frame_rate_hz = Some(parse_rate("--frame-rate", v)?);
            } else if let Some(v) = arg.strip_prefix("--max-frames=") {
                options.max_frames = Some(parse_frames("--max-frames", v)?);
            } else {
                return Err(OptionsError::UnknownArgument(arg));
            }
        }
        Ok(options)
    }
}

fn parse_rate(name: &'static str, value: &str) -> Result<f32, OptionsError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|r| (MIN_FRAME_RATE_HZ..=MAX_FRAME_RATE_HZ).contains(r))
        .ok_or_else(|| OptionsError::InvalidValue {
            name,
            value: value.to_string(),
        })
}

fn parse_frames(name: &'static str, value: &str) -> Result<u64, OptionsError> {
    value.parse::<u64>().map_err(|_| OptionsError::InvalidValue {
        name,
        value: value.to_string(),
    })
}
