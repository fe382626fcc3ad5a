/// Command-line configuration for the terminal renderer
use std::time::Duration;

use knot3d_core::KnotResolution;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: knot3d-terminal [OPTIONS]

Options:
  --width <CELLS>     Framebuffer width in pixels (default 120)
  --height <CELLS>    Framebuffer height in pixels (default 60)
  --fit               Size the framebuffer to the terminal window
  --delay-ms <MS>     Delay between frames (default 40)
  --frames <N>        Stop after N frames, 0 runs until quit (default 6000)
  --u-steps <N>       Samples along the knot (default 60)
  --v-steps <N>       Samples around the tube (default 12)
  --no-rotate         Start with auto-rotation paused
  -h, --help          Print this help";

/// Tallest framebuffer whose text rows, header and footer still fit in a
/// `u16` terminal row index
pub const MAX_HEIGHT: u64 = 2 * (u16::MAX as u64 - 2);

/// Problems found while reading the command line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value '{value}' for {flag}: expected a whole number")]
    InvalidNumber { flag: String, value: String },
    #[error("{flag} must be at least {min}, got {value}")]
    OutOfRange { flag: String, value: u64, min: u64 },
    #[error("{flag} must be at most {max}, got {value}")]
    TooLarge { flag: String, value: u64, max: u64 },
    #[error("unknown option '{0}'")]
    UnknownFlag(String),
}

/// Renderer settings, defaulting to the reference 120x60 animation
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// Replace width/height with the terminal size at startup and on resize
    pub fit_terminal: bool,
    pub frame_delay: Duration,
    /// `None` runs until the user quits
    pub max_frames: Option<u64>,
    pub resolution: KnotResolution,
    pub auto_rotate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 120,
            height: 60,
            fit_terminal: false,
            frame_delay: Duration::from_millis(40),
            max_frames: Some(6000),
            resolution: KnotResolution::default(),
            auto_rotate: true,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parse options (without the program name)
    pub fn from_args<I>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--fit" => config.fit_terminal = true,
                "--no-rotate" => config.auto_rotate = false,
                "--width" => config.width = number(&flag, args.next(), 1, u16::MAX as u64)? as usize,
                "--height" => config.height = number(&flag, args.next(), 1, MAX_HEIGHT)? as usize,
                "--delay-ms" => {
                    config.frame_delay = Duration::from_millis(number(&flag, args.next(), 0, u64::MAX)?)
                }
                "--frames" => {
                    let frames = number(&flag, args.next(), 0, u64::MAX)?;
                    config.max_frames = (frames > 0).then_some(frames);
                }
                "--u-steps" => config.resolution.u_steps = number(&flag, args.next(), 3, u64::MAX)? as usize,
                "--v-steps" => config.resolution.v_steps = number(&flag, args.next(), 3, u64::MAX)? as usize,
                other => return Err(ConfigError::UnknownFlag(other.to_string())),
            }
        }

        Ok(Command::Run(config))
    }
}

fn number(flag: &str, value: Option<String>, min: u64, max: u64) -> Result<u64, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    let parsed: u64 = value.parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value: value.clone(),
    })?;
    if parsed < min {
        return Err(ConfigError::OutOfRange {
            flag: flag.to_string(),
            value: parsed,
            min,
        });
    }
    if parsed > max {
        return Err(ConfigError::TooLarge {
            flag: flag.to_string(),
            value: parsed,
            max,
        });
    }
    Ok(parsed)
}
