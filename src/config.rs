use std::{io, path::PathBuf};
use thiserror::Error;

pub const DEFAULT_TARGET_PLAYER: &str = "VadimkaYbivaet";

/// Tick rate assumed when the capture does not report one.
pub const DEFAULT_TICK_RATE: u32 = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Case-insensitive substring of the target player's name.
    pub target_player: String,
    pub default_tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_player: DEFAULT_TARGET_PLAYER.into(),
            default_tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl Config {
    pub fn new(target_player: impl Into<String>) -> Self {
        Config {
            target_player: target_player.into(),
            ..Config::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tick rate must be greater than zero")]
    ZeroTickRate,
    #[error("cannot read {}: {source}", path.display())]
    UnreadableInput { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", path.display())]
    UnwritableOutput { path: PathBuf, source: io::Error },
    #[error("output path {} would overwrite the input", .0.display())]
    OutputIsInput(PathBuf),
}
