//! Runtime configuration, read from the environment (and `.env` via `dotenv`).

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_PREFIX: &str = "$";
pub const DEFAULT_CLIP_DIR: &str = "./Audio";
pub const DEFAULT_QUOTE_FILE: &str = "./Frases/frase_file.pk1";
pub const DEFAULT_VOLUME_PERCENT: u32 = 60;
pub const DEFAULT_ACTIVITY: &str = "Pollo";

/// Errors that can occur while loading the configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub command_prefix: String,
    pub clip_dir: PathBuf,
    pub quote_file: PathBuf,
    /// Volume new entries start at, in percent.
    pub default_volume: u32,
    pub activity: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let default_volume = match get("DEFAULT_VOLUME") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|percent| *percent <= crate::voice::MAX_VOLUME_PERCENT)
                .ok_or(ConfigError::Invalid {
                    key: "DEFAULT_VOLUME",
                    value,
                })?,
            None => DEFAULT_VOLUME_PERCENT,
        };

        Ok(Self {
            discord_token,
            command_prefix: get("COMMAND_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            clip_dir: get("CLIP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIP_DIR)),
            quote_file: get("QUOTE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_QUOTE_FILE)),
            default_volume,
            activity: get("BOT_ACTIVITY").unwrap_or_else(|| DEFAULT_ACTIVITY.to_string()),
        })
    }

    /// Default volume as a multiplier.
    pub fn volume(&self) -> f32 {
        self.default_volume as f32 / 100.0
    }
}
