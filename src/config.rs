//! Runtime configuration, read from a RON file.
//!
//! ```ron
//! (
//!     viewport_width: 1200.0,
//!     starting_lives: 3,
//!     max_level: 3,
//!     frame_ms: 16,
//!     rng_seed: Some(42),
//!     log_file: "platform_shooter.log",
//! )
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::compute::SessionSettings;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "PLATFORM_SHOOTER_CONFIG";
/// Config picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "platform_shooter.ron";

/// Where `GameConfig::discover` found its values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by the environment variable.
    Env(PathBuf),
    /// `platform_shooter.ron` in the working directory.
    Local(PathBuf),
    Defaults,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport_width: f32,
    pub starting_lives: u32,
    pub max_level: u32,
    /// Frontend frame pacing in milliseconds.
    pub frame_ms: u64,
    /// Seed for particle randomness; entropy when absent.
    pub rng_seed: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            viewport_width: 1200.0,
            starting_lives: 3,
            max_level: 3,
            frame_ms: 16,
            rng_seed: None,
            log_file: PathBuf::from("platform_shooter.log"),
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Resolve the config: `$PLATFORM_SHOOTER_CONFIG` if set (must load),
    /// else `platform_shooter.ron` if it exists, else defaults.
    ///
    /// Runs before logging is installed, so the source is returned for the
    /// caller to report.
    pub fn discover() -> Result<(Self, ConfigSource)> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(path);
            return Ok((Self::load(&path)?, ConfigSource::Env(path)));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Ok((Self::load(local)?, ConfigSource::Local(local.to_path_buf())));
        }
        Ok((Self::default(), ConfigSource::Defaults))
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            viewport_width: self.viewport_width,
            starting_lives: self.starting_lives,
            max_level: self.max_level,
        }
    }
}
