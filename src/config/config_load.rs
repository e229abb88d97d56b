// src/config/config_load.rs
//
// loading config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::config_types::{DemoConfig, LoggingConfig, PacingConfig, TurtleConfig, WindowConfig};
use crate::engine::{InitOptions, TurtleError};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid turtle settings: {0}")]
    Invalid(#[from] TurtleError),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub turtle: TurtleConfig,
    pub pacing: PacingConfig,
    pub demo: DemoConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::exe_dir_path().filter(|p| p.exists()) {
            return Self::load_from(&exe_config);
        }

        // Fallback to the current working directory
        let cwd_config = Path::new(CONFIG_FILE_NAME);
        if cwd_config.exists() {
            return Self::load_from(cwd_config);
        }

        tracing::info!("no {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.init_options().validate()?;
        Ok(config)
    }

    /// Session parameters described by the `[turtle]` section.
    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            speed: self.turtle.speed,
            canvas: (self.turtle.canvas_width, self.turtle.canvas_height),
            pen_color: self.turtle.pen_color.clone(),
            pen_width: self.turtle.pen_width,
            background: self.turtle.background.clone(),
        }
    }

    fn exe_dir_path() -> Option<PathBuf> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        Some(exe_dir.join(CONFIG_FILE_NAME))
    }
}
