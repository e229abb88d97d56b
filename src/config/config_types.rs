// src/config/config_types.rs
//
// Config types for the app. Every section and field has a default so a
// partial config.toml still loads.

use serde::Deserialize;

use crate::engine::options::DEFAULT_CANVAS;
use crate::models::palette::DEFAULT_SPEED;
use crate::models::turtle::{DEFAULT_BACKGROUND, DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TurtleConfig {
    pub speed: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub pen_color: String,
    pub pen_width: u32,
    pub background: String,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            canvas_width: DEFAULT_CANVAS.0,
            canvas_height: DEFAULT_CANVAS.1,
            pen_color: DEFAULT_PEN_COLOR.to_string(),
            pen_width: DEFAULT_PEN_WIDTH,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    pub enabled: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub scene: String,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            scene: "flower".to_string(),
            seed: 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
