// src/engine/options.rs
//
// Parameters a session is (re)initialized with

use crate::engine::error::{ColorWarning, TurtleError};
use crate::models::palette::{is_palette_color, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use crate::models::turtle::{DEFAULT_BACKGROUND, DEFAULT_PEN_COLOR, DEFAULT_PEN_WIDTH};

pub const DEFAULT_CANVAS: (u32, u32) = (600, 600);

#[derive(Debug, Clone, PartialEq)]
pub struct InitOptions {
    pub speed: u32,
    pub canvas: (u32, u32),
    pub pen_color: String,
    pub pen_width: u32,
    pub background: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            canvas: DEFAULT_CANVAS,
            pen_color: DEFAULT_PEN_COLOR.to_string(),
            pen_width: DEFAULT_PEN_WIDTH,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl InitOptions {
    pub fn new(speed: u32, canvas: (u32, u32)) -> Self {
        Self {
            speed,
            canvas,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TurtleError> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(TurtleError::invalid(format!(
                "initial speed should be an integer in [{}, {}], got {}",
                MIN_SPEED, MAX_SPEED, self.speed
            )));
        }
        let (width, height) = self.canvas;
        if width == 0 || height == 0 {
            return Err(TurtleError::invalid(format!(
                "canvas size should be two positive integers, got {}x{}",
                width, height
            )));
        }
        if self.pen_width == 0 {
            return Err(TurtleError::invalid("pen width should be positive"));
        }
        Ok(())
    }

    /// Off-palette colors among the options. The stock background is exempt.
    pub fn color_warnings(&self) -> Vec<ColorWarning> {
        let mut warnings = Vec::new();
        if !is_palette_color(&self.pen_color) {
            warnings.push(ColorWarning::new(self.pen_color.as_str()));
        }
        if self.background != DEFAULT_BACKGROUND && !is_palette_color(&self.background) {
            warnings.push(ColorWarning::new(self.background.as_str()));
        }
        warnings
    }
}
