// src/models/turtle.rs
// Cursor state: pose, pen and visibility

use super::geometry::{normalize_heading, Point};

pub const DEFAULT_PEN_COLOR: &str = "black";
pub const DEFAULT_PEN_WIDTH: u32 = 3;
pub const DEFAULT_BACKGROUND: &str = "whitesmoke";

#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub down: bool,
    pub color: String,
    pub width: u32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            down: true,
            color: DEFAULT_PEN_COLOR.to_string(),
            width: DEFAULT_PEN_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Turtle {
    pub position: Point,
    heading: f64,
    pub pen: Pen,
    pub visible: bool,
}

impl Turtle {
    pub fn new(position: Point, pen: Pen) -> Self {
        Self {
            position,
            heading: 0.0,
            pen,
            visible: true,
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = normalize_heading(degrees);
    }

    pub fn turn(&mut self, degrees: f64) {
        self.set_heading(self.heading + degrees);
    }
}
