// src/models/palette.rs
//
// The fixed named palette and the speed-level delay table

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    White,
    Yellow,
    Orange,
    Red,
    Green,
    Blue,
    Purple,
    Grey,
    Black,
}

impl NamedColor {
    pub const ALL: [NamedColor; 9] = [
        NamedColor::White,
        NamedColor::Yellow,
        NamedColor::Orange,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Blue,
        NamedColor::Purple,
        NamedColor::Grey,
        NamedColor::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NamedColor::White => "white",
            NamedColor::Yellow => "yellow",
            NamedColor::Orange => "orange",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Blue => "blue",
            NamedColor::Purple => "purple",
            NamedColor::Grey => "grey",
            NamedColor::Black => "black",
        }
    }

    /// sRGB components as SVG renders the keyword.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            NamedColor::White => (255, 255, 255),
            NamedColor::Yellow => (255, 255, 0),
            NamedColor::Orange => (255, 165, 0),
            NamedColor::Red => (255, 0, 0),
            NamedColor::Green => (0, 128, 0),
            NamedColor::Blue => (0, 0, 255),
            NamedColor::Purple => (128, 0, 128),
            NamedColor::Grey => (128, 128, 128),
            NamedColor::Black => (0, 0, 0),
        }
    }

    pub fn palette_names() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamedColor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

pub fn is_palette_color(name: &str) -> bool {
    name.parse::<NamedColor>().is_ok()
}

pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 13;
pub const DEFAULT_SPEED: u32 = 6;

// microseconds per redraw, indexed by speed level - 1
const SPEED_DELAYS_US: [u64; 13] = [
    1_500_000, 900_000, 700_000, 500_000, 300_000, 180_000, 120_000, 60_000, 40_000, 20_000,
    10_000, 1_000, 100,
];

/// Delay for a speed level, or `None` outside [1, 13].
pub fn speed_delay(level: u32) -> Option<Duration> {
    if !(MIN_SPEED..=MAX_SPEED).contains(&level) {
        return None;
    }
    SPEED_DELAYS_US
        .get((level - 1) as usize)
        .map(|us| Duration::from_micros(*us))
}
