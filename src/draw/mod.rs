// src/draw/mod.rs
// Drawing parsed turtle documents with Nannou

pub mod path_draw;
pub mod turtle_draw;

pub use path_draw::{draw_document, fit_transform};

use nannou::prelude::*;

use crate::models::NamedColor;

#[derive(Debug, Clone)]
pub struct Transform2D {
    pub translation: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DrawParams {
    pub color: Rgb<f32>,
    pub stroke_weight: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            color: rgb(0.1, 0.1, 0.1),
            stroke_weight: 3.0,
        }
    }
}

/// Maps a document color name to RGB. Palette names plus the default
/// background; anything else draws grey.
pub fn color_for(name: &str) -> Rgb<f32> {
    let (r, g, b) = match name.parse::<NamedColor>() {
        Ok(named) => named.rgb(),
        Err(()) if name == "whitesmoke" => (245, 245, 245),
        Err(()) => {
            tracing::debug!("no display color for '{}', drawing grey", name);
            NamedColor::Grey.rgb()
        }
    };
    rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}
