// src/render/mod.rs
// Turns session state into SVG markup

pub mod svg_renderer;
pub mod turtle_glyph;

pub use svg_renderer::Frame;
pub use turtle_glyph::{glyph_rotation, GlyphShape, GLYPH_SHAPES, GLYPH_STROKE_WIDTH};
