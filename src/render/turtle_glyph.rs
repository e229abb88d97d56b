// src/render/turtle_glyph.rs
// The turtle silhouette drawn on top of every frame

use std::fmt::{self, Write};

use crate::models::Turtle;
use crate::render::svg_renderer::{escape_attr, num};

/// One outline of the silhouette, in glyph-local coordinates (head toward +y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphShape {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

pub const GLYPH_STROKE_WIDTH: u32 = 2;

// head, four legs, tail, shell, rim
pub const GLYPH_SHAPES: [GlyphShape; 8] = [
    GlyphShape { cx: 0.0, cy: 15.0, rx: 5.0, ry: 6.0 },
    GlyphShape { cx: 7.5, cy: -7.5, rx: 4.0, ry: 4.0 },
    GlyphShape { cx: -7.5, cy: -7.5, rx: 4.0, ry: 4.0 },
    GlyphShape { cx: 7.5, cy: 7.5, rx: 4.0, ry: 4.0 },
    GlyphShape { cx: -7.5, cy: 7.5, rx: 4.0, ry: 4.0 },
    GlyphShape { cx: 0.0, cy: -12.0, rx: 2.0, ry: 4.0 },
    GlyphShape { cx: 0.0, cy: 0.0, rx: 6.0, ry: 7.2 },
    GlyphShape { cx: 0.0, cy: 0.0, rx: 10.0, ry: 12.0 },
];

/// The glyph art faces down the screen, so it is turned by heading - 90.
pub fn glyph_rotation(heading: f64) -> f64 {
    heading - 90.0
}

pub fn write_turtle<W: Write>(out: &mut W, turtle: &Turtle) -> fmt::Result {
    let visibility = if turtle.visible { "visible" } else { "hidden" };
    let x = num(turtle.position.x);
    let y = num(turtle.position.y);
    let color = escape_attr(&turtle.pen.color);

    writeln!(
        out,
        r#"  <g visibility="{}" transform="rotate({},{},{}) translate({}, {})">"#,
        visibility,
        num(glyph_rotation(turtle.heading())),
        x,
        y,
        x,
        y
    )?;
    for shape in GLYPH_SHAPES.iter() {
        if shape.rx == shape.ry {
            writeln!(
                out,
                r#"    <circle stroke="{}" stroke-width="{}" fill="transparent" r="{}" cx="{}" cy="{}"/>"#,
                color,
                GLYPH_STROKE_WIDTH,
                num(shape.rx),
                num(shape.cx),
                num(shape.cy)
            )?;
        } else {
            writeln!(
                out,
                r#"    <ellipse stroke="{}" stroke-width="{}" fill="transparent" rx="{}" ry="{}" cx="{}" cy="{}"/>"#,
                color,
                GLYPH_STROKE_WIDTH,
                num(shape.rx),
                num(shape.ry),
                num(shape.cx),
                num(shape.cy)
            )?;
        }
    }
    writeln!(out, "  </g>")
}
