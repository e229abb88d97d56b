// src/render/svg_renderer.rs
// Serializes canvas, drawing log and turtle glyph into one SVG document
//
// Output is a pure function of its inputs: same state, same bytes.

use std::fmt::{self, Write};

use crate::models::{FillPath, PathSegment, Point, Stroke, Turtle};
use crate::render::turtle_glyph::write_turtle;

/// Everything a frame depends on, borrowed from the session.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub canvas: (u32, u32),
    pub background: &'a str,
    pub strokes: &'a [Stroke],
    pub turtle: &'a Turtle,
}

impl<'a> Frame<'a> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.canvas;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            width, height
        )?;
        writeln!(
            f,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape_attr(self.background)
        )?;
        for stroke in self.strokes {
            write_stroke(f, stroke)?;
        }
        write_turtle(f, self.turtle)?;
        writeln!(f, "</svg>")
    }
}

fn write_stroke<W: Write>(out: &mut W, stroke: &Stroke) -> fmt::Result {
    match stroke {
        Stroke::Line {
            from,
            to,
            color,
            width,
        } => writeln!(
            out,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke-linecap="round" style="stroke:{};stroke-width:{}"/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            escape_attr(color),
            width
        ),
        Stroke::Arc {
            from,
            to,
            radius,
            color,
            width,
        } => writeln!(
            out,
            r#"  <path d="M {} {} {}" stroke-linecap="round" fill="transparent" style="stroke:{};stroke-width:{}"/>"#,
            num(from.x),
            num(from.y),
            arc_command(*radius, *to),
            escape_attr(color),
            width
        ),
        Stroke::Fill { path, color } => writeln!(
            out,
            r#"  <path d="{}" stroke="none" fill="{}"/>"#,
            fill_path_data(path),
            escape_attr(color)
        ),
    }
}

fn arc_command(radius: f64, to: Point) -> String {
    // SVG takes radii by magnitude; sweep is fixed positive, small arc
    let r = num(radius.abs());
    format!("A {} {} 0 0 1 {} {}", r, r, num(to.x), num(to.y))
}

fn fill_path_data(path: &FillPath) -> String {
    let mut d = format!("M {} {}", num(path.origin.x), num(path.origin.y));
    for segment in &path.segments {
        match segment {
            PathSegment::LineTo(to) => {
                let _ = write!(d, " L {} {}", num(to.x), num(to.y));
            }
            PathSegment::ArcTo { radius, to } => {
                let _ = write!(d, " {}", arc_command(*radius, *to));
            }
        }
    }
    d.push_str(" Z");
    d
}

/// Formats a coordinate with at most four decimals, trailing zeros trimmed.
pub fn num(value: f64) -> String {
    let mut s = format!("{:.4}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
