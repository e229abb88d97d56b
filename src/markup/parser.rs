// src/markup/parser.rs
// Reads a rendered turtle document back into structured elements
//
// Line oriented: the renderer writes one element per line, so each line is
// matched on its own. Lines that match nothing are skipped.

use regex::Regex;
use std::str::{FromStr, SplitWhitespace};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    #[error("document has no <svg> root with width and height")]
    MissingRoot,

    #[error("malformed path data: '{0}'")]
    PathData(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
        width: f64,
    },
    Arc {
        start_x: f64,
        start_y: f64,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        end_x: f64,
        end_y: f64,
        color: String,
        width: f64,
    },
    Fill {
        commands: Vec<PathCommand>,
        color: String,
    },
}

/// Where the turtle glyph sits and how it is turned.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphPose {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub visible: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub elements: Vec<PathElement>,
    pub turtle: Option<GlyphPose>,
}

fn regex(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn root_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    regex(&RE, r#"<svg[^>]*\swidth="(\d+)"\s+height="(\d+)""#)
}

fn background_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    regex(&RE, r#"<rect[^>]*\sfill="([^"]*)""#)
}

fn line_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    regex(
        &RE,
        r#"<line x1="([-\d.]+)" y1="([-\d.]+)" x2="([-\d.]+)" y2="([-\d.]+)".*style="stroke:(.*?);stroke-width:([\d.]+)""#,
    )
}

fn stroked_path_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    regex(
        &RE,
        r#"<path d="([^"]*)".*style="stroke:(.*?);stroke-width:([\d.]+)""#,
    )
}

fn fill_path_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    regex(&RE, r#"<path d="([^"]*)" stroke="none" fill="([^"]*)""#)
}

fn glyph_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    regex(
        &RE,
        r#"<g visibility="(visible|hidden)" transform="rotate\(([-\d.]+),([-\d.]+),([-\d.]+)\)"#,
    )
}

fn glyph_shape_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    regex(&RE, r#"<(?:circle|ellipse) stroke="([^"]*)""#)
}

pub fn parse_document(markup: &str) -> Result<Document, MarkupError> {
    let caps = root_re()
        .and_then(|re| re.captures(markup))
        .ok_or(MarkupError::MissingRoot)?;
    let width = u32::from_str(&caps[1]).map_err(|_| MarkupError::MissingRoot)?;
    let height = u32::from_str(&caps[2]).map_err(|_| MarkupError::MissingRoot)?;

    let mut document = Document {
        width,
        height,
        background: String::new(),
        elements: Vec::new(),
        turtle: None,
    };

    for line in markup.lines().map(str::trim) {
        if line.starts_with("<rect") {
            if let Some(caps) = background_re().and_then(|re| re.captures(line)) {
                document.background = unescape_attr(&caps[1]);
            }
        } else if line.starts_with("<line") || line.starts_with("<path") {
            match parse_element(line) {
                Ok(Some(element)) => document.elements.push(element),
                Ok(None) => tracing::debug!("skipping unrecognized element: '{}'", line),
                Err(e) => tracing::warn!("{}", e),
            }
        } else if line.starts_with("<g") {
            document.turtle = parse_glyph(line);
        } else if let Some(turtle) = document.turtle.as_mut() {
            // the glyph's color comes from its first shape
            if turtle.color.is_empty() {
                if let Some(caps) = glyph_shape_re().and_then(|re| re.captures(line)) {
                    turtle.color = unescape_attr(&caps[1]);
                }
            }
        }
    }

    Ok(document)
}

fn parse_element(line: &str) -> Result<Option<PathElement>, MarkupError> {
    if let Some(caps) = line_re().and_then(|re| re.captures(line)) {
        return Ok(Some(PathElement::Line {
            x1: number(&caps[1], line)?,
            y1: number(&caps[2], line)?,
            x2: number(&caps[3], line)?,
            y2: number(&caps[4], line)?,
            color: unescape_attr(&caps[5]),
            width: number(&caps[6], line)?,
        }));
    }

    if let Some(caps) = fill_path_re().and_then(|re| re.captures(line)) {
        return Ok(Some(PathElement::Fill {
            commands: parse_path_data(&caps[1])?,
            color: unescape_attr(&caps[2]),
        }));
    }

    if let Some(caps) = stroked_path_re().and_then(|re| re.captures(line)) {
        let commands = parse_path_data(&caps[1])?;
        let color = unescape_attr(&caps[2]);
        let width = number(&caps[3], line)?;
        return match commands.as_slice() {
            [PathCommand::MoveTo(start_x, start_y), PathCommand::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            }] => Ok(Some(PathElement::Arc {
                start_x: *start_x,
                start_y: *start_y,
                rx: *rx,
                ry: *ry,
                x_axis_rotation: *x_axis_rotation,
                large_arc: *large_arc,
                sweep: *sweep,
                end_x: *x,
                end_y: *y,
                color,
                width,
            })),
            _ => Err(MarkupError::PathData(caps[1].to_string())),
        };
    }

    Ok(None)
}

fn parse_glyph(line: &str) -> Option<GlyphPose> {
    let caps = glyph_re()?.captures(line)?;
    Some(GlyphPose {
        visible: &caps[1] == "visible",
        rotation: f64::from_str(&caps[2]).ok()?,
        x: f64::from_str(&caps[3]).ok()?,
        y: f64::from_str(&caps[4]).ok()?,
        color: String::new(),
    })
}

/// Parses the absolute M/L/A/Z subset the renderer emits.
pub fn parse_path_data(d: &str) -> Result<Vec<PathCommand>, MarkupError> {
    let mut tokens = d.split_whitespace();
    let mut commands = Vec::new();

    while let Some(token) = tokens.next() {
        let t = &mut tokens;
        let command = match token {
            "M" => PathCommand::MoveTo(next_num(t, d)?, next_num(t, d)?),
            "L" => PathCommand::LineTo(next_num(t, d)?, next_num(t, d)?),
            "A" => PathCommand::ArcTo {
                rx: next_num(t, d)?,
                ry: next_num(t, d)?,
                x_axis_rotation: next_num(t, d)?,
                large_arc: next_num(t, d)? != 0.0,
                sweep: next_num(t, d)? != 0.0,
                x: next_num(t, d)?,
                y: next_num(t, d)?,
            },
            "Z" | "z" => PathCommand::Close,
            _ => return Err(MarkupError::PathData(d.to_string())),
        };
        commands.push(command);
    }

    Ok(commands)
}

fn next_num(tokens: &mut SplitWhitespace<'_>, d: &str) -> Result<f64, MarkupError> {
    tokens
        .next()
        .and_then(|t| f64::from_str(t).ok())
        .ok_or_else(|| MarkupError::PathData(d.to_string()))
}

fn number(text: &str, line: &str) -> Result<f64, MarkupError> {
    f64::from_str(text).map_err(|_| MarkupError::PathData(line.to_string()))
}

fn unescape_attr(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#10;", "\n")
        .replace("&#13;", "\r")
        .replace("&#9;", "\t")
        .replace("&amp;", "&")
}
