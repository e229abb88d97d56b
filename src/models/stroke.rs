// src/models/stroke.rs
// Immutable drawing primitives kept in the drawing log

use super::geometry::Point;

/// One segment of a fill outline, continuing from the previous vertex.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    LineTo(Point),
    ArcTo { radius: f64, to: Point },
}

/// A closed outline: starts at `origin`, follows `segments`, then closes back.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPath {
    pub origin: Point,
    pub segments: Vec<PathSegment>,
}

impl FillPath {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            segments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stroke {
    Line {
        from: Point,
        to: Point,
        color: String,
        width: u32,
    },
    /// Positive-sweep, small-arc circular arc from `from` to `to`.
    Arc {
        from: Point,
        to: Point,
        radius: f64,
        color: String,
        width: u32,
    },
    Fill {
        path: FillPath,
        color: String,
    },
}

impl Stroke {
    pub fn is_line(&self) -> bool {
        matches!(self, Stroke::Line { .. })
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Stroke::Arc { .. })
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, Stroke::Fill { .. })
    }

    pub fn color(&self) -> &str {
        match self {
            Stroke::Line { color, .. } | Stroke::Arc { color, .. } | Stroke::Fill { color, .. } => {
                color
            }
        }
    }
}
