// src/services/drawing_log.rs
//
// Append-only stroke history plus the transient fill accumulator.
// Fill capture follows the turtle's path whether or not the pen is down.

use crate::models::{FillPath, PathSegment, Pen, Point, Stroke};

#[derive(Debug, Default, Clone)]
pub struct DrawingLog {
    strokes: Vec<Stroke>,
    fill: Option<FillPath>,
}

impl DrawingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn is_filling(&self) -> bool {
        self.fill.is_some()
    }

    /// The outline captured so far, if a fill is in progress.
    pub fn pending_fill(&self) -> Option<&FillPath> {
        self.fill.as_ref()
    }

    pub fn append_line(&mut self, from: Point, to: Point, pen: &Pen) {
        if pen.down {
            self.strokes.push(Stroke::Line {
                from,
                to,
                color: pen.color.clone(),
                width: pen.width,
            });
        }
        if let Some(fill) = self.fill.as_mut() {
            fill.segments.push(PathSegment::LineTo(to));
        }
    }

    pub fn append_arc(&mut self, from: Point, to: Point, radius: f64, pen: &Pen) {
        if pen.down {
            self.strokes.push(Stroke::Arc {
                from,
                to,
                radius,
                color: pen.color.clone(),
                width: pen.width,
            });
        }
        if let Some(fill) = self.fill.as_mut() {
            fill.segments.push(PathSegment::ArcTo { radius, to });
        }
    }

    /// Starts capturing at `origin`. Returns false if a fill was already open.
    pub fn begin_fill(&mut self, origin: Point) -> bool {
        if self.fill.is_some() {
            return false;
        }
        self.fill = Some(FillPath::new(origin));
        true
    }

    /// Closes the open outline into a fill stroke. Returns false if nothing was open.
    pub fn end_fill(&mut self, color: &str) -> bool {
        match self.fill.take() {
            Some(path) => {
                self.strokes.push(Stroke::Fill {
                    path,
                    color: color.to_string(),
                });
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.fill = None;
    }
}
