// src/models/geometry.rs
// Points and the turtle's motion geometry
//
// Screen convention: origin top left, y grows downward, heading 0 points along +x
// and positive angles turn clockwise on screen.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Wraps any finite angle into [0, 360).
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Moves `distance` units from `pos` along `heading` (degrees).
pub fn translate(pos: Point, heading: f64, distance: f64) -> Point {
    let alpha = heading.to_radians();
    Point::new(
        pos.x + distance * alpha.cos(),
        pos.y + distance * alpha.sin(),
    )
}

/// Circle center sits 90° clockwise of the heading at `radius`; the endpoint is the
/// start point rotated about that center by `delta` degrees.
///
/// Returns `(center, endpoint)`. Both are computed from the given pose only, so
/// chaining calls never accumulates rounding from earlier arcs.
pub fn arc_endpoint(pos: Point, heading: f64, radius: f64, delta: f64) -> (Point, Point) {
    let alpha = heading.to_radians();
    let beta = alpha + 90f64.to_radians();
    let gamma = delta.to_radians() + alpha - 90f64.to_radians();

    let center = Point::new(pos.x + radius * beta.cos(), pos.y + radius * beta.sin());
    let endpoint = Point::new(
        center.x + radius * gamma.cos(),
        center.y + radius * gamma.sin(),
    );

    (center, endpoint)
}
