pub mod geometry;
pub mod palette;
pub mod stroke;
pub mod turtle;

pub use geometry::{arc_endpoint, normalize_heading, translate, Point};
pub use palette::{is_palette_color, speed_delay, NamedColor};
pub use stroke::{FillPath, PathSegment, Stroke};
pub use turtle::{Pen, Turtle};
