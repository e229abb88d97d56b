// src/markup/mod.rs
// Reading rendered documents back, for display surfaces and structural tests

pub mod parser;

pub use parser::{parse_document, parse_path_data, Document, GlyphPose, MarkupError, PathCommand, PathElement};
