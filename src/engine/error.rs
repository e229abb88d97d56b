//! Errors and advisories raised by turtle commands.

use thiserror::Error;

use crate::models::NamedColor;

/// Command failures. Raised before any state changes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurtleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("turtle session is not initialized; call initialize() first")]
    UninitializedSession,
}

impl TurtleError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TurtleError::InvalidArgument(message.into())
    }
}

/// A color name outside the palette. The command still applies it as given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("possible color error: '{color}' is not a palette color (valid colors: {valid})")]
pub struct ColorWarning {
    pub color: String,
    valid: String,
}

impl ColorWarning {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            valid: NamedColor::palette_names(),
        }
    }
}
