#![forbid(unsafe_code)]

//! Errors raised while loading style data.

use std::fmt;

/// Error loading a theme or background from data.
#[derive(Debug)]
pub enum StyleError {
    /// The input was not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// A color value was neither a literal nor a known token.
    InvalidColor {
        /// Token or field being defined.
        name: String,
        /// The offending value.
        value: String,
    },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "style JSON error: {e}"),
            Self::InvalidColor { name, value } => {
                write!(f, "invalid color for '{name}': '{value}'")
            }
        }
    }
}

impl std::error::Error for StyleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::InvalidColor { .. } => None,
        }
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
