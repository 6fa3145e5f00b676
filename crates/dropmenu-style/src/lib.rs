#![forbid(unsafe_code)]

//! Style: colors, theme tokens, and background/contrast resolution.
//!
//! The pieces compose bottom-up:
//!
//! - [`Rgb`] / [`Rgba`]: colors with perceptual darkness and alpha.
//! - [`Theme`]: token store with light/dark mode, contrast text colors, the
//!   opacity table, and the hover style.
//! - [`BackgroundSpec`] → [`Paint`]: the resolver that picks fills and
//!   readable text.

pub mod background;
pub mod color;
pub mod error;
pub mod theme;

pub use background::{
    BackgroundSpec, DEFAULT_IMAGE_POSITION, ImageLayer, Paint, StyledBackground, TextColor,
    active_paint, background_is_dark, resolve_background,
};
pub use color::{DARK_BRIGHTNESS_THRESHOLD, Rgb, Rgba};
pub use error::StyleError;
pub use theme::{
    AdaptiveColor, ContrastText, HoverStyle, OpacityLevel, OpacityTable, Theme, ThemeBuilder,
    ThemeMode, themes,
};
