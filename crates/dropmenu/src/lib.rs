#![forbid(unsafe_code)]

//! dropmenu public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! prelude, plus a top-level [`Error`] covering every fallible entry point
//! (theme and configuration loading).
//!
//! # Example
//! ```
//! use dropmenu::prelude::*;
//!
//! let theme = Theme::from_json(r#"{"mode": "dark"}"#)?;
//! let config = MenuOptions::from_json(r#"{"id": "file"}"#)?
//!     .resolve_with(&GlobalDefaults::default())?;
//!
//! let mut host = RecordingHost::new();
//! let mut entries = vec![MenuEntry::new("Open"), MenuEntry::new("Save")];
//! let mut menu = MenuController::new(config, None).with_theme(theme.clone());
//! menu.attach_anchor(AnchorHandle::new(1, Rect::new(0, 0, 6, 1)), &mut host);
//!
//! menu.handle_event(&Event::key(KeyCode::Up), &mut entries, &mut host);
//! menu.handle_event(&Event::key(KeyCode::Up), &mut entries, &mut host);
//! let layout = menu.panel_layout(&entries, &theme);
//! assert!(layout.entries().any(|row| row.active && row.label == "Save"));
//! # Ok::<(), dropmenu::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use dropmenu_core::{
    Disposition, Event, HitRegion, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton,
    MouseEvent, MouseEventKind, Rect,
};

// --- Style re-exports ------------------------------------------------------

pub use dropmenu_style::{
    AdaptiveColor, BackgroundSpec, ImageLayer, OpacityLevel, Paint, Rgb, Rgba, StyleError,
    StyledBackground, TextColor, Theme, ThemeBuilder, ThemeMode, active_paint,
    background_is_dark, resolve_background, themes,
};

// --- Widget re-exports -----------------------------------------------------

pub use dropmenu_widgets::{
    Alignment, AnchorHandle, ConfigError, Disclosure, DisclosureConfig, DisclosureOptions,
    FocusHost, GlobalDefaults, Host, MenuConfig, MenuController, MenuEntry, MenuIntent,
    MenuOptions, PanelHandle, PanelHost, PanelLayout, PanelRow, RecordingHost, Transition,
    TriggerLayout,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dropmenu.
#[derive(Debug)]
pub enum Error {
    /// Theme or background data could not be loaded.
    Style(StyleError),
    /// Widget configuration could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Style(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<StyleError> for Error {
    fn from(err: StyleError) -> Self {
        Self::Style(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for dropmenu APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnchorHandle, BackgroundSpec, Disclosure, DisclosureConfig, Disposition, Error, Event,
        GlobalDefaults, KeyCode, MenuConfig, MenuController, MenuEntry, MenuIntent, MenuOptions,
        Paint, Rect, RecordingHost, Result, StyledBackground, Theme,
    };

    pub use crate::{core, style, widgets};
}

pub use dropmenu_core as core;
pub use dropmenu_style as style;
pub use dropmenu_widgets as widgets;
