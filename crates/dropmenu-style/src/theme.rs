#![forbid(unsafe_code)]

//! Theme token store consumed by background resolution.
//!
//! A theme maps color token names (like `"brand"` or `"light-2"`) to colors
//! that may adapt to light/dark mode, and carries the contrast text colors,
//! the opacity table, and the hover style used for highlighted rows.
//!
//! # Example
//! ```
//! use dropmenu_style::theme::{Theme, ThemeMode};
//! use dropmenu_style::color::Rgb;
//!
//! let theme = Theme::builder()
//!     .mode(ThemeMode::Dark)
//!     .color("brand", Rgb::new(0x7d, 0x4c, 0xdb))
//!     .build();
//! assert_eq!(theme.color_token("brand"), Some(Rgb::new(0x7d, 0x4c, 0xdb)));
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::background::{BackgroundSpec, StyledBackground};
use crate::color::{DARK_BRIGHTNESS_THRESHOLD, Rgb};
use crate::error::StyleError;

/// Light or dark rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light surfaces, dark text.
    #[default]
    Light,
    /// Dark surfaces, light text.
    Dark,
}

impl ThemeMode {
    /// Whether this is dark mode.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// An adaptive color that can change based on light/dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptiveColor {
    /// A fixed color that doesn't change with mode.
    Fixed(Rgb),
    /// A color that adapts to light/dark mode.
    Adaptive {
        /// Color to use in light mode.
        light: Rgb,
        /// Color to use in dark mode.
        dark: Rgb,
    },
}

impl AdaptiveColor {
    /// Create a fixed color.
    #[inline]
    pub const fn fixed(color: Rgb) -> Self {
        Self::Fixed(color)
    }

    /// Create an adaptive color with light/dark variants.
    #[inline]
    pub const fn adaptive(light: Rgb, dark: Rgb) -> Self {
        Self::Adaptive { light, dark }
    }

    /// Resolve the color for a mode.
    #[inline]
    pub const fn resolve(&self, mode: ThemeMode) -> Rgb {
        match self {
            Self::Fixed(c) => *c,
            Self::Adaptive { light, dark } => {
                if mode.is_dark() {
                    *dark
                } else {
                    *light
                }
            }
        }
    }
}

impl From<Rgb> for AdaptiveColor {
    fn from(color: Rgb) -> Self {
        Self::Fixed(color)
    }
}

/// Named opacity levels for translucent backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpacityLevel {
    /// Barely-there tint. Never overrides ambient text contrast.
    Weak,
    /// Default level when opacity is requested without a name.
    Medium,
    /// Mostly opaque.
    Strong,
}

/// Alpha values (0.0–1.0) for each [`OpacityLevel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityTable {
    /// Alpha for [`OpacityLevel::Weak`].
    pub weak: f32,
    /// Alpha for [`OpacityLevel::Medium`].
    pub medium: f32,
    /// Alpha for [`OpacityLevel::Strong`].
    pub strong: f32,
}

impl OpacityTable {
    /// Alpha for a level.
    #[must_use]
    pub const fn alpha(&self, level: OpacityLevel) -> f32 {
        match level {
            OpacityLevel::Weak => self.weak,
            OpacityLevel::Medium => self.medium,
            OpacityLevel::Strong => self.strong,
        }
    }
}

impl Default for OpacityTable {
    fn default() -> Self {
        Self {
            weak: 0.1,
            medium: 0.4,
            strong: 0.8,
        }
    }
}

/// Text colors chosen by background darkness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContrastText {
    /// Text painted over dark backgrounds (a light color).
    pub on_dark: Rgb,
    /// Text painted over light backgrounds (a dark color).
    pub on_light: Rgb,
}

impl ContrastText {
    /// Pick the readable text color for a background.
    #[must_use]
    pub const fn for_background(&self, background_is_dark: bool) -> Rgb {
        if background_is_dark {
            self.on_dark
        } else {
            self.on_light
        }
    }
}

/// Paint used for hovered / keyboard-active rows.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverStyle {
    /// Row background.
    pub background: BackgroundSpec,
    /// Row text color.
    pub color: AdaptiveColor,
}

/// A theme: color tokens plus the contrast and opacity rules that go with them.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Active mode.
    pub mode: ThemeMode,
    colors: BTreeMap<String, AdaptiveColor>,
    /// Contrast text colors.
    pub text: ContrastText,
    /// Opacity level table.
    pub opacity: OpacityTable,
    /// Brightness threshold under which a color is dark.
    pub contrast_threshold: u8,
    /// Hover / active row style.
    pub hover: HoverStyle,
}

impl Default for Theme {
    fn default() -> Self {
        themes::light()
    }
}

impl Theme {
    /// Create a new theme builder starting from the base palette.
    pub fn builder() -> ThemeBuilder {
        ThemeBuilder::new()
    }

    /// Whether the theme renders in dark mode.
    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    /// Copy of this theme in another mode.
    #[must_use]
    pub fn with_mode(&self, mode: ThemeMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Look up a color by token name, falling back to color literals.
    ///
    /// Returns `None` when the name is neither a known token nor a literal.
    #[must_use]
    pub fn color_token(&self, name: &str) -> Option<Rgb> {
        match self.colors.get(name) {
            Some(color) => Some(color.resolve(self.mode)),
            None => Rgb::parse(name),
        }
    }

    /// Whether a color counts as dark under this theme's threshold.
    #[must_use]
    pub const fn is_dark_color(&self, color: Rgb) -> bool {
        color.is_dark_at(self.contrast_threshold)
    }

    /// Names of all defined tokens, sorted.
    pub fn token_names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Load a theme from JSON, layering it over the base palette.
    ///
    /// Every field is optional. Color values are literals or the name of
    /// another token (from the base palette or the same map).
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Json`] for malformed JSON and
    /// [`StyleError::InvalidColor`] for values that are neither literals nor
    /// known tokens.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let raw: RawTheme = serde_json::from_str(json)?;
        raw.apply(ThemeBuilder::new())
    }
}

/// Builder for creating custom themes.
#[derive(Debug, Clone)]
pub struct ThemeBuilder {
    theme: Theme,
}

impl ThemeBuilder {
    /// Create a new builder starting from the base palette in light mode.
    pub fn new() -> Self {
        Self {
            theme: themes::light(),
        }
    }

    /// Start from an existing theme.
    pub fn from_theme(theme: Theme) -> Self {
        Self { theme }
    }

    /// Set the mode.
    pub fn mode(mut self, mode: ThemeMode) -> Self {
        self.theme.mode = mode;
        self
    }

    /// Define or replace a color token.
    pub fn color(mut self, name: impl Into<String>, color: impl Into<AdaptiveColor>) -> Self {
        self.theme.colors.insert(name.into(), color.into());
        self
    }

    /// Set the text color used over dark backgrounds.
    pub fn text_on_dark(mut self, color: Rgb) -> Self {
        self.theme.text.on_dark = color;
        self
    }

    /// Set the text color used over light backgrounds.
    pub fn text_on_light(mut self, color: Rgb) -> Self {
        self.theme.text.on_light = color;
        self
    }

    /// Set the alpha for one opacity level.
    pub fn opacity(mut self, level: OpacityLevel, alpha: f32) -> Self {
        match level {
            OpacityLevel::Weak => self.theme.opacity.weak = alpha,
            OpacityLevel::Medium => self.theme.opacity.medium = alpha,
            OpacityLevel::Strong => self.theme.opacity.strong = alpha,
        }
        self
    }

    /// Set the darkness threshold.
    pub fn contrast_threshold(mut self, threshold: u8) -> Self {
        self.theme.contrast_threshold = threshold;
        self
    }

    /// Set the hover row background.
    pub fn hover_background(mut self, background: impl Into<BackgroundSpec>) -> Self {
        self.theme.hover.background = background.into();
        self
    }

    /// Set the hover row text color.
    pub fn hover_color(mut self, color: impl Into<AdaptiveColor>) -> Self {
        self.theme.hover.color = color.into();
        self
    }

    /// Build the theme.
    pub fn build(self) -> Theme {
        self.theme
    }

    fn lookup(&self, value: &str) -> Option<AdaptiveColor> {
        self.theme
            .colors
            .get(value)
            .copied()
            .or_else(|| Rgb::parse(value).map(AdaptiveColor::Fixed))
    }

    fn lookup_fixed(&self, name: &str, value: &str) -> Result<Rgb, StyleError> {
        self.lookup(value)
            .map(|c| c.resolve(self.theme.mode))
            .ok_or_else(|| StyleError::InvalidColor {
                name: name.to_owned(),
                value: value.to_owned(),
            })
    }
}

impl Default for ThemeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// JSON ingestion
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTheme {
    mode: Option<ThemeMode>,
    colors: BTreeMap<String, RawColor>,
    text: Option<RawContrast>,
    opacity: Option<RawOpacity>,
    contrast_threshold: Option<u8>,
    hover: Option<RawHover>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawColor {
    Literal(String),
    Adaptive { light: String, dark: String },
}

impl RawColor {
    fn references(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            Self::Literal(v) => (v.as_str(), None),
            Self::Adaptive { light, dark } => (light.as_str(), Some(dark.as_str())),
        };
        std::iter::once(first).chain(second)
    }
}

#[derive(Debug, Deserialize)]
struct RawContrast {
    dark: Option<String>,
    light: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOpacity {
    weak: Option<f32>,
    medium: Option<f32>,
    strong: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct RawHover {
    background: Option<BackgroundSpec>,
    color: Option<RawColor>,
}

impl RawTheme {
    fn apply(self, mut builder: ThemeBuilder) -> Result<Theme, StyleError> {
        if let Some(mode) = self.mode {
            builder = builder.mode(mode);
        }
        // Tokens may reference each other. Resolve one at a time, taking an
        // entry only once every name it references is settled, so references
        // see this file's values rather than the base palette. A cycle falls
        // back to the palette as it stands.
        let mut pending = self.colors;
        while !pending.is_empty() {
            let ready = pending
                .iter()
                .find(|(name, value)| {
                    value
                        .references()
                        .all(|r| r == name.as_str() || !pending.contains_key(r))
                })
                .or_else(|| pending.iter().next())
                .map(|(name, _)| name.clone());
            let Some((name, value)) = ready.and_then(|name| pending.remove_entry(&name)) else {
                break;
            };
            let color = resolve_raw(&builder, &name, &value)?;
            builder = builder.color(name, color);
        }
        if let Some(text) = self.text {
            if let Some(dark) = text.dark.as_deref() {
                let c = builder.lookup_fixed("text.dark", dark)?;
                builder = builder.text_on_dark(c);
            }
            if let Some(light) = text.light.as_deref() {
                let c = builder.lookup_fixed("text.light", light)?;
                builder = builder.text_on_light(c);
            }
        }
        if let Some(opacity) = self.opacity {
            for (level, alpha) in [
                (OpacityLevel::Weak, opacity.weak),
                (OpacityLevel::Medium, opacity.medium),
                (OpacityLevel::Strong, opacity.strong),
            ] {
                if let Some(alpha) = alpha {
                    builder = builder.opacity(level, alpha);
                }
            }
        }
        if let Some(threshold) = self.contrast_threshold {
            builder = builder.contrast_threshold(threshold);
        }
        if let Some(hover) = self.hover {
            if let Some(background) = hover.background {
                builder = builder.hover_background(background);
            }
            if let Some(color) = hover.color {
                let c = resolve_raw(&builder, "hover.color", &color)?;
                builder = builder.hover_color(c);
            }
        }
        Ok(builder.build())
    }
}

fn resolve_raw(
    builder: &ThemeBuilder,
    name: &str,
    value: &RawColor,
) -> Result<AdaptiveColor, StyleError> {
    let invalid = |v: &str| StyleError::InvalidColor {
        name: name.to_owned(),
        value: v.to_owned(),
    };
    match value {
        RawColor::Literal(v) => builder.lookup(v).ok_or_else(|| invalid(v)),
        RawColor::Adaptive { light, dark } => {
            let l = builder.lookup(light).ok_or_else(|| invalid(light))?;
            let d = builder.lookup(dark).ok_or_else(|| invalid(dark))?;
            Ok(AdaptiveColor::adaptive(
                l.resolve(ThemeMode::Light),
                d.resolve(ThemeMode::Dark),
            ))
        }
    }
}

/// Built-in theme presets.
pub mod themes {
    use super::*;

    /// Base palette in the given mode.
    #[must_use]
    pub fn base(mode: ThemeMode) -> Theme {
        let fixed = |r, g, b| AdaptiveColor::fixed(Rgb::new(r, g, b));
        let colors: BTreeMap<String, AdaptiveColor> = [
            ("brand", fixed(0x7d, 0x4c, 0xdb)),    // Purple
            ("accent-1", fixed(0x6f, 0xff, 0xb0)), // Mint
            ("accent-2", fixed(0xfd, 0x6f, 0xff)), // Pink
            ("accent-3", fixed(0x81, 0xfc, 0xed)), // Aqua
            ("accent-4", fixed(0xff, 0xca, 0x58)), // Gold
            ("neutral-1", fixed(0x00, 0x87, 0x3d)),
            ("neutral-2", fixed(0x3d, 0x13, 0x8d)),
            ("neutral-3", fixed(0x00, 0x73, 0x9d)),
            ("neutral-4", fixed(0xa2, 0x42, 0x3d)),
            ("status-critical", fixed(0xff, 0x40, 0x40)),
            ("status-warning", fixed(0xff, 0xaa, 0x15)),
            ("status-ok", fixed(0x00, 0xc7, 0x81)),
            ("status-unknown", fixed(0xcc, 0xcc, 0xcc)),
            ("status-disabled", fixed(0xcc, 0xcc, 0xcc)),
            ("light-1", fixed(0xf8, 0xf8, 0xf8)),
            ("light-2", fixed(0xf2, 0xf2, 0xf2)),
            ("light-3", fixed(0xed, 0xed, 0xed)),
            ("light-4", fixed(0xda, 0xda, 0xda)),
            ("dark-1", fixed(0x33, 0x33, 0x33)),
            ("dark-2", fixed(0x55, 0x55, 0x55)),
            ("dark-3", fixed(0x77, 0x77, 0x77)),
            ("dark-4", fixed(0x99, 0x99, 0x99)),
            ("black", fixed(0x00, 0x00, 0x00)),
            ("white", fixed(0xff, 0xff, 0xff)),
            ("active", fixed(0xdd, 0xdd, 0xdd)), // Hover tint
            (
                "background",
                AdaptiveColor::adaptive(Rgb::WHITE, Rgb::new(0x11, 0x11, 0x11)),
            ),
            (
                "menu",
                AdaptiveColor::adaptive(Rgb::WHITE, Rgb::new(0x22, 0x22, 0x22)),
            ),
            (
                "control",
                AdaptiveColor::adaptive(Rgb::new(0x7d, 0x4c, 0xdb), Rgb::new(0x6f, 0xff, 0xb0)),
            ),
        ]
        .into_iter()
        .map(|(name, color)| (name.to_owned(), color))
        .collect();

        Theme {
            mode,
            colors,
            text: ContrastText {
                on_dark: Rgb::new(0xf8, 0xf8, 0xf8),
                on_light: Rgb::new(0x44, 0x44, 0x44),
            },
            opacity: OpacityTable::default(),
            contrast_threshold: DARK_BRIGHTNESS_THRESHOLD,
            hover: HoverStyle {
                background: StyledBackground::new()
                    .color("active")
                    .opacity(OpacityLevel::Medium)
                    .into(),
                color: AdaptiveColor::adaptive(Rgb::BLACK, Rgb::WHITE),
            },
        }
    }

    /// Light theme.
    #[must_use]
    pub fn light() -> Theme {
        base(ThemeMode::Light)
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Theme {
        base(ThemeMode::Dark)
    }
}
