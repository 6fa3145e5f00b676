#![forbid(unsafe_code)]

//! Background resolution: turning a [`BackgroundSpec`] plus a [`Theme`] into
//! concrete [`Paint`].
//!
//! A background is either a bare token (`"brand"`, `"#333"`, `"url(bg.png)"`)
//! or a [`StyledBackground`] carrying any of a color, an image, an opacity
//! level and an explicit darkness hint. Styled backgrounds may also carry
//! per-mode variants that replace them wholesale when the theme is in that
//! mode.
//!
//! Resolution never fails: a token that names no known color yields `None`
//! ("no paint"), and a styled background with nothing resolvable yields a
//! [`Paint`] with no fill.
//!
//! # Example
//! ```
//! use dropmenu_style::background::{BackgroundSpec, StyledBackground, TextColor};
//! use dropmenu_style::theme::{OpacityLevel, themes};
//!
//! let theme = themes::light();
//! let spec: BackgroundSpec = StyledBackground::new()
//!     .color("brand")
//!     .opacity(OpacityLevel::Strong)
//!     .into();
//! let paint = spec.resolve(&theme).unwrap();
//! assert_eq!(paint.text, TextColor::Forced(theme.text.on_dark));
//! ```

use serde::Deserialize;

use crate::color::{Rgb, Rgba};
use crate::theme::{OpacityLevel, Theme};

/// Default image position when none is given.
pub const DEFAULT_IMAGE_POSITION: &str = "center center";

/// A background description, before theme resolution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBackground")]
pub enum BackgroundSpec {
    /// A color token, color literal, or `url(...)` image reference.
    Token(String),
    /// A structured background.
    Styled(StyledBackground),
}

impl BackgroundSpec {
    /// Create a token background.
    pub fn token(name: impl Into<String>) -> Self {
        Self::Token(name.into())
    }

    /// Resolve against a theme. See [`resolve_background`].
    #[must_use]
    pub fn resolve(&self, theme: &Theme) -> Option<Paint> {
        resolve_background(self, theme)
    }

    /// Whether this background reads as dark. See [`background_is_dark`].
    #[must_use]
    pub fn is_dark(&self, theme: &Theme) -> Option<bool> {
        background_is_dark(self, theme)
    }

    /// Pick the per-mode variant if one applies.
    fn normalize<'a>(&'a self, theme: &Theme) -> &'a BackgroundSpec {
        let Self::Styled(styled) = self else {
            return self;
        };
        let variant = if theme.is_dark() {
            styled.dark_variant.as_deref()
        } else {
            styled.light_variant.as_deref()
        };
        variant.unwrap_or(self)
    }
}

impl From<&str> for BackgroundSpec {
    fn from(name: &str) -> Self {
        Self::Token(name.to_owned())
    }
}

impl From<String> for BackgroundSpec {
    fn from(name: String) -> Self {
        Self::Token(name)
    }
}

impl From<StyledBackground> for BackgroundSpec {
    fn from(styled: StyledBackground) -> Self {
        Self::Styled(styled)
    }
}

/// A structured background.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyledBackground {
    /// Color token or literal.
    pub color: Option<String>,
    /// Image reference, e.g. `url(hero.png)`.
    pub image: Option<String>,
    /// Image position; defaults to [`DEFAULT_IMAGE_POSITION`].
    pub position: Option<String>,
    /// Translucency level for the color layer.
    pub opacity: Option<OpacityLevel>,
    /// Explicit darkness hint, overriding computed contrast.
    pub dark: Option<bool>,
    /// Replacement used when the theme is light.
    pub light_variant: Option<Box<BackgroundSpec>>,
    /// Replacement used when the theme is dark.
    pub dark_variant: Option<Box<BackgroundSpec>>,
}

impl StyledBackground {
    /// Empty styled background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color token.
    #[must_use]
    pub fn color(mut self, token: impl Into<String>) -> Self {
        self.color = Some(token.into());
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Set the image position.
    #[must_use]
    pub fn position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Set the opacity level.
    #[must_use]
    pub fn opacity(mut self, level: OpacityLevel) -> Self {
        self.opacity = Some(level);
        self
    }

    /// Set the darkness hint.
    #[must_use]
    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = Some(dark);
        self
    }

    /// Set the light-mode replacement.
    #[must_use]
    pub fn light_variant(mut self, variant: impl Into<BackgroundSpec>) -> Self {
        self.light_variant = Some(Box::new(variant.into()));
        self
    }

    /// Set the dark-mode replacement.
    #[must_use]
    pub fn dark_variant(mut self, variant: impl Into<BackgroundSpec>) -> Self {
        self.dark_variant = Some(Box::new(variant.into()));
        self
    }
}

/// Text color decision carried by a [`Paint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextColor {
    /// Leave the surrounding text color alone.
    #[default]
    Inherit,
    /// Force this text color.
    Forced(Rgb),
}

impl TextColor {
    /// The forced color, if any.
    #[must_use]
    pub const fn forced(self) -> Option<Rgb> {
        match self {
            Self::Inherit => None,
            Self::Forced(c) => Some(c),
        }
    }
}

/// An image layer: always `no-repeat`, sized to `cover`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLayer {
    /// Image reference as given.
    pub source: String,
    /// Position within the surface.
    pub position: String,
}

impl ImageLayer {
    /// Image layers never tile.
    pub const REPEAT: bool = false;
    /// Image layers cover the whole surface.
    pub const COVER: bool = true;

    fn new(source: &str, position: Option<&str>) -> Self {
        Self {
            source: source.to_owned(),
            position: position.unwrap_or(DEFAULT_IMAGE_POSITION).to_owned(),
        }
    }
}

/// Resolved paint for a surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    /// Background fill; `None` means no fill is applied.
    pub fill: Option<Rgba>,
    /// Optional image layer, painted above the fill.
    pub image: Option<ImageLayer>,
    /// Text color decision.
    pub text: TextColor,
}

impl Paint {
    /// Whether this paint draws nothing and leaves text alone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fill.is_none() && self.image.is_none() && self.text == TextColor::Inherit
    }
}

/// Resolve a background against a theme.
///
/// 1. Per-mode variants replace the spec (once).
/// 2. Tokens paint a solid fill with contrasting text, or an image layer for
///    `url(...)` references. Unknown tokens yield `None`.
/// 3. Styled backgrounds stack an image layer and a color layer, then apply
///    the explicit `dark` hint. A weak color layer never touches the text
///    color.
#[must_use]
pub fn resolve_background(spec: &BackgroundSpec, theme: &Theme) -> Option<Paint> {
    match spec.normalize(theme) {
        BackgroundSpec::Token(name) => resolve_token(name, theme),
        BackgroundSpec::Styled(styled) => Some(resolve_styled(styled, theme)),
    }
}

fn resolve_token(name: &str, theme: &Theme) -> Option<Paint> {
    if name.starts_with("url") {
        return Some(Paint {
            fill: None,
            image: Some(ImageLayer::new(name, None)),
            text: TextColor::Inherit,
        });
    }
    let Some(color) = theme.color_token(name) else {
        dropmenu_core::debug!(token = name, "unresolvable background token");
        return None;
    };
    Some(Paint {
        fill: Some(color.opaque()),
        image: None,
        text: TextColor::Forced(theme.text.for_background(theme.is_dark_color(color))),
    })
}

fn resolve_styled(styled: &StyledBackground, theme: &Theme) -> Paint {
    let mut paint = Paint::default();

    if let Some(image) = styled.image.as_deref() {
        paint.image = Some(ImageLayer::new(image, styled.position.as_deref()));
        paint.text = match styled.dark {
            Some(dark) => TextColor::Forced(theme.text.for_background(dark)),
            None => TextColor::Inherit,
        };
    }

    if let Some(token) = styled.color.as_deref() {
        match theme.color_token(token) {
            Some(color) => {
                let fill = match styled.opacity {
                    Some(level) => color.with_opacity(theme.opacity.alpha(level)),
                    None => color.opaque(),
                };
                paint.fill = Some(fill);
                if styled.opacity != Some(OpacityLevel::Weak) {
                    let dark = styled
                        .dark
                        .unwrap_or_else(|| theme.is_dark_color(fill.rgb()));
                    paint.text = TextColor::Forced(theme.text.for_background(dark));
                }
            }
            None => {
                dropmenu_core::debug!(token = token, "unresolvable background color");
            }
        }
    }

    match styled.dark {
        Some(false) => paint.text = TextColor::Forced(theme.text.on_light),
        Some(true) => paint.text = TextColor::Forced(theme.text.on_dark),
        None => {}
    }

    paint
}

/// Whether a background reads as dark under a theme.
///
/// An explicit `dark` hint wins. Otherwise a color (unless weak) or a token
/// is classified by its perceptual darkness. Returns `None` when darkness
/// can't be determined.
#[must_use]
pub fn background_is_dark(spec: &BackgroundSpec, theme: &Theme) -> Option<bool> {
    match spec.normalize(theme) {
        BackgroundSpec::Token(name) => theme.color_token(name).map(|c| theme.is_dark_color(c)),
        BackgroundSpec::Styled(styled) => {
            if let Some(dark) = styled.dark {
                return Some(dark);
            }
            if styled.opacity == Some(OpacityLevel::Weak) {
                return None;
            }
            styled
                .color
                .as_deref()
                .and_then(|token| theme.color_token(token))
                .map(|c| theme.is_dark_color(c))
        }
    }
}

/// Paint for hovered / keyboard-active rows.
///
/// The theme's hover background, with text forced to the hover color.
#[must_use]
pub fn active_paint(theme: &Theme) -> Paint {
    let mut paint = resolve_background(&theme.hover.background, theme).unwrap_or_default();
    paint.text = TextColor::Forced(theme.hover.color.resolve(theme.mode));
    paint
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBackground {
    Token(String),
    Styled(RawStyled),
}

#[derive(Deserialize)]
struct RawStyled {
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    position: Option<String>,
    #[serde(default)]
    opacity: Option<RawOpacity>,
    #[serde(default)]
    dark: Option<RawVariant>,
    #[serde(default)]
    light: Option<RawVariant>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOpacity {
    Flag(bool),
    Level(OpacityLevel),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVariant {
    Flag(bool),
    Variant(Box<BackgroundSpec>),
}

impl From<RawBackground> for BackgroundSpec {
    fn from(raw: RawBackground) -> Self {
        match raw {
            RawBackground::Token(name) => Self::Token(name),
            RawBackground::Styled(s) => {
                let opacity = match s.opacity {
                    Some(RawOpacity::Flag(true)) => Some(OpacityLevel::Medium),
                    Some(RawOpacity::Level(level)) => Some(level),
                    Some(RawOpacity::Flag(false)) | None => None,
                };
                let (dark, dark_variant) = match s.dark {
                    Some(RawVariant::Flag(b)) => (Some(b), None),
                    Some(RawVariant::Variant(v)) => (None, Some(v)),
                    None => (None, None),
                };
                let light_variant = match s.light {
                    Some(RawVariant::Variant(v)) => Some(v),
                    Some(RawVariant::Flag(_)) | None => None,
                };
                Self::Styled(StyledBackground {
                    color: s.color,
                    image: s.image,
                    position: s.position,
                    opacity,
                    dark,
                    light_variant,
                    dark_variant,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::themes;

    fn styled() -> StyledBackground {
        StyledBackground::new()
    }

    #[test]
    fn dark_token_forces_dark_contrast_text() {
        let theme = themes::light();
        let paint = resolve_background(&"brand".into(), &theme).unwrap();
        assert_eq!(paint.fill, Some(Rgb::new(0x7d, 0x4c, 0xdb).opaque()));
        assert_eq!(paint.text, TextColor::Forced(theme.text.on_dark));
        assert!(paint.image.is_none());
    }

    #[test]
    fn light_token_forces_light_contrast_text() {
        let theme = themes::light();
        let paint = resolve_background(&"light-2".into(), &theme).unwrap();
        assert_eq!(paint.text, TextColor::Forced(theme.text.on_light));
    }

    #[test]
    fn literal_token_resolves() {
        let theme = themes::light();
        let paint = resolve_background(&"#000000".into(), &theme).unwrap();
        assert_eq!(paint.fill, Some(Rgba::new(0, 0, 0, 255)));
    }

    #[test]
    fn unknown_token_is_no_paint() {
        assert_eq!(resolve_background(&"nope".into(), &themes::light()), None);
    }

    #[test]
    fn url_token_is_cover_image_with_inherited_text() {
        let paint = resolve_background(&"url(bg.png)".into(), &themes::dark()).unwrap();
        let image = paint.image.unwrap();
        assert_eq!(image.source, "url(bg.png)");
        assert_eq!(image.position, DEFAULT_IMAGE_POSITION);
        assert_eq!(paint.text, TextColor::Inherit);
        assert!(paint.fill.is_none());
    }

    #[test]
    fn image_text_follows_dark_hint() {
        let theme = themes::light();
        let img = styled().image("url(a.png)").position("top left");
        let plain = resolve_background(&img.clone().into(), &theme).unwrap();
        assert_eq!(plain.text, TextColor::Inherit);
        assert_eq!(plain.image.unwrap().position, "top left");

        let dark = resolve_background(&img.clone().dark(true).into(), &theme).unwrap();
        assert_eq!(dark.text, TextColor::Forced(theme.text.on_dark));

        let light = resolve_background(&img.dark(false).into(), &theme).unwrap();
        assert_eq!(light.text, TextColor::Forced(theme.text.on_light));
    }

    #[test]
    fn opacity_levels_blend_alpha() {
        let theme = themes::light();
        let alpha = |level| {
            resolve_background(&styled().color("brand").opacity(level).into(), &theme)
                .unwrap()
                .fill
                .unwrap()
                .a
        };
        assert_eq!(alpha(OpacityLevel::Weak), 26);
        assert_eq!(alpha(OpacityLevel::Medium), 102);
        assert_eq!(alpha(OpacityLevel::Strong), 204);
    }

    #[test]
    fn weak_opacity_leaves_text_alone() {
        let theme = themes::light();
        let paint =
            resolve_background(&styled().color("brand").opacity(OpacityLevel::Weak).into(), &theme)
                .unwrap();
        assert!(paint.fill.is_some());
        assert_eq!(paint.text, TextColor::Inherit);
    }

    #[test]
    fn weak_opacity_still_honors_dark_hint() {
        let theme = themes::light();
        let spec = styled()
            .color("brand")
            .opacity(OpacityLevel::Weak)
            .dark(false);
        let paint = resolve_background(&spec.into(), &theme).unwrap();
        assert_eq!(paint.text, TextColor::Forced(theme.text.on_light));
    }

    #[test]
    fn dark_hint_overrides_computed_contrast() {
        let theme = themes::light();
        // brand is dark, but the hint says light
        let paint = resolve_background(&styled().color("brand").dark(false).into(), &theme).unwrap();
        assert_eq!(paint.text, TextColor::Forced(theme.text.on_light));
        let paint = resolve_background(&styled().color("light-1").dark(true).into(), &theme).unwrap();
        assert_eq!(paint.text, TextColor::Forced(theme.text.on_dark));
    }

    #[test]
    fn bare_dark_hint_forces_dark_contrast() {
        let theme = themes::light();
        let paint = resolve_background(&styled().dark(true).into(), &theme).unwrap();
        assert_eq!(paint.text, TextColor::Forced(theme.text.on_dark));
        assert!(paint.fill.is_none());
    }

    #[test]
    fn unresolvable_styled_color_has_no_fill() {
        let paint = resolve_background(&styled().color("nope").into(), &themes::light()).unwrap();
        assert!(paint.is_empty());
    }

    #[test]
    fn variants_follow_theme_mode() {
        let spec: BackgroundSpec = styled()
            .color("light-1")
            .dark_variant("dark-1")
            .light_variant(styled().color("white"))
            .into();
        let dark = resolve_background(&spec, &themes::dark()).unwrap();
        assert_eq!(dark.fill, Some(Rgb::new(0x33, 0x33, 0x33).opaque()));
        let light = resolve_background(&spec, &themes::light()).unwrap();
        assert_eq!(light.fill, Some(Rgb::WHITE.opaque()));
    }

    #[test]
    fn variant_substitution_happens_once() {
        let inner = styled().color("dark-1").dark_variant("brand");
        let spec: BackgroundSpec = styled().dark_variant(inner).into();
        let paint = resolve_background(&spec, &themes::dark()).unwrap();
        assert_eq!(paint.fill, Some(Rgb::new(0x33, 0x33, 0x33).opaque()));
    }

    #[test]
    fn is_dark_classification() {
        let theme = themes::light();
        assert_eq!(background_is_dark(&"brand".into(), &theme), Some(true));
        assert_eq!(background_is_dark(&"light-1".into(), &theme), Some(false));
        assert_eq!(background_is_dark(&"nope".into(), &theme), None);
        assert_eq!(background_is_dark(&"url(x.png)".into(), &theme), None);
        assert_eq!(
            background_is_dark(&styled().color("light-1").dark(true).into(), &theme),
            Some(true)
        );
        assert_eq!(
            background_is_dark(&styled().color("brand").opacity(OpacityLevel::Weak).into(), &theme),
            None
        );
        assert_eq!(
            background_is_dark(&styled().image("url(a.png)").into(), &theme),
            None
        );
    }

    #[test]
    fn active_paint_uses_hover_style() {
        let light = themes::light();
        let paint = active_paint(&light);
        assert_eq!(paint.fill, Some(Rgb::new(0xdd, 0xdd, 0xdd).with_opacity(0.4)));
        assert_eq!(paint.text, TextColor::Forced(Rgb::BLACK));
        let dark = themes::dark();
        assert_eq!(active_paint(&dark).text, TextColor::Forced(Rgb::WHITE));
    }

    #[test]
    fn deserialize_token_and_styled() {
        let token: BackgroundSpec = serde_json::from_str(r#""brand""#).unwrap();
        assert_eq!(token, BackgroundSpec::token("brand"));

        let spec: BackgroundSpec = serde_json::from_str(
            r#"{"color": "brand", "opacity": true, "dark": {"color": "dark-1"}, "light": false}"#,
        )
        .unwrap();
        let BackgroundSpec::Styled(s) = spec else {
            panic!("expected styled");
        };
        assert_eq!(s.opacity, Some(OpacityLevel::Medium));
        assert_eq!(s.dark, None);
        assert_eq!(
            s.dark_variant.as_deref(),
            Some(&BackgroundSpec::Styled(styled().color("dark-1")))
        );
        assert!(s.light_variant.is_none());
    }

    #[test]
    fn deserialize_opacity_and_dark_flags() {
        let spec: BackgroundSpec =
            serde_json::from_str(r#"{"color": "brand", "opacity": "weak", "dark": true}"#).unwrap();
        assert_eq!(
            spec,
            styled()
                .color("brand")
                .opacity(OpacityLevel::Weak)
                .dark(true)
                .into()
        );
        let spec: BackgroundSpec = serde_json::from_str(r#"{"color": "brand", "opacity": false}"#).unwrap();
        assert_eq!(spec, styled().color("brand").into());
    }
}
