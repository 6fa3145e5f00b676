//! Color types, literal parsing, and perceptual darkness.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Brightness below which a color counts as dark.
///
/// Brightness is the YIQ weighting `(299 R + 587 G + 114 B) / 1000`.
pub const DARK_BRIGHTNESS_THRESHOLD: u8 = 125;

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color literal: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`
    /// or `rgba(r, g, b, a)`. Alpha components are accepted and discarded.
    #[must_use]
    pub fn parse(literal: &str) -> Option<Self> {
        let s = literal.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        let body = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let mut parts = body.split(',').map(str::trim);
        let r = parts.next()?.parse::<u8>().ok()?;
        let g = parts.next()?.parse::<u8>().ok()?;
        let b = parts.next()?.parse::<u8>().ok()?;
        Some(Self::new(r, g, b))
    }

    /// Perceived brightness weighted as YIQ luma (0 = black, 255 = white).
    #[must_use]
    pub const fn brightness_u8(self) -> u8 {
        let weighted = self.weighted_brightness();
        ((weighted + 500) / 1000) as u8
    }

    /// Whether the color is darker than `threshold` on the brightness scale.
    ///
    /// The comparison is exact (no rounding), so a color sitting exactly on
    /// the threshold counts as light.
    #[must_use]
    pub const fn is_dark_at(self, threshold: u8) -> bool {
        self.weighted_brightness() < threshold as u32 * 1000
    }

    /// Whether the color is dark at [`DARK_BRIGHTNESS_THRESHOLD`].
    #[must_use]
    pub const fn is_dark(self) -> bool {
        self.is_dark_at(DARK_BRIGHTNESS_THRESHOLD)
    }

    /// Attach an opacity in `0.0..=1.0` (clamped; NaN counts as opaque).
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Rgba {
        let alpha = if opacity.is_nan() {
            255
        } else {
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        Rgba::new(self.r, self.g, self.b, alpha)
    }

    /// This color as a fully opaque [`Rgba`].
    #[must_use]
    pub const fn opaque(self) -> Rgba {
        Rgba::new(self.r, self.g, self.b, 255)
    }

    const fn weighted_brightness(self) -> u32 {
        299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        Self::parse(&literal)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color literal {literal:?}")))
    }
}

/// RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The color channels without alpha.
    ///
    /// Darkness classification of a translucent fill looks at these channels
    /// only; what the fill is composited over is unknown here.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Whether alpha is 255.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.rgb())
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 | 4 => {
            let digit = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 | 8 => Some(Rgb::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_hex() {
        assert_eq!(Rgb::parse("#7D4CDB"), Some(Rgb::new(0x7d, 0x4c, 0xdb)));
        assert_eq!(Rgb::parse("#7d4cdbff"), Some(Rgb::new(0x7d, 0x4c, 0xdb)));
    }

    #[test]
    fn parse_short_hex_expands_digits() {
        assert_eq!(Rgb::parse("#fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse("#a0c"), Some(Rgb::new(0xaa, 0x00, 0xcc)));
    }

    #[test]
    fn parse_rgb_functions() {
        assert_eq!(Rgb::parse("rgb(1, 2, 3)"), Some(Rgb::new(1, 2, 3)));
        assert_eq!(
            Rgb::parse("RGBA(221,221,221,0.5)"),
            Some(Rgb::new(221, 221, 221))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Rgb::parse("brand"), None);
        assert_eq!(Rgb::parse("#12"), None);
        assert_eq!(Rgb::parse("#gggggg"), None);
        assert_eq!(Rgb::parse("rgb(300, 0, 0)"), None);
        assert_eq!(Rgb::parse("#é12"), None);
    }

    #[test]
    fn brightness_extremes() {
        assert_eq!(Rgb::BLACK.brightness_u8(), 0);
        assert_eq!(Rgb::WHITE.brightness_u8(), 255);
    }

    #[test]
    fn green_dominates_brightness() {
        let green = Rgb::new(0, 128, 0).brightness_u8();
        let red = Rgb::new(128, 0, 0).brightness_u8();
        let blue = Rgb::new(0, 0, 128).brightness_u8();
        assert!(green > red);
        assert!(red > blue);
    }

    #[test]
    fn darkness_threshold_is_exclusive() {
        // 299*125 + 587*125 + 114*125 = 125_000: exactly on the threshold.
        assert!(!Rgb::new(125, 125, 125).is_dark());
        assert!(Rgb::new(124, 125, 125).is_dark());
    }

    #[test]
    fn brand_purple_is_dark() {
        assert!(Rgb::new(0x7d, 0x4c, 0xdb).is_dark());
        assert!(!Rgb::new(0x6f, 0xff, 0xb0).is_dark());
    }

    #[test]
    fn opacity_rounds_and_clamps() {
        let c = Rgb::new(10, 20, 30);
        assert_eq!(c.with_opacity(0.4).a, 102);
        assert_eq!(c.with_opacity(1.5).a, 255);
        assert_eq!(c.with_opacity(-1.0).a, 0);
        assert_eq!(c.with_opacity(f32::NAN).a, 255);
        assert_eq!(c.with_opacity(0.4).rgb(), c);
    }

    #[test]
    fn display_forms() {
        assert_eq!(Rgb::new(0x7d, 0x4c, 0xdb).to_string(), "#7d4cdb");
        assert_eq!(Rgb::WHITE.opaque().to_string(), "#ffffff");
        assert_eq!(Rgba::new(0, 0, 0, 0x66).to_string(), "#00000066");
    }

    #[test]
    fn deserialize_literal() {
        let c: Rgb = serde_json::from_str("\"#333\"").unwrap();
        assert_eq!(c, Rgb::new(0x33, 0x33, 0x33));
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
