#![forbid(unsafe_code)]

//! Layered configuration for disclosures and menus.
//!
//! Options resolve in three layers, lowest first:
//!
//! 1. [`GlobalDefaults`]: application-wide settings.
//! 2. Component defaults ([`DisclosureOptions::component_defaults`],
//!    [`MenuOptions::component_defaults`]).
//! 3. Caller options.
//!
//! Every option field is an `Option`; a higher layer wins wherever it sets a
//! value. Layers are plain immutable values merged once at construction.
//! Options deserialize from JSON so defaults can ship as data files.

use std::fmt;

use dropmenu_style::BackgroundSpec;
use serde::Deserialize;
use serde_json::Value;

/// Default trigger label for menus.
pub const DEFAULT_OPEN_LABEL: &str = "Open Menu";
/// Default label for the in-panel close control.
pub const DEFAULT_CLOSE_LABEL: &str = "Close Menu";

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Vertical anchor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalEdge {
    /// The anchor's top edge.
    Top,
    /// The anchor's bottom edge.
    Bottom,
}

/// Horizontal anchor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalEdge {
    /// The anchor's left edge.
    Left,
    /// The anchor's right edge.
    Right,
}

/// How a panel aligns against its anchor.
///
/// Each field names the panel edge being aligned and the anchor edge it
/// lines up with. `top: Some(Bottom)` puts the panel's top on the anchor's
/// bottom (a dropdown); `bottom: Some(Top)` puts the panel's bottom on the
/// anchor's top (a drop-up).
///
/// Deserialization is lenient: unknown edge names are dropped and a missing
/// axis falls back to the default (`top: top`, `left: left`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Value")]
pub struct Alignment {
    /// Panel top edge.
    pub top: Option<VerticalEdge>,
    /// Panel bottom edge.
    pub bottom: Option<VerticalEdge>,
    /// Panel left edge.
    pub left: Option<HorizontalEdge>,
    /// Panel right edge.
    pub right: Option<HorizontalEdge>,
}

impl Default for Alignment {
    fn default() -> Self {
        Self {
            top: Some(VerticalEdge::Top),
            bottom: None,
            left: Some(HorizontalEdge::Left),
            right: None,
        }
    }
}

impl Alignment {
    /// Alignment with no edges set. Use [`Alignment::normalized`] to fill in
    /// defaults.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            top: None,
            bottom: None,
            left: None,
            right: None,
        }
    }

    /// Set the panel top edge.
    #[must_use]
    pub const fn top(mut self, edge: VerticalEdge) -> Self {
        self.top = Some(edge);
        self
    }

    /// Set the panel bottom edge.
    #[must_use]
    pub const fn bottom(mut self, edge: VerticalEdge) -> Self {
        self.bottom = Some(edge);
        self
    }

    /// Set the panel left edge.
    #[must_use]
    pub const fn left(mut self, edge: HorizontalEdge) -> Self {
        self.left = Some(edge);
        self
    }

    /// Set the panel right edge.
    #[must_use]
    pub const fn right(mut self, edge: HorizontalEdge) -> Self {
        self.right = Some(edge);
        self
    }

    /// Fill in missing axes from the default.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        if self.top.is_none() && self.bottom.is_none() {
            self.top = Some(VerticalEdge::Top);
        }
        if self.left.is_none() && self.right.is_none() {
            self.left = Some(HorizontalEdge::Left);
        }
        self
    }

    /// Whether a close control belongs at the top of the panel.
    #[must_use]
    pub fn mirror_at_top(&self) -> bool {
        self.top == Some(VerticalEdge::Top)
    }

    /// Whether a close control belongs at the bottom of the panel.
    #[must_use]
    pub fn mirror_at_bottom(&self) -> bool {
        self.bottom == Some(VerticalEdge::Bottom)
    }
}

impl From<Value> for Alignment {
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        let vertical = |key: &str| match map.get(key).and_then(Value::as_str) {
            Some("top") => Some(VerticalEdge::Top),
            Some("bottom") => Some(VerticalEdge::Bottom),
            _ => None,
        };
        let horizontal = |key: &str| match map.get(key).and_then(Value::as_str) {
            Some("left") => Some(HorizontalEdge::Left),
            Some("right") => Some(HorizontalEdge::Right),
            _ => None,
        };
        Self {
            top: vertical("top"),
            bottom: vertical("bottom"),
            left: horizontal("left"),
            right: horizontal("right"),
        }
        .normalized()
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Resolved menu labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuMessages {
    /// Trigger label.
    pub open_menu: String,
    /// In-panel close control label.
    pub close_menu: String,
}

impl Default for MenuMessages {
    fn default() -> Self {
        Self {
            open_menu: DEFAULT_OPEN_LABEL.to_owned(),
            close_menu: DEFAULT_CLOSE_LABEL.to_owned(),
        }
    }
}

/// Partial menu labels, one configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessageOptions {
    /// Trigger label.
    pub open_menu: Option<String>,
    /// In-panel close control label.
    pub close_menu: Option<String>,
}

impl MessageOptions {
    fn overlay(&self, over: &Self) -> Self {
        Self {
            open_menu: over.open_menu.clone().or_else(|| self.open_menu.clone()),
            close_menu: over.close_menu.clone().or_else(|| self.close_menu.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Option layers
// ---------------------------------------------------------------------------

/// Application-wide defaults, the lowest configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobalDefaults {
    /// Default panel alignment.
    pub alignment: Option<Alignment>,
    /// Default panel background.
    pub panel_background: Option<BackgroundSpec>,
    /// Default menu labels.
    pub messages: MessageOptions,
}

impl GlobalDefaults {
    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the input is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    fn disclosure_layer(&self) -> DisclosureOptions {
        DisclosureOptions {
            alignment: self.alignment,
            panel_background: self.panel_background.clone(),
            ..DisclosureOptions::default()
        }
    }

    fn menu_layer(&self) -> MenuOptions {
        MenuOptions {
            disclosure: self.disclosure_layer(),
            messages: self.messages.clone(),
        }
    }
}

/// One layer of disclosure options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisclosureOptions {
    /// Identifier; the panel mounts as `"{id}__drop"`.
    pub id: Option<String>,
    /// Whether the trigger ignores activation.
    pub disabled: Option<bool>,
    /// Panel alignment.
    pub alignment: Option<Alignment>,
    /// Panel background.
    pub panel_background: Option<BackgroundSpec>,
}

impl DisclosureOptions {
    /// Defaults owned by the disclosure component.
    #[must_use]
    pub fn component_defaults() -> Self {
        Self {
            id: None,
            disabled: Some(false),
            alignment: Some(Alignment::default()),
            panel_background: None,
        }
    }

    /// Parse a layer from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the input is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// This layer with `over` laid on top.
    #[must_use]
    pub fn overlay(&self, over: &Self) -> Self {
        Self {
            id: over.id.clone().or_else(|| self.id.clone()),
            disabled: over.disabled.or(self.disabled),
            alignment: over.alignment.or(self.alignment),
            panel_background: over
                .panel_background
                .clone()
                .or_else(|| self.panel_background.clone()),
        }
    }

    /// Merge layers (lowest first) into a concrete config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the merged id is empty or contains
    /// whitespace.
    pub fn resolve(layers: &[&Self]) -> Result<DisclosureConfig, ConfigError> {
        let merged = layers
            .iter()
            .fold(Self::default(), |acc, layer| acc.overlay(layer));
        merged.into_config()
    }

    /// Resolve caller options over component and global defaults.
    ///
    /// # Errors
    ///
    /// See [`DisclosureOptions::resolve`].
    pub fn resolve_with(&self, global: &GlobalDefaults) -> Result<DisclosureConfig, ConfigError> {
        Self::resolve(&[&global.disclosure_layer(), &Self::component_defaults(), self])
    }

    fn into_config(self) -> Result<DisclosureConfig, ConfigError> {
        if let Some(id) = &self.id {
            validate_id(id)?;
        }
        Ok(DisclosureConfig {
            id: self.id,
            disabled: self.disabled.unwrap_or(false),
            alignment: self.alignment.unwrap_or_default().normalized(),
            panel_background: self.panel_background,
        })
    }
}

/// One layer of menu options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    /// Options for the underlying disclosure.
    #[serde(flatten)]
    pub disclosure: DisclosureOptions,
    /// Labels.
    pub messages: MessageOptions,
}

impl MenuOptions {
    /// Defaults owned by the menu component.
    ///
    /// Menus paint their panel with the theme's `menu` token.
    #[must_use]
    pub fn component_defaults() -> Self {
        Self {
            disclosure: DisclosureOptions {
                panel_background: Some(BackgroundSpec::token("menu")),
                ..DisclosureOptions::component_defaults()
            },
            messages: MessageOptions {
                open_menu: Some(DEFAULT_OPEN_LABEL.to_owned()),
                close_menu: Some(DEFAULT_CLOSE_LABEL.to_owned()),
            },
        }
    }

    /// Parse a layer from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the input is malformed.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// This layer with `over` laid on top.
    #[must_use]
    pub fn overlay(&self, over: &Self) -> Self {
        Self {
            disclosure: self.disclosure.overlay(&over.disclosure),
            messages: self.messages.overlay(&over.messages),
        }
    }

    /// Merge layers (lowest first) into a concrete config.
    ///
    /// # Errors
    ///
    /// See [`DisclosureOptions::resolve`].
    pub fn resolve(layers: &[&Self]) -> Result<MenuConfig, ConfigError> {
        let merged = layers
            .iter()
            .fold(Self::default(), |acc, layer| acc.overlay(layer));
        let defaults = MenuMessages::default();
        Ok(MenuConfig {
            disclosure: merged.disclosure.into_config()?,
            messages: MenuMessages {
                open_menu: merged.messages.open_menu.unwrap_or(defaults.open_menu),
                close_menu: merged.messages.close_menu.unwrap_or(defaults.close_menu),
            },
        })
    }

    /// Resolve caller options over component and global defaults.
    ///
    /// # Errors
    ///
    /// See [`DisclosureOptions::resolve`].
    pub fn resolve_with(&self, global: &GlobalDefaults) -> Result<MenuConfig, ConfigError> {
        Self::resolve(&[&global.menu_layer(), &Self::component_defaults(), self])
    }
}

fn validate_id(id: &str) -> Result<(), ConfigError> {
    if id.is_empty() {
        return Err(ConfigError::Invalid {
            field: "id",
            reason: "must not be empty".to_owned(),
        });
    }
    if id.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            field: "id",
            reason: format!("'{id}' contains whitespace"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Resolved configs
// ---------------------------------------------------------------------------

/// Resolved disclosure configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DisclosureConfig {
    /// Identifier; the panel mounts as `"{id}__drop"`.
    pub id: Option<String>,
    /// Whether the trigger ignores activation.
    pub disabled: bool,
    /// Panel alignment.
    pub alignment: Alignment,
    /// Panel background.
    pub panel_background: Option<BackgroundSpec>,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            id: None,
            disabled: false,
            alignment: Alignment::default(),
            panel_background: None,
        }
    }
}

impl DisclosureConfig {
    /// Panel identifier derived from the disclosure id.
    #[must_use]
    pub fn panel_id(&self) -> Option<String> {
        self.id.as_ref().map(|id| format!("{id}__drop"))
    }
}

/// Resolved menu configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    /// Underlying disclosure settings.
    pub disclosure: DisclosureConfig,
    /// Labels.
    pub messages: MenuMessages,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            disclosure: DisclosureConfig {
                panel_background: Some(BackgroundSpec::token("menu")),
                ..DisclosureConfig::default()
            },
            messages: MenuMessages::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error ingesting configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Malformed JSON.
    Json(serde_json::Error),
    /// A field held an unusable value.
    Invalid {
        /// Field name.
        field: &'static str,
        /// What was wrong.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "config JSON error: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_default_is_top_left() {
        let a = Alignment::default();
        assert_eq!(a.top, Some(VerticalEdge::Top));
        assert_eq!(a.left, Some(HorizontalEdge::Left));
        assert!(a.mirror_at_top());
        assert!(!a.mirror_at_bottom());
    }

    #[test]
    fn alignment_lenient_parse() {
        let a: Alignment = serde_json::from_str(r#"{"bottom": "bottom", "right": "sideways"}"#).unwrap();
        assert_eq!(a.bottom, Some(VerticalEdge::Bottom));
        assert_eq!(a.top, None);
        assert_eq!(a.right, None);
        assert_eq!(a.left, Some(HorizontalEdge::Left));
        assert!(a.mirror_at_bottom());

        let a: Alignment = serde_json::from_str(r#""diagonal""#).unwrap();
        assert_eq!(a, Alignment::default());
        let a: Alignment = serde_json::from_str(r#"{"top": 3}"#).unwrap();
        assert_eq!(a, Alignment::default());
    }

    #[test]
    fn both_mirrors_when_stretched() {
        let a = Alignment::empty()
            .top(VerticalEdge::Top)
            .bottom(VerticalEdge::Bottom);
        assert!(a.mirror_at_top());
        assert!(a.mirror_at_bottom());
    }

    #[test]
    fn drop_up_has_no_mirror() {
        let a = Alignment::empty().bottom(VerticalEdge::Top).normalized();
        assert!(!a.mirror_at_top());
        assert!(!a.mirror_at_bottom());
    }

    #[test]
    fn layers_resolve_top_down() {
        let global = GlobalDefaults {
            alignment: Some(Alignment::empty().top(VerticalEdge::Bottom)),
            panel_background: Some(BackgroundSpec::token("light-2")),
            messages: MessageOptions {
                open_menu: Some("Menu".to_owned()),
                close_menu: None,
            },
        };
        let caller = MenuOptions {
            messages: MessageOptions {
                open_menu: None,
                close_menu: Some("Done".to_owned()),
            },
            ..MenuOptions::default()
        };
        let config = caller.resolve_with(&global).unwrap();
        // Component defaults sit above global defaults.
        assert_eq!(config.disclosure.alignment, Alignment::default());
        assert_eq!(
            config.disclosure.panel_background,
            Some(BackgroundSpec::token("menu"))
        );
        assert_eq!(config.messages.open_menu, DEFAULT_OPEN_LABEL);
        assert_eq!(config.messages.close_menu, "Done");
    }

    #[test]
    fn global_layer_fills_gaps() {
        let global = GlobalDefaults {
            panel_background: Some(BackgroundSpec::token("light-2")),
            ..GlobalDefaults::default()
        };
        let config = DisclosureOptions::default().resolve_with(&global).unwrap();
        assert_eq!(
            config.panel_background,
            Some(BackgroundSpec::token("light-2"))
        );
        assert!(!config.disabled);
    }

    #[test]
    fn caller_wins() {
        let caller = DisclosureOptions {
            id: Some("actions".to_owned()),
            disabled: Some(true),
            ..DisclosureOptions::default()
        };
        let config = caller.resolve_with(&GlobalDefaults::default()).unwrap();
        assert!(config.disabled);
        assert_eq!(config.panel_id().as_deref(), Some("actions__drop"));
    }

    #[test]
    fn invalid_id_rejected() {
        let caller = DisclosureOptions {
            id: Some("two words".to_owned()),
            ..DisclosureOptions::default()
        };
        let err = caller.resolve_with(&GlobalDefaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "id", .. }));
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn menu_options_from_json() {
        let options = MenuOptions::from_json(
            r#"{
                "id": "file",
                "alignment": {"top": "bottom", "right": "right"},
                "panel_background": {"color": "brand", "opacity": "strong"},
                "messages": {"open_menu": "File"}
            }"#,
        )
        .unwrap();
        let config = options.resolve_with(&GlobalDefaults::default()).unwrap();
        assert_eq!(config.disclosure.id.as_deref(), Some("file"));
        assert_eq!(config.disclosure.alignment.top, Some(VerticalEdge::Bottom));
        assert_eq!(config.disclosure.alignment.right, Some(HorizontalEdge::Right));
        assert_eq!(config.messages.open_menu, "File");
        assert_eq!(config.messages.close_menu, DEFAULT_CLOSE_LABEL);
    }

    #[test]
    fn malformed_json_is_error() {
        assert!(matches!(
            GlobalDefaults::from_json("[").unwrap_err(),
            ConfigError::Json(_)
        ));
    }
}
