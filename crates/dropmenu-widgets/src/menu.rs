#![forbid(unsafe_code)]

//! Menu: a disclosure whose panel lists actionable entries, driven from the
//! keyboard.
//!
//! # Keyboard
//!
//! | Key            | Intent             |
//! |----------------|--------------------|
//! | Enter, Space   | activate selected  |
//! | Down           | next               |
//! | Up             | previous           |
//! | Escape, Tab    | dismiss            |
//!
//! The first `Next` or `Previous` on a closed menu only opens it; nothing is
//! highlighted until the following key. Navigation saturates at both ends
//! and does not skip disabled entries.
//!
//! # Example
//! ```
//! use dropmenu_core::{Event, KeyCode, Rect};
//! use dropmenu_widgets::config::MenuConfig;
//! use dropmenu_widgets::host::{AnchorHandle, RecordingHost};
//! use dropmenu_widgets::menu::{MenuController, MenuEntry};
//!
//! let mut host = RecordingHost::new();
//! let mut entries = vec![MenuEntry::new("Edit"), MenuEntry::new("Delete")];
//! let mut menu = MenuController::new(MenuConfig::default(), None);
//! menu.attach_anchor(AnchorHandle::new(1, Rect::new(0, 0, 10, 1)), &mut host);
//!
//! menu.handle_event(&Event::key(KeyCode::Down), &mut entries, &mut host);
//! assert!(menu.is_open());
//! assert_eq!(menu.active_index(), None);
//! menu.handle_event(&Event::key(KeyCode::Down), &mut entries, &mut host);
//! assert_eq!(menu.active_index(), Some(0));
//! ```

use std::fmt;

use dropmenu_core::{Disposition, Event, KeyCode, KeyEvent};
use dropmenu_style::{BackgroundSpec, Paint, Rgb, Theme, active_paint, resolve_background};

use crate::config::{MenuConfig, MenuMessages};
use crate::disclosure::{Callback, Disclosure, Transition};
use crate::host::{AnchorHandle, Host};

/// Background token for menu panels without an explicit background.
pub const MENU_BACKGROUND_TOKEN: &str = "menu";
/// Color token for the trigger's drop indicator.
pub const CONTROL_COLOR_TOKEN: &str = "control";

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One actionable menu entry.
pub struct MenuEntry {
    /// Visible label.
    pub label: String,
    /// Optional icon name.
    pub icon: Option<String>,
    /// Disabled entries are still navigation stops but can't be activated.
    pub disabled: bool,
    /// Optional link target.
    pub href: Option<String>,
    /// Whether activation closes the menu.
    pub close_on_activate: bool,
    on_activate: Option<Callback>,
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("disabled", &self.disabled)
            .field("href", &self.href)
            .field("close_on_activate", &self.close_on_activate)
            .finish_non_exhaustive()
    }
}

impl MenuEntry {
    /// Create an enabled entry that closes the menu on activation.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            disabled: false,
            href: None,
            close_on_activate: true,
            on_activate: None,
        }
    }

    /// Set the icon.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the link target.
    #[must_use]
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether activation closes the menu.
    #[must_use]
    pub fn close_on_activate(mut self, close: bool) -> Self {
        self.close_on_activate = close;
        self
    }

    /// Set the activation action.
    #[must_use]
    pub fn on_activate(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(action));
        self
    }

    fn fire(&mut self) {
        if let Some(action) = self.on_activate.as_mut() {
            action();
        }
    }
}

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// Keyboard intents the menu understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuIntent {
    /// Activate the highlighted entry.
    ActivateSelected,
    /// Move the highlight down (opens a closed menu).
    Next,
    /// Move the highlight up (opens a closed menu).
    Previous,
    /// Close the menu.
    Dismiss,
}

impl MenuIntent {
    /// Map a key to an intent. Releases, command chords (Ctrl/Alt/Super
    /// held) and unrecognized keys map to `None`.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if !key.is_actionable() || key.is_chord() {
            return None;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Self::ActivateSelected),
            KeyCode::Down => Some(Self::Next),
            KeyCode::Up => Some(Self::Previous),
            KeyCode::Escape | KeyCode::Tab | KeyCode::BackTab => Some(Self::Dismiss),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Panel layout
// ---------------------------------------------------------------------------

/// Where a mirror close control sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorPosition {
    /// Above the entries.
    Top,
    /// Below the entries.
    Bottom,
}

/// Render data for one entry row.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    /// Entry index.
    pub index: usize,
    /// Label.
    pub label: String,
    /// Icon name.
    pub icon: Option<String>,
    /// Link target.
    pub href: Option<String>,
    /// Disabled.
    pub disabled: bool,
    /// Keyboard-highlighted.
    pub active: bool,
    /// Row paint; set only for the highlighted row.
    pub paint: Option<Paint>,
}

/// A row of the open panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRow {
    /// Close control duplicating the trigger.
    Mirror {
        /// Label.
        label: String,
        /// Placement.
        position: MirrorPosition,
    },
    /// An entry.
    Entry(EntryRow),
}

/// Render data for the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerLayout {
    /// Accessible title (the open label).
    pub title: String,
    /// Drop indicator color.
    pub indicator: Option<Rgb>,
    /// Whether the trigger ignores activation.
    pub disabled: bool,
    /// Whether the panel is open.
    pub open: bool,
}

/// Pure render data for the open panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    /// Panel paint.
    pub paint: Option<Paint>,
    /// Rows, top to bottom.
    pub rows: Vec<PanelRow>,
}

impl PanelLayout {
    /// Entry rows only.
    pub fn entries(&self) -> impl Iterator<Item = &EntryRow> {
        self.rows.iter().filter_map(|row| match row {
            PanelRow::Entry(entry) => Some(entry),
            PanelRow::Mirror { .. } => None,
        })
    }

    /// Mirror placements, top first.
    pub fn mirrors(&self) -> impl Iterator<Item = MirrorPosition> + '_ {
        self.rows.iter().filter_map(|row| match row {
            PanelRow::Mirror { position, .. } => Some(*position),
            PanelRow::Entry(_) => None,
        })
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Keyboard state machine over a [`Disclosure`].
///
/// States: closed, open with nothing highlighted, open with entry `i`
/// highlighted. Every open/close transition clears the highlight.
///
/// Entries belong to the caller and are passed in on each call.
#[derive(Debug)]
pub struct MenuController {
    disclosure: Disclosure,
    active_index: Option<usize>,
    messages: MenuMessages,
}

impl MenuController {
    /// Create a menu. `controlled` is the caller's open value, if any.
    #[must_use]
    pub fn new(config: MenuConfig, controlled: Option<bool>) -> Self {
        Self {
            disclosure: Disclosure::new(config.disclosure, controlled),
            active_index: None,
            messages: config.messages,
        }
    }

    /// Set the theme used to paint the panel.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.disclosure.set_theme(theme);
        self
    }

    /// Set the open notification.
    #[must_use]
    pub fn on_open(mut self, callback: impl FnMut() + 'static) -> Self {
        self.disclosure = self.disclosure.on_open(callback);
        self
    }

    /// Set the close notification.
    #[must_use]
    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.disclosure = self.disclosure.on_close(callback);
        self
    }

    /// Whether the menu is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    /// Highlighted entry, if any.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Underlying disclosure.
    #[must_use]
    pub const fn disclosure(&self) -> &Disclosure {
        &self.disclosure
    }

    /// Labels.
    #[must_use]
    pub const fn messages(&self) -> &MenuMessages {
        &self.messages
    }

    /// Trigger label.
    #[must_use]
    pub fn trigger_label(&self) -> &str {
        &self.messages.open_menu
    }

    /// Mirror control label.
    #[must_use]
    pub fn close_label(&self) -> &str {
        &self.messages.close_menu
    }

    /// Whether a mirror control renders above the entries.
    #[must_use]
    pub fn mirror_at_top(&self) -> bool {
        self.disclosure.config().alignment.mirror_at_top()
    }

    /// Whether a mirror control renders below the entries.
    #[must_use]
    pub fn mirror_at_bottom(&self) -> bool {
        self.disclosure.config().alignment.mirror_at_bottom()
    }

    /// Attach the trigger anchor. See [`Disclosure::attach_anchor`].
    pub fn attach_anchor<H: Host + ?Sized>(&mut self, anchor: AnchorHandle, host: &mut H) -> bool {
        self.disclosure.attach_anchor(anchor, host)
    }

    /// Adopt the caller's controlled value. See [`Disclosure::reconcile`].
    pub fn reconcile<H: Host + ?Sized>(
        &mut self,
        controlled: Option<bool>,
        anchor_override: Option<AnchorHandle>,
        host: &mut H,
    ) -> Option<Transition> {
        self.tracked(|d| d.reconcile(controlled, anchor_override, host))
    }

    /// Target the trigger again. See [`Disclosure::clear_anchor_override`].
    pub fn clear_anchor_override<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.disclosure.clear_anchor_override(host);
    }

    /// Open the menu with nothing highlighted.
    pub fn open<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        self.tracked(|d| d.open(host))
    }

    /// Close the menu.
    pub fn close<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        self.tracked(|d| d.close(host))
    }

    /// The mirror control was activated.
    pub fn close_from_mirror<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        self.close(host)
    }

    /// Apply a keyboard intent.
    pub fn handle_intent<H: Host + ?Sized>(
        &mut self,
        intent: MenuIntent,
        entries: &mut [MenuEntry],
        host: &mut H,
    ) -> Disposition {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "menu_intent",
            intent = ?intent,
            open = self.is_open(),
            active = ?self.active_index
        )
        .entered();

        let len = entries.len();
        // Entries are supplied per call and may have shrunk since the last one.
        self.active_index = self.active_index.filter(|&i| i < len);
        match intent {
            MenuIntent::ActivateSelected => {
                let Some(index) = self.active_index.filter(|_| self.is_open()) else {
                    return Disposition::IGNORED;
                };
                self.activate(index, entries, host);
                Disposition::CAPTURED
            }
            MenuIntent::Next => {
                if self.is_open() {
                    self.active_index = match self.active_index {
                        _ if len == 0 => None,
                        None => Some(0),
                        Some(i) => Some((i + 1).min(len - 1)),
                    };
                } else {
                    self.open(host);
                }
                Disposition::HANDLED | Disposition::PREVENT_DEFAULT
            }
            MenuIntent::Previous => {
                if self.is_open() {
                    self.active_index = match self.active_index {
                        _ if len == 0 => None,
                        None => Some(len - 1),
                        Some(i) => Some(i.min(len - 1).saturating_sub(1)),
                    };
                } else {
                    self.open(host);
                }
                Disposition::HANDLED | Disposition::PREVENT_DEFAULT
            }
            MenuIntent::Dismiss => {
                if !self.is_open() {
                    return Disposition::IGNORED;
                }
                self.close(host);
                self.active_index = None;
                Disposition::HANDLED | Disposition::STOP_PROPAGATION
            }
        }
    }

    /// Route an input event: keys map through [`MenuIntent::from_key`],
    /// pointer events go to the disclosure (trigger clicks, outside clicks).
    pub fn handle_event<H: Host + ?Sized>(
        &mut self,
        event: &Event,
        entries: &mut [MenuEntry],
        host: &mut H,
    ) -> Disposition {
        match event {
            Event::Key(key) => match MenuIntent::from_key(key) {
                Some(intent) => self.handle_intent(intent, entries, host),
                None => Disposition::IGNORED,
            },
            _ => self.tracked(|d| d.handle_event(event, host)),
        }
    }

    /// Activate entry `index` (keyboard or pointer).
    ///
    /// Disabled or missing entries are skipped silently. Returns whether the
    /// entry's action ran.
    pub fn activate<H: Host + ?Sized>(
        &mut self,
        index: usize,
        entries: &mut [MenuEntry],
        host: &mut H,
    ) -> bool {
        let Some(entry) = entries.get_mut(index) else {
            return false;
        };
        if entry.disabled {
            dropmenu_core::debug!(index, "menu entry disabled; activation skipped");
            return false;
        }
        entry.fire();
        if entry.close_on_activate {
            self.close(host);
        }
        true
    }

    /// Render data for the trigger.
    #[must_use]
    pub fn trigger_layout(&self, theme: &Theme) -> TriggerLayout {
        TriggerLayout {
            title: self.messages.open_menu.clone(),
            indicator: theme.color_token(CONTROL_COLOR_TOKEN),
            disabled: self.disclosure.is_disabled(),
            open: self.is_open(),
        }
    }

    /// Render data for the open panel.
    #[must_use]
    pub fn panel_layout(&self, entries: &[MenuEntry], theme: &Theme) -> PanelLayout {
        let fallback = BackgroundSpec::token(MENU_BACKGROUND_TOKEN);
        let background = self
            .disclosure
            .config()
            .panel_background
            .as_ref()
            .unwrap_or(&fallback);
        let paint = resolve_background(background, theme);

        let mut rows = Vec::with_capacity(entries.len() + 2);
        if self.mirror_at_top() {
            rows.push(PanelRow::Mirror {
                label: self.messages.close_menu.clone(),
                position: MirrorPosition::Top,
            });
        }
        rows.extend(entries.iter().enumerate().map(|(index, entry)| {
            let active = self.active_index == Some(index);
            PanelRow::Entry(EntryRow {
                index,
                label: entry.label.clone(),
                icon: entry.icon.clone(),
                href: entry.href.clone(),
                disabled: entry.disabled,
                active,
                paint: active.then(|| active_paint(theme)),
            })
        }));
        if self.mirror_at_bottom() {
            rows.push(PanelRow::Mirror {
                label: self.messages.close_menu.clone(),
                position: MirrorPosition::Bottom,
            });
        }

        PanelLayout { paint, rows }
    }

    /// Run a disclosure operation, clearing the highlight if it changed the
    /// open state.
    fn tracked<R>(&mut self, op: impl FnOnce(&mut Disclosure) -> R) -> R {
        let was_open = self.disclosure.is_open();
        let result = op(&mut self.disclosure);
        if self.disclosure.is_open() != was_open {
            self.active_index = None;
        }
        result
    }
}
