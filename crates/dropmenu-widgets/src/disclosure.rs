#![forbid(unsafe_code)]

//! Disclosure: a trigger that reveals an anchored floating panel.
//!
//! The open/closed state may be controlled by the caller (supplied on every
//! update through [`Disclosure::reconcile`]) or left to the widget. When
//! controlled, the caller's value always wins: intents such as
//! [`Disclosure::toggle`] still fire their callbacks, which the caller is
//! expected to answer with a new controlled value.
//!
//! Side effects go through a [`Host`]: the panel is mounted whenever the
//! disclosure is open and has a positioning target, unmounted on close, and
//! focus returns to the trigger on every open→closed transition.
//!
//! # Example
//! ```
//! use dropmenu_core::{Event, Rect};
//! use dropmenu_widgets::config::DisclosureConfig;
//! use dropmenu_widgets::disclosure::{Disclosure, Transition};
//! use dropmenu_widgets::host::{AnchorHandle, RecordingHost};
//!
//! let mut host = RecordingHost::new();
//! let mut disclosure = Disclosure::new(DisclosureConfig::default(), None);
//! disclosure.attach_anchor(AnchorHandle::new(1, Rect::new(0, 0, 8, 1)), &mut host);
//!
//! assert_eq!(disclosure.toggle(&mut host), Some(Transition::Opened));
//! assert_eq!(host.mounted_count(), 1);
//! disclosure.handle_event(&Event::click(50, 50), &mut host);
//! assert!(!disclosure.is_open());
//! ```

use std::fmt;

use dropmenu_core::{Disposition, Event, HitRegion, KeyCode};
use dropmenu_style::{Theme, resolve_background};

use crate::config::DisclosureConfig;
use crate::host::{AnchorHandle, Host, MountRequest, PanelHandle};

/// Caller notification.
pub type Callback = Box<dyn FnMut()>;

/// An actual change of the open state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Closed → open.
    Opened,
    /// Open → closed.
    Closed,
}

/// Input to [`DisclosureState::reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureAction {
    /// The caller supplied a (possibly absent) controlled value.
    Reconcile(Option<bool>),
    /// Request open.
    Open,
    /// Request close.
    Close,
    /// Request the opposite state.
    Toggle,
}

/// Open/closed state and its reconciliation against a controlled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisclosureState {
    /// Resolved state.
    pub is_open: bool,
    /// Caller-supplied state; authoritative when present.
    pub controlled_open: Option<bool>,
    /// Asked to be open before an anchor existed; re-evaluate on attach.
    pub pending_mount_recheck: bool,
}

impl DisclosureState {
    /// Initial state for a (possibly controlled) widget.
    #[must_use]
    pub const fn new(controlled: Option<bool>) -> Self {
        let is_open = match controlled {
            Some(open) => open,
            None => false,
        };
        Self {
            is_open,
            controlled_open: controlled,
            pending_mount_recheck: false,
        }
    }

    /// Apply an action.
    ///
    /// A controlled value pins `is_open`; without one, requests are taken
    /// at face value. Clearing control keeps the current state and resumes
    /// internal tracking from there.
    #[must_use]
    pub const fn reduce(self, action: DisclosureAction) -> Self {
        let requested = match action {
            DisclosureAction::Reconcile(controlled) => {
                return Self {
                    is_open: match controlled {
                        Some(open) => open,
                        None => self.is_open,
                    },
                    controlled_open: controlled,
                    ..self
                };
            }
            DisclosureAction::Open => true,
            DisclosureAction::Close => false,
            DisclosureAction::Toggle => !self.is_open,
        };
        Self {
            is_open: match self.controlled_open {
                Some(open) => open,
                None => requested,
            },
            ..self
        }
    }

    /// Whether the caller controls the state.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        self.controlled_open.is_some()
    }
}

/// Whether the trigger anchor is known yet.
#[derive(Debug, PartialEq, Eq, Default)]
pub enum AnchorState {
    /// No anchor yet (first paint has not happened).
    #[default]
    Unattached,
    /// The trigger element.
    Attached(AnchorHandle),
}

impl AnchorState {
    /// The anchor, if attached.
    #[must_use]
    pub const fn handle(&self) -> Option<&AnchorHandle> {
        match self {
            Self::Unattached => None,
            Self::Attached(handle) => Some(handle),
        }
    }
}

/// A trigger plus floating panel.
pub struct Disclosure {
    state: DisclosureState,
    anchor: AnchorState,
    anchor_override: Option<AnchorHandle>,
    panel: Option<PanelHandle>,
    recheck_spent: bool,
    config: DisclosureConfig,
    theme: Theme,
    on_open: Option<Callback>,
    on_close: Option<Callback>,
}

impl fmt::Debug for Disclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disclosure")
            .field("state", &self.state)
            .field("anchor", &self.anchor)
            .field("anchor_override", &self.anchor_override)
            .field("panel", &self.panel)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Disclosure {
    /// Create a disclosure. `controlled` is the caller's open value, if the
    /// caller controls it.
    #[must_use]
    pub fn new(config: DisclosureConfig, controlled: Option<bool>) -> Self {
        let mut state = DisclosureState::new(controlled);
        // Born open with no anchor: mount once the anchor shows up.
        state.pending_mount_recheck = state.is_open;
        Self {
            state,
            anchor: AnchorState::Unattached,
            anchor_override: None,
            panel: None,
            recheck_spent: false,
            config,
            theme: Theme::default(),
            on_open: None,
            on_close: None,
        }
    }

    /// Set the theme used to paint the panel.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the open notification.
    #[must_use]
    pub fn on_open(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_open = Some(Box::new(callback));
        self
    }

    /// Set the close notification. Fires after the state has settled.
    #[must_use]
    pub fn on_close(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    /// Replace the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Whether the panel is open.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> DisclosureState {
        self.state
    }

    /// Whether the trigger ignores activation.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    /// Theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Trigger anchor state.
    #[must_use]
    pub const fn anchor(&self) -> &AnchorState {
        &self.anchor
    }

    /// Handle of the mounted panel, if any.
    #[must_use]
    pub const fn panel(&self) -> Option<PanelHandle> {
        self.panel
    }

    /// Attach (or replace) the trigger anchor.
    ///
    /// Re-attaching an anchor with the same id only refreshes its bounds; a
    /// mounted panel stays mounted. A different id retargets the panel.
    ///
    /// Returns `true` when this attach ran the deferred mount recheck, in
    /// which case the caller should render again. The recheck runs at most
    /// once per widget.
    pub fn attach_anchor<H: Host + ?Sized>(&mut self, anchor: AnchorHandle, host: &mut H) -> bool {
        let retarget = match &mut self.anchor {
            AnchorState::Attached(current) if current.id() == anchor.id() => {
                current.set_bounds(anchor.bounds());
                false
            }
            slot => {
                *slot = AnchorState::Attached(anchor);
                true
            }
        };
        let rechecked = self.state.pending_mount_recheck && !self.recheck_spent;
        if rechecked {
            self.state.pending_mount_recheck = false;
            self.recheck_spent = true;
        }
        // The trigger is the positioning target unless overridden.
        if self.anchor_override.is_none() {
            if retarget {
                self.remount(host);
            } else if self.state.is_open {
                self.mount(host);
            }
        }
        rechecked
    }

    /// Adopt the caller's latest controlled value and, when given, a
    /// positioning target.
    ///
    /// `anchor_override: None` keeps the current target; use
    /// [`Disclosure::clear_anchor_override`] to fall back to the trigger. A
    /// target with the same id as the current one only refreshes its bounds.
    ///
    /// Never fires callbacks; the caller already knows its own value.
    pub fn reconcile<H: Host + ?Sized>(
        &mut self,
        controlled: Option<bool>,
        anchor_override: Option<AnchorHandle>,
        host: &mut H,
    ) -> Option<Transition> {
        let retarget = match anchor_override {
            Some(target) => match &mut self.anchor_override {
                Some(current) if current.id() == target.id() => {
                    current.set_bounds(target.bounds());
                    false
                }
                slot => {
                    *slot = Some(target);
                    true
                }
            },
            None => false,
        };
        let transition = self.apply(DisclosureAction::Reconcile(controlled), host);
        if retarget && transition.is_none() {
            self.remount(host);
        }
        transition
    }

    /// Drop the positioning override so the panel targets the trigger again.
    pub fn clear_anchor_override<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.anchor_override.take().is_some() {
            self.remount(host);
        }
    }

    /// Positioning override, if any.
    #[must_use]
    pub const fn anchor_override(&self) -> Option<&AnchorHandle> {
        self.anchor_override.as_ref()
    }

    /// Request open. No-op if already open.
    pub fn open<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        if self.state.is_open {
            return None;
        }
        let transition = self.apply(DisclosureAction::Open, host);
        self.notify(true);
        transition
    }

    /// Request close. No-op if already closed.
    ///
    /// Unmounts the panel, restores focus to the trigger, then fires
    /// `on_close`.
    pub fn close<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        if !self.state.is_open {
            return None;
        }
        let transition = self.apply(DisclosureAction::Close, host);
        self.notify(false);
        transition
    }

    /// Request the opposite state, firing exactly one of `on_open` /
    /// `on_close`.
    pub fn toggle<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        let opening = !self.state.is_open;
        let transition = self.apply(DisclosureAction::Toggle, host);
        self.notify(opening);
        transition
    }

    /// Trigger activation (click, Enter or Space on the trigger).
    ///
    /// Returns `None` without any effect when disabled.
    pub fn activate_trigger<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        if self.config.disabled {
            dropmenu_core::debug!("disclosure trigger ignored: disabled");
            return None;
        }
        self.toggle(host)
    }

    /// A primary press landed outside the trigger and the panel.
    pub fn on_dismiss_outside<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<Transition> {
        self.close(host)
    }

    /// Escape pressed inside the panel.
    ///
    /// Closes and stops propagation so an enclosing layer's own Escape
    /// handling does not also fire.
    pub fn on_escape<H: Host + ?Sized>(&mut self, host: &mut H) -> Disposition {
        if !self.state.is_open {
            return Disposition::IGNORED;
        }
        self.close(host);
        Disposition::HANDLED | Disposition::STOP_PROPAGATION
    }

    /// Route an input event.
    ///
    /// - Primary press on the trigger: [`Disclosure::activate_trigger`].
    /// - Primary press outside trigger and panel while open:
    ///   [`Disclosure::on_dismiss_outside`].
    /// - Escape while open: [`Disclosure::on_escape`].
    pub fn handle_event<H: Host + ?Sized>(&mut self, event: &Event, host: &mut H) -> Disposition {
        match event {
            Event::Mouse(mouse) if mouse.is_primary_press() => {
                let on_trigger = self
                    .anchor
                    .handle()
                    .is_some_and(|a| a.bounds().contains(mouse.x, mouse.y));
                if on_trigger {
                    if self.config.disabled {
                        return Disposition::IGNORED;
                    }
                    self.activate_trigger(host);
                    return Disposition::HANDLED;
                }
                if self.state.is_open && !self.hit_region(host).contains(mouse.x, mouse.y) {
                    self.on_dismiss_outside(host);
                    return Disposition::HANDLED;
                }
                Disposition::IGNORED
            }
            Event::Key(key) if key.is_actionable() && key.code == KeyCode::Escape => {
                self.on_escape(host)
            }
            _ => Disposition::IGNORED,
        }
    }

    /// Tear down, unmounting the panel first.
    pub fn dispose<H: Host + ?Sized>(mut self, host: &mut H) {
        if let Some(panel) = self.panel.take() {
            host.unmount(panel);
        }
    }

    /// Area that does not count as "outside": trigger, target and panel.
    #[must_use]
    pub fn hit_region<H: Host + ?Sized>(&self, host: &H) -> HitRegion {
        let mut region = HitRegion::new();
        if let Some(anchor) = self.anchor.handle() {
            region = region.with(anchor.bounds());
        }
        if let Some(target) = &self.anchor_override {
            region = region.with(target.bounds());
        }
        if let Some(bounds) = self.panel.and_then(|p| host.panel_bounds(p)) {
            region = region.with(bounds);
        }
        region
    }

    fn apply<H: Host + ?Sized>(
        &mut self,
        action: DisclosureAction,
        host: &mut H,
    ) -> Option<Transition> {
        let before = self.state.is_open;
        self.state = self.state.reduce(action);

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "disclosure_transition",
            action = ?action,
            from = before,
            to = self.state.is_open,
            controlled = ?self.state.controlled_open
        )
        .entered();

        match (before, self.state.is_open) {
            (false, true) => {
                self.mount(host);
                Some(Transition::Opened)
            }
            (true, false) => {
                if let Some(panel) = self.panel.take() {
                    host.unmount(panel);
                }
                if let Some(anchor) = self.anchor.handle() {
                    host.focus_preserving_scroll(anchor);
                }
                Some(Transition::Closed)
            }
            _ => None,
        }
    }

    fn notify(&mut self, opened: bool) {
        let callback = if opened {
            self.on_open.as_mut()
        } else {
            self.on_close.as_mut()
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    fn remount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if let Some(panel) = self.panel.take() {
            host.unmount(panel);
        }
        if self.state.is_open {
            self.mount(host);
        }
    }

    fn mount<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.panel.is_some() {
            return;
        }
        let Some(target) = self.anchor_override.as_ref().or(self.anchor.handle()) else {
            if !self.recheck_spent {
                self.state.pending_mount_recheck = true;
            }
            return;
        };
        let background = self
            .config
            .panel_background
            .as_ref()
            .and_then(|spec| resolve_background(spec, &self.theme));
        let handle = host.mount(MountRequest {
            target,
            alignment: self.config.alignment,
            id: self.config.panel_id(),
            background,
        });
        self.panel = Some(handle);
    }
}
