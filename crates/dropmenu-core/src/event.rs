#![forbid(unsafe_code)]

//! Input events the widgets react to.
//!
//! Hosts translate platform input into these types and hand them to widget
//! `handle_event` methods. Only what a trigger, a panel and a menu consume
//! is modeled: key presses with their chord state, and pointer button
//! presses/releases. Everything else maps to `None` at the host boundary.
//!
//! Mouse coordinates are 0-indexed cells.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),
    /// A pointer button event.
    Mouse(MouseEvent),
}

impl Event {
    /// Shorthand for a plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// Shorthand for a left-button press at `(x, y)`.
    #[must_use]
    pub const fn click(x: u16, y: u16) -> Self {
        Self::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            y,
        ))
    }

    /// Convert a Crossterm event.
    ///
    /// Returns `None` for input no widget here reacts to: resize, focus,
    /// paste, pointer motion and scrolling, unmapped keys.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => map_key_event(key).map(Self::Key),
            cte::Event::Mouse(mouse) => map_mouse_event(mouse).map(Self::Mouse),
            cte::Event::Resize(..)
            | cte::Event::FocusGained
            | cte::Event::FocusLost
            | cte::Event::Paste(_) => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key code.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// Press, repeat or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event should drive a widget (press or auto-repeat).
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Whether a command modifier (Ctrl, Alt, Super) is held. Shift alone
    /// does not count.
    #[must_use]
    pub const fn is_chord(&self) -> bool {
        self.modifiers.intersects(Modifiers::COMMAND)
    }
}

/// Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key. Space arrives as `Char(' ')`.
    Char(char),
    /// Enter/Return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,
    /// Key is being held.
    Repeat,
    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
        /// Any modifier that turns a key into a command chord.
        const COMMAND = Self::ALT.bits() | Self::CTRL.bits() | Self::SUPER.bits();
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Press or release.
    pub kind: MouseEventKind,
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl MouseEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    /// Whether this is a primary-button press, the only pointer event that
    /// activates triggers or dismisses panels.
    #[must_use]
    pub const fn is_primary_press(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

/// Pointer button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left.
    Left,
    /// Right.
    Right,
    /// Middle.
    Middle,
}

#[cfg(not(target_arch = "wasm32"))]
fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
    let code = match event.code {
        cte::KeyCode::Char(c) => KeyCode::Char(c),
        cte::KeyCode::Enter => KeyCode::Enter,
        cte::KeyCode::Esc => KeyCode::Escape,
        cte::KeyCode::Backspace => KeyCode::Backspace,
        cte::KeyCode::Tab => KeyCode::Tab,
        cte::KeyCode::BackTab => KeyCode::BackTab,
        cte::KeyCode::Up => KeyCode::Up,
        cte::KeyCode::Down => KeyCode::Down,
        cte::KeyCode::Left => KeyCode::Left,
        cte::KeyCode::Right => KeyCode::Right,
        _ => return None,
    };
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code,
        modifiers: map_modifiers(event.modifiers),
        kind,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
    let mut mapped = Modifiers::NONE;
    if modifiers.contains(cte::KeyModifiers::SHIFT) {
        mapped |= Modifiers::SHIFT;
    }
    if modifiers.contains(cte::KeyModifiers::ALT) {
        mapped |= Modifiers::ALT;
    }
    if modifiers.contains(cte::KeyModifiers::CONTROL) {
        mapped |= Modifiers::CTRL;
    }
    if modifiers.intersects(
        cte::KeyModifiers::SUPER | cte::KeyModifiers::HYPER | cte::KeyModifiers::META,
    ) {
        mapped |= Modifiers::SUPER;
    }
    mapped
}

#[cfg(not(target_arch = "wasm32"))]
fn map_mouse_event(event: cte::MouseEvent) -> Option<MouseEvent> {
    let button = |b: cte::MouseButton| match b {
        cte::MouseButton::Left => MouseButton::Left,
        cte::MouseButton::Right => MouseButton::Right,
        cte::MouseButton::Middle => MouseButton::Middle,
    };
    let kind = match event.kind {
        cte::MouseEventKind::Down(b) => MouseEventKind::Down(button(b)),
        cte::MouseEventKind::Up(b) => MouseEventKind::Up(button(b)),
        _ => return None,
    };
    Some(MouseEvent::new(kind, event.column, event.row))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crossterm::event as ct_event;

    fn ct_key(code: ct_event::KeyCode, kind: ct_event::KeyEventKind) -> ct_event::Event {
        ct_event::Event::Key(ct_event::KeyEvent {
            code,
            modifiers: ct_event::KeyModifiers::NONE,
            kind,
            state: ct_event::KeyEventState::NONE,
        })
    }

    fn ct_mouse(kind: ct_event::MouseEventKind) -> ct_event::Event {
        ct_event::Event::Mouse(ct_event::MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: ct_event::KeyModifiers::NONE,
        })
    }

    #[test]
    fn release_is_not_actionable() {
        let press = KeyEvent::new(KeyCode::Down);
        assert!(press.is_actionable());
        assert!(press.with_kind(KeyEventKind::Repeat).is_actionable());
        assert!(!press.with_kind(KeyEventKind::Release).is_actionable());
    }

    #[test]
    fn shift_is_not_a_chord() {
        let key = KeyEvent::new(KeyCode::Enter);
        assert!(!key.is_chord());
        assert!(!key.with_modifiers(Modifiers::SHIFT).is_chord());
        assert!(key.with_modifiers(Modifiers::CTRL).is_chord());
        assert!(key.with_modifiers(Modifiers::SHIFT | Modifiers::ALT).is_chord());
    }

    #[test]
    fn click_shorthand_is_primary_press() {
        let Event::Mouse(mouse) = Event::click(3, 4) else {
            panic!("expected mouse event");
        };
        assert!(mouse.is_primary_press());
        assert_eq!((mouse.x, mouse.y), (3, 4));

        let right = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 0, 0);
        assert!(!right.is_primary_press());
    }

    // -- Crossterm mapping tests --

    #[test]
    fn maps_escape_and_arrows() {
        let esc = Event::from_crossterm(ct_key(
            ct_event::KeyCode::Esc,
            ct_event::KeyEventKind::Press,
        ));
        assert_eq!(esc, Some(Event::key(KeyCode::Escape)));

        let down = Event::from_crossterm(ct_key(
            ct_event::KeyCode::Down,
            ct_event::KeyEventKind::Repeat,
        ));
        assert_eq!(
            down,
            Some(Event::Key(
                KeyEvent::new(KeyCode::Down).with_kind(KeyEventKind::Repeat)
            ))
        );
    }

    #[test]
    fn unmapped_input_is_dropped() {
        for code in [ct_event::KeyCode::CapsLock, ct_event::KeyCode::F(2), ct_event::KeyCode::Home] {
            assert_eq!(
                Event::from_crossterm(ct_key(code, ct_event::KeyEventKind::Press)),
                None
            );
        }
        assert_eq!(Event::from_crossterm(ct_event::Event::Paste("x".into())), None);
        assert_eq!(Event::from_crossterm(ct_event::Event::FocusLost), None);
        assert_eq!(Event::from_crossterm(ct_event::Event::Resize(80, 24)), None);
        assert_eq!(
            Event::from_crossterm(ct_mouse(ct_event::MouseEventKind::ScrollDown)),
            None
        );
    }

    #[test]
    fn map_modifiers_super_variants() {
        assert!(map_modifiers(ct_event::KeyModifiers::SUPER).contains(Modifiers::SUPER));
        assert!(map_modifiers(ct_event::KeyModifiers::HYPER).contains(Modifiers::SUPER));
        assert!(map_modifiers(ct_event::KeyModifiers::META).contains(Modifiers::SUPER));
    }

    #[test]
    fn map_modifiers_combined() {
        let mapped = map_modifiers(ct_event::KeyModifiers::SHIFT | ct_event::KeyModifiers::CONTROL);
        assert!(mapped.contains(Modifiers::SHIFT));
        assert!(mapped.contains(Modifiers::CTRL));
        assert!(!mapped.contains(Modifiers::ALT));
    }

    #[test]
    fn map_mouse_down_keeps_position() {
        let Some(Event::Mouse(mapped)) = Event::from_crossterm(ct_mouse(
            ct_event::MouseEventKind::Down(ct_event::MouseButton::Left),
        )) else {
            panic!("expected mouse event");
        };
        assert!(mapped.is_primary_press());
        assert_eq!((mapped.x, mapped.y), (10, 5));
    }
}
