#![forbid(unsafe_code)]

//! What a widget did with an event.
//!
//! Widgets never reach into the host's dispatch chain. Instead every
//! `handle_event` returns a [`Disposition`] and the host honours it: an
//! empty disposition means the event passes through untouched.

use bitflags::bitflags;

bitflags! {
    /// Outcome flags for a handled event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Disposition: u8 {
        /// The widget consumed the event.
        const HANDLED          = 0b001;
        /// The host must suppress the platform default action for the key
        /// (scrolling on arrows, activating the focused control on Enter).
        const PREVENT_DEFAULT  = 0b010;
        /// Ancestor handlers (an enclosing layer's Escape dismissal, say)
        /// must not see the event.
        const STOP_PROPAGATION = 0b100;
    }
}

impl Disposition {
    /// The event was not used; route it onward.
    pub const IGNORED: Self = Self::empty();

    /// Consumed and fully captured: no default action, no propagation.
    pub const CAPTURED: Self = Self::HANDLED
        .union(Self::PREVENT_DEFAULT)
        .union(Self::STOP_PROPAGATION);

    /// Whether the widget consumed the event.
    #[must_use]
    pub const fn is_handled(self) -> bool {
        self.contains(Self::HANDLED)
    }

    /// Whether ancestors may still observe the event.
    #[must_use]
    pub const fn propagates(self) -> bool {
        !self.contains(Self::STOP_PROPAGATION)
    }
}
