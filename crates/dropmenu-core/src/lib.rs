#![forbid(unsafe_code)]

//! Core: canonical input events, hit-test geometry, event dispositions, and
//! logging shims shared by the dropmenu crates.

pub mod disposition;
pub mod event;
pub mod geometry;
pub mod logging;

pub use disposition::Disposition;
pub use event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use geometry::{HitRegion, Rect};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, trace_span, warn};
