#![forbid(unsafe_code)]

//! Widgets: the disclosure (trigger + floating panel) and the keyboard menu
//! built on it.
//!
//! Widgets hold state and decide; a [`host::Host`] performs the effects
//! (mounting panels, moving focus). Every `handle_event` returns a
//! [`Disposition`](dropmenu_core::Disposition) telling the host what to do
//! with the event.

pub mod config;
pub mod disclosure;
pub mod host;
pub mod menu;

pub use config::{
    Alignment, ConfigError, DisclosureConfig, DisclosureOptions, GlobalDefaults,
    HorizontalEdge, MenuConfig, MenuMessages, MenuOptions, MessageOptions, VerticalEdge,
};
pub use disclosure::{
    AnchorState, Disclosure, DisclosureAction, DisclosureState, Transition,
};
pub use host::{
    AnchorHandle, AnchorId, FocusHost, Host, HostCall, MountRequest, PanelHandle, PanelHost,
    RecordingHost,
};
pub use menu::{
    EntryRow, MenuController, MenuEntry, MenuIntent, MirrorPosition, PanelLayout, PanelRow,
    TriggerLayout,
};
