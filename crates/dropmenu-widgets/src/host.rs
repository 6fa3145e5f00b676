#![forbid(unsafe_code)]

//! Collaborator seams between widgets and the rendering host.
//!
//! Widgets never position or draw panels themselves. A [`PanelHost`] mounts
//! and unmounts floating panels against an anchor, and a [`FocusHost`] moves
//! focus without scrolling. [`RecordingHost`] is a headless implementation
//! that records every call, for tests and for driving widgets without a
//! terminal.

use std::collections::BTreeMap;

use dropmenu_core::geometry::Rect;
use dropmenu_style::Paint;

use crate::config::Alignment;

/// Identity of an anchor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// A trigger element a panel positions itself against.
///
/// Handles are owned: a widget takes its anchor by value and lends it out by
/// reference, so two widgets can't hold the same handle.
#[derive(Debug, PartialEq, Eq)]
pub struct AnchorHandle {
    id: AnchorId,
    bounds: Rect,
}

impl AnchorHandle {
    /// Create a handle for an element at `bounds`.
    #[must_use]
    pub const fn new(id: u64, bounds: Rect) -> Self {
        Self {
            id: AnchorId(id),
            bounds,
        }
    }

    /// Element identity.
    #[must_use]
    pub const fn id(&self) -> AnchorId {
        self.id
    }

    /// Element bounds, for hit testing.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Update bounds after a layout pass.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }
}

/// Opaque handle to a mounted panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelHandle(pub u64);

/// Everything a host needs to mount a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MountRequest<'a> {
    /// Positioning target.
    pub target: &'a AnchorHandle,
    /// Alignment against the target.
    pub alignment: Alignment,
    /// Panel identifier.
    pub id: Option<String>,
    /// Resolved panel paint.
    pub background: Option<Paint>,
}

/// Mounts floating panels.
pub trait PanelHost {
    /// Mount a panel and return its handle.
    fn mount(&mut self, request: MountRequest<'_>) -> PanelHandle;

    /// Unmount a previously mounted panel.
    fn unmount(&mut self, handle: PanelHandle);

    /// Current on-screen bounds of a mounted panel.
    fn panel_bounds(&self, handle: PanelHandle) -> Option<Rect>;
}

/// Moves focus.
pub trait FocusHost {
    /// Focus the element without scrolling any container.
    fn focus_preserving_scroll(&mut self, anchor: &AnchorHandle);
}

/// A host that provides both capabilities.
pub trait Host: PanelHost + FocusHost {}

impl<T: PanelHost + FocusHost + ?Sized> Host for T {}

// ---------------------------------------------------------------------------
// RecordingHost
// ---------------------------------------------------------------------------

/// A call observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    /// A panel was mounted.
    Mount {
        /// Returned handle.
        panel: PanelHandle,
        /// Positioning target.
        target: AnchorId,
        /// Panel identifier.
        id: Option<String>,
        /// Alignment.
        alignment: Alignment,
        /// Resolved paint.
        background: Option<Paint>,
    },
    /// A panel was unmounted.
    Unmount(PanelHandle),
    /// Focus moved to an anchor.
    Focus(AnchorId),
}

/// Headless host that records calls and lays panels out under their target.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    mounted: BTreeMap<PanelHandle, Rect>,
    next_handle: u64,
    panel_size: (u16, u16),
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    /// Create a host whose panels are 20x8 cells.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            mounted: BTreeMap::new(),
            next_handle: 1,
            panel_size: (20, 8),
        }
    }

    /// Set the size of mounted panels.
    #[must_use]
    pub fn with_panel_size(mut self, width: u16, height: u16) -> Self {
        self.panel_size = (width, height);
        self
    }

    /// All calls so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain recorded calls.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of currently mounted panels.
    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Number of focus calls so far.
    #[must_use]
    pub fn focus_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HostCall::Focus(_)))
            .count()
    }
}

impl PanelHost for RecordingHost {
    fn mount(&mut self, request: MountRequest<'_>) -> PanelHandle {
        let handle = PanelHandle(self.next_handle);
        self.next_handle += 1;
        let anchor = request.target.bounds();
        let (w, h) = self.panel_size;
        self.mounted
            .insert(handle, Rect::new(anchor.x, anchor.bottom(), w, h));
        self.calls.push(HostCall::Mount {
            panel: handle,
            target: request.target.id(),
            id: request.id,
            alignment: request.alignment,
            background: request.background,
        });
        handle
    }

    fn unmount(&mut self, handle: PanelHandle) {
        self.mounted.remove(&handle);
        self.calls.push(HostCall::Unmount(handle));
    }

    fn panel_bounds(&self, handle: PanelHandle) -> Option<Rect> {
        self.mounted.get(&handle).copied()
    }
}

impl FocusHost for RecordingHost {
    fn focus_preserving_scroll(&mut self, anchor: &AnchorHandle) {
        self.calls.push(HostCall::Focus(anchor.id()));
    }
}
