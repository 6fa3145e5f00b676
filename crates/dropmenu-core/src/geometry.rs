#![forbid(unsafe_code)]

//! Cell-space rectangles used for trigger and panel hit testing.
//!
//! The floating-panel host owns positioning; widgets only need to know
//! whether a pointer press landed on the trigger, inside the mounted panel,
//! or somewhere else entirely.

/// A rectangle in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Empty rectangles contain nothing.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A set of rectangles treated as one hit region.
///
/// The dismissal region of a disclosure is "anchor plus panel"; the two are
/// usually disjoint, so a bounding box would swallow presses between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitRegion {
    rects: Vec<Rect>,
}

impl HitRegion {
    /// Create an empty region.
    #[must_use]
    pub const fn new() -> Self {
        Self { rects: Vec::new() }
    }

    /// Add a rectangle to the region. Empty rectangles are ignored.
    #[must_use]
    pub fn with(mut self, rect: Rect) -> Self {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
        self
    }

    /// Whether any member rectangle contains the point.
    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.rects.iter().any(|r| r.contains(x, y))
    }

    /// Whether the region has no area at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 10);
        assert!(r.is_empty());
        assert!(!r.contains(0, 0));
    }

    #[test]
    fn edges_saturate() {
        let r = Rect::new(u16::MAX - 1, u16::MAX - 1, 10, 10);
        assert_eq!(r.right(), u16::MAX);
        assert_eq!(r.bottom(), u16::MAX);
    }

    #[test]
    fn region_does_not_bridge_gaps() {
        let region = HitRegion::new()
            .with(Rect::new(0, 0, 4, 1))
            .with(Rect::new(0, 5, 10, 3));
        assert!(region.contains(1, 0));
        assert!(region.contains(9, 7));
        // Between the trigger row and the panel.
        assert!(!region.contains(1, 2));
    }

    #[test]
    fn region_skips_empty_rects() {
        let region = HitRegion::new().with(Rect::default());
        assert!(region.is_empty());
        assert!(!region.contains(0, 0));
    }
}
