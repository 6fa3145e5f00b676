//! Property-based invariants for hit testing.
//!
//! 1. A region contains a point iff one of its member rects does.
//! 2. Adding a rect never shrinks the region.
//! 3. No panics on extreme u16 values.

use dropmenu_core::geometry::{HitRegion, Rect};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (any::<u16>(), any::<u16>(), any::<u16>(), any::<u16>())
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=200, 0u16..=200, 0u16..=50, 0u16..=50).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn region_is_union_of_members(
        a in small_rect_strategy(),
        b in small_rect_strategy(),
        px in 0u16..=260,
        py in 0u16..=260,
    ) {
        let region = HitRegion::new().with(a).with(b);
        prop_assert_eq!(region.contains(px, py), a.contains(px, py) || b.contains(px, py));
    }

    #[test]
    fn adding_rects_is_monotonic(
        a in small_rect_strategy(),
        b in small_rect_strategy(),
        px in 0u16..=260,
        py in 0u16..=260,
    ) {
        let one = HitRegion::new().with(a);
        let two = one.clone().with(b);
        if one.contains(px, py) {
            prop_assert!(two.contains(px, py));
        }
    }

    #[test]
    fn extreme_rects_do_not_panic(r in rect_strategy(), px in any::<u16>(), py in any::<u16>()) {
        let _ = r.contains(px, py);
        let _ = r.right();
        let _ = r.bottom();
    }
}
