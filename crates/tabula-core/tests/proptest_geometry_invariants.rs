//! Property-based invariant tests for rectangle edge distances.
//!
//! 1. Edge distances always sum to the rectangle width
//! 2. Both distances are non-negative exactly between the two edges

use proptest::prelude::*;
use tabula_core::geometry::Rect;

// ── Strategies ──────────────────────────────────────────────────────────

fn rect() -> impl Strategy<Value = Rect> {
    (-500i32..500, -500i32..500, 0u32..300, 0u32..300)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Distances sum to width
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn distances_sum_to_width(r in rect(), x in -900i32..900) {
        prop_assert_eq!(
            r.distance_from_left(x) + r.distance_from_right(x),
            i64::from(r.width)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Inside means both distances are non-negative
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inside_iff_both_distances_non_negative(r in rect(), x in -900i32..900) {
        let inside = x >= r.left() && x <= r.right();
        let both = r.distance_from_left(x) >= 0 && r.distance_from_right(x) >= 0;
        prop_assert_eq!(inside, both);
    }
}
