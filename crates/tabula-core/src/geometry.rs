#![forbid(unsafe_code)]

//! Geometric primitives.

/// A point in viewport pixels (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle for layout bounds and hit testing.
///
/// Uses viewport pixel coordinates, the space pointer events arrive in.
/// Width and height are unsigned, so `right()` never precedes the
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Horizontal distance from `x` to the left edge (negative when `x` is
    /// left of the rectangle).
    #[inline]
    pub const fn distance_from_left(&self, x: i32) -> i64 {
        x as i64 - self.left() as i64
    }

    /// Horizontal distance from `x` to the right edge (negative when `x` is
    /// right of the rectangle).
    #[inline]
    pub const fn distance_from_right(&self, x: i32) -> i64 {
        self.right() as i64 - x as i64
    }
}
