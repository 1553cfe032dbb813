#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate their native pointer events (DOM `mousemove`,
//! `mousedown`, ...) into these types before handing them to the resize
//! engine. All events derive `Clone`, `PartialEq`, and `Eq` for use in tests
//! and pattern matching.
//!
//! # Design Notes
//!
//! - Coordinates are viewport pixels, the same space the host reports cell
//!   bounding boxes in.
//! - `buttons` is the set of buttons held *at the time of the event*, not the
//!   button that changed. A move with an empty set during a drag means the
//!   release happened somewhere the engine never saw.

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Pointer buttons held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// No buttons.
        const NONE      = 0b0000;
        /// Primary (usually left) button.
        const PRIMARY   = 0b0001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0010;
        /// Auxiliary (usually middle) button.
        const AUXILIARY = 0b0100;
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Pointer moved.
    Move,
    /// A button was pressed.
    Down,
    /// A button was released.
    Up,
    /// Pointer left the editor element.
    Leave,
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Pointer position in viewport pixels.
    pub position: Point,

    /// Buttons held during the event.
    pub buttons: PointerButtons,
}

impl PointerEvent {
    /// Create a new pointer event with no buttons held.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            buttons: PointerButtons::NONE,
        }
    }

    /// Pointer move with no buttons held.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Primary button press.
    #[must_use]
    pub const fn down(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Down, x, y).with_buttons(PointerButtons::PRIMARY)
    }

    /// Pointer move with the primary button held.
    #[must_use]
    pub const fn dragged(x: i32, y: i32) -> Self {
        Self::moved(x, y).with_buttons(PointerButtons::PRIMARY)
    }

    /// Primary button release.
    #[must_use]
    pub const fn up(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    /// Pointer left the editor element.
    #[must_use]
    pub const fn leave(x: i32, y: i32) -> Self {
        Self::new(PointerEventKind::Leave, x, y)
    }

    /// Create a pointer event with a specific button set.
    #[must_use]
    pub const fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Whether any button is held.
    #[must_use]
    pub const fn any_button_held(&self) -> bool {
        !self.buttons.is_empty()
    }
}
