#![forbid(unsafe_code)]

//! Column-resize interaction state machine.
//!
//! The machine is pure: it consumes [`ResizeInput`]s that the plugin has
//! already resolved against the document (hit tests, re-mapped handles) and
//! answers each with a [`ResizeTransition`] describing what changed. Side
//! effects such as dispatching the width commit or installing window
//! listeners are driven by the caller from those records.
//!
//! ```text
//!          Hover(Some)             Press
//!   Idle ─────────────▶ Armed ─────────────▶ Dragging
//!    ▲  ◀───────────────  │                    │
//!    │   Hover(None)/Leave│                    │ DragMove (preview)
//!    │                    │ DocChanged(None)   │
//!    └────────────────────┴────────────────────┘
//!        Release (commit) / Blur / DocChanged(None)
//! ```
//!
//! A handle is the document position directly before the cell whose right
//! edge is being resized.

/// Where a drag started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOrigin {
    /// Pointer x at press time.
    pub origin_x: i32,
    /// Column width at press time.
    pub start_width: u32,
}

/// Resize lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Armed {
        handle: usize,
    },
    Dragging {
        handle: usize,
        drag: DragOrigin,
    },
}

impl ResizeState {
    /// The armed or dragged handle.
    #[must_use]
    pub const fn handle(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Armed { handle } | Self::Dragging { handle, .. } => Some(*handle),
        }
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// One resolved interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeInput {
    /// Pointer moved over the editor; `handle` is the current hit.
    Hover { handle: Option<usize> },
    /// Pointer left the editor surface.
    Leave,
    /// Primary button pressed at `x`; `start_width` is the column's width.
    Press { x: i32, start_width: u32 },
    /// Pointer moved with a button held.
    DragMove { x: i32 },
    /// Button released (or a move arrived with no buttons held).
    Release { x: i32 },
    /// The document changed; `handle` is the re-mapped handle, `None` if it
    /// no longer points at a cell.
    DocChanged { handle: Option<usize> },
    /// The editor lost focus.
    Blur,
}

/// Why an input was accepted without changing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoopReason {
    UnchangedHandle,
    IdleWithoutHandle,
    DragInProgress,
    NotDragging,
    HandleUnchangedByEdit,
}

/// Why a live handle was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Blur,
    HandleInvalidated,
    Programmatic,
}

/// What one transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEffect {
    Armed { handle: usize },
    Disarmed { handle: usize },
    DragStarted { handle: usize, drag: DragOrigin },
    Previewed { handle: usize, width: u32 },
    Committed { handle: usize, width: u32 },
    Canceled { handle: usize, reason: CancelReason },
    Remapped { from: usize, to: usize },
    Noop { reason: NoopReason },
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTransition {
    pub transition_id: u64,
    pub from: ResizeState,
    pub to: ResizeState,
    pub effect: ResizeEffect,
}

impl ResizeTransition {
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, ResizeEffect::Noop { .. })
    }
}

/// Runtime lifecycle machine for column resizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeMachine {
    state: ResizeState,
    min_width: u32,
    transition_counter: u64,
}

impl ResizeMachine {
    #[must_use]
    pub const fn new(min_width: u32) -> Self {
        Self {
            state: ResizeState::Idle,
            min_width,
            transition_counter: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ResizeState {
        self.state
    }

    #[must_use]
    pub const fn handle(&self) -> Option<usize> {
        self.state.handle()
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    #[must_use]
    pub const fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Width a drag from `drag` reaches at pointer `x`, floored at the
    /// minimum width.
    #[must_use]
    pub fn dragged_width(&self, drag: DragOrigin, x: i32) -> u32 {
        let width = i64::from(drag.start_width) + i64::from(x) - i64::from(drag.origin_x);
        let floored = width.max(i64::from(self.min_width));
        u32::try_from(floored).unwrap_or(u32::MAX)
    }

    /// Reset to Idle, returning a `Canceled` transition if a handle was live.
    pub fn force_cancel(&mut self) -> Option<ResizeTransition> {
        self.cancel(CancelReason::Programmatic)
    }

    fn cancel(&mut self, reason: CancelReason) -> Option<ResizeTransition> {
        let handle = self.state.handle()?;
        Some(self.transition(ResizeState::Idle, ResizeEffect::Canceled { handle, reason }))
    }

    fn transition(&mut self, to: ResizeState, effect: ResizeEffect) -> ResizeTransition {
        let from = self.state;
        self.state = to;
        self.transition_counter = self.transition_counter.saturating_add(1);
        ResizeTransition {
            transition_id: self.transition_counter,
            from,
            to,
            effect,
        }
    }

    fn noop(&mut self, reason: NoopReason) -> ResizeTransition {
        self.transition(self.state, ResizeEffect::Noop { reason })
    }

    /// Apply one input.
    pub fn apply(&mut self, input: ResizeInput) -> ResizeTransition {
        use ResizeState::{Armed, Dragging, Idle};

        match (self.state, input) {
            (Dragging { .. }, ResizeInput::Hover { .. } | ResizeInput::Leave) => {
                self.noop(NoopReason::DragInProgress)
            }
            (Idle, ResizeInput::Hover { handle: None } | ResizeInput::Leave) => {
                self.noop(NoopReason::IdleWithoutHandle)
            }
            (Idle, ResizeInput::Hover { handle: Some(handle) }) => {
                self.transition(Armed { handle }, ResizeEffect::Armed { handle })
            }
            (Armed { handle: current }, ResizeInput::Hover { handle: Some(handle) }) => {
                if current == handle {
                    self.noop(NoopReason::UnchangedHandle)
                } else {
                    self.transition(Armed { handle }, ResizeEffect::Armed { handle })
                }
            }
            (Armed { handle }, ResizeInput::Hover { handle: None } | ResizeInput::Leave) => {
                self.transition(Idle, ResizeEffect::Disarmed { handle })
            }

            (Idle, ResizeInput::Press { .. }) => self.noop(NoopReason::IdleWithoutHandle),
            (Dragging { .. }, ResizeInput::Press { .. }) => self.noop(NoopReason::DragInProgress),
            (Armed { handle }, ResizeInput::Press { x, start_width }) => {
                let drag = DragOrigin {
                    origin_x: x,
                    start_width,
                };
                self.transition(
                    Dragging { handle, drag },
                    ResizeEffect::DragStarted { handle, drag },
                )
            }

            (Dragging { handle, drag }, ResizeInput::DragMove { x }) => {
                let width = self.dragged_width(drag, x);
                self.transition(self.state, ResizeEffect::Previewed { handle, width })
            }
            (Dragging { handle, drag }, ResizeInput::Release { x }) => {
                let width = self.dragged_width(drag, x);
                self.transition(Idle, ResizeEffect::Committed { handle, width })
            }
            (Idle | Armed { .. }, ResizeInput::DragMove { .. } | ResizeInput::Release { .. }) => {
                self.noop(NoopReason::NotDragging)
            }

            (Idle, ResizeInput::DocChanged { .. } | ResizeInput::Blur) => {
                self.noop(NoopReason::IdleWithoutHandle)
            }
            (Armed { handle } | Dragging { handle, .. }, ResizeInput::DocChanged { handle: None }) => {
                self.transition(
                    Idle,
                    ResizeEffect::Canceled {
                        handle,
                        reason: CancelReason::HandleInvalidated,
                    },
                )
            }
            (Armed { handle: from }, ResizeInput::DocChanged { handle: Some(to) }) => {
                if from == to {
                    self.noop(NoopReason::HandleUnchangedByEdit)
                } else {
                    self.transition(Armed { handle: to }, ResizeEffect::Remapped { from, to })
                }
            }
            (Dragging { handle: from, drag }, ResizeInput::DocChanged { handle: Some(to) }) => {
                if from == to {
                    self.noop(NoopReason::HandleUnchangedByEdit)
                } else {
                    self.transition(
                        Dragging { handle: to, drag },
                        ResizeEffect::Remapped { from, to },
                    )
                }
            }
            (Armed { handle } | Dragging { handle, .. }, ResizeInput::Blur) => self.transition(
                Idle,
                ResizeEffect::Canceled {
                    handle,
                    reason: CancelReason::Blur,
                },
            ),
        }
    }
}

impl Default for ResizeMachine {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CELL_MIN_WIDTH)
    }
}
