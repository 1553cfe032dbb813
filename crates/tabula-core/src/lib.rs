#![forbid(unsafe_code)]

//! Core: pixel geometry, pointer events, and logging.
//!
//! # Role in Tabula
//! `tabula-core` is the input layer. It owns the coordinate types the host
//! reports layout in and the normalized pointer events the resize engine
//! consumes.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Point`] and [`geometry::Rect`] in CSS pixels.
//! - **Event**: canonical pointer events (move, down, up, leave) with the
//!   pressed-button set.
//! - **Logging**: tracing macro re-exports behind the `tracing` feature.
//!
//! # How it fits in the system
//! `tabula-resize` consumes `tabula-core::event::PointerEvent` values and
//! hit-tests them against `Rect`s supplied by the host editor. The document
//! model (`tabula-doc`) is independent of input, so this crate is the bridge
//! between host input and the structural engine.

pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
