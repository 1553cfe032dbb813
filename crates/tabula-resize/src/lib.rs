#![forbid(unsafe_code)]

//! Table column-resize engine.
//!
//! # Role in Tabula
//! `tabula-resize` turns pointer drags on table column boundaries into
//! `colwidth` edits of the document, and keeps the rendered column group in
//! step with the committed (or previewed) widths.
//!
//! # Pipeline
//! ```text
//! PointerEvent ─▶ HitTester ─▶ ResizeMachine ─▶ commit_column_width ─▶ Transaction
//!                   │  ▲                              │
//!                TableMap ◀───────────────────────────┘ (recomputed per read)
//!                   │
//!                   └─▶ project_columns / handle_decorations ─▶ TableView
//! ```
//!
//! [`ColumnResizing`] wires the stages to a host through the [`EditorView`]
//! trait.

pub mod cells;
pub mod commit;
pub mod config;
pub mod error;
pub mod machine;
pub mod plugin;
pub mod projector;
pub mod table_map;
pub mod table_view;
pub mod view;

pub use cells::{CellRef, TableRef, cell_around, points_at_cell};
pub use commit::{COMMIT_ORIGIN, commit_column_width};
pub use config::{ConfigError, DEFAULT_CELL_MIN_WIDTH, DEFAULT_HANDLE_WIDTH, ResizeConfig};
pub use error::GridError;
pub use hit_test::{Edge, HitTester, edge_cell};
pub use machine::{
    CancelReason, DragOrigin, NoopReason, ResizeEffect, ResizeInput, ResizeMachine, ResizeState,
    ResizeTransition,
};
pub use plugin::{ColumnResizing, RESIZE_CURSOR_CLASS};
pub use projector::{
    ColumnProjection, HANDLE_CLASS, HandleDecoration, PreviewOverride, TableWidth,
    handle_decorations, project_columns,
};
pub use table_map::{CellRect, TableMap, TableProblem};
pub use table_view::{
    ColGroup, ColGroupPatch, MutationKind, MutationRecord, MutationTarget, TableStyle, TableView,
    update_columns,
};
pub use view::EditorView;
