#![forbid(unsafe_code)]

//! Tabula public facade crate.
//!
//! Re-exports the resize engine, the reference document model, and the
//! input types, and offers a prelude for hosts wiring [`ColumnResizing`]
//! into an editor.

pub mod error;

pub use error::{DegradationAction, Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use tabula_core::event::{PointerButtons, PointerEvent, PointerEventKind};
pub use tabula_core::geometry::{Point, Rect};
#[cfg(feature = "tracing-json")]
pub use tabula_core::logging::init_json_logging;

// --- Document re-exports ---------------------------------------------------

pub use tabula_doc::{
    CellAttrs, ColWidths, DocError, DomAttrs, EditorState, Node, NodeKind, Transaction,
};

// --- Engine re-exports -----------------------------------------------------

pub use tabula_resize::{
    ColumnResizing, ConfigError, EditorView, GridError, HandleDecoration, ResizeConfig,
    ResizeEffect, ResizeState, ResizeTransition, TableMap, TableView,
};

// --- Entry points ----------------------------------------------------------

/// Build a resize plugin after validating `config`.
pub fn column_resizing(config: ResizeConfig) -> Result<ColumnResizing> {
    Ok(ColumnResizing::new(config)?)
}

/// Build a resize plugin from a TOML config file.
#[cfg(feature = "config")]
pub fn column_resizing_from_toml(path: impl AsRef<std::path::Path>) -> Result<ColumnResizing> {
    column_resizing(ResizeConfig::from_toml_file(path)?)
}

/// Map a table node to its slot grid, repairing malformed layouts.
pub fn map_table(table: &Node) -> Result<TableMap> {
    Ok(TableMap::compute(table)?)
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellAttrs, ColumnResizing, DegradationAction, EditorState, EditorView, Error, Node,
        PointerEvent, Rect, ResizeConfig, Result, TableView, Transaction, column_resizing,
        map_table,
    };

    pub use crate::{core, doc, resize};
}

pub use tabula_core as core;
pub use tabula_doc as doc;
pub use tabula_resize as resize;
