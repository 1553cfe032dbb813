#![forbid(unsafe_code)]

//! Column projection and resize-handle decorations.
//!
//! Both are pure functions of a [`TableMap`]: the projection declares one
//! width per grid column plus a table width, and the decorations mark where
//! the active boundary's handle is drawn in every row.

use crate::cells::TableRef;
use crate::table_map::TableMap;

/// CSS class of the handle decoration widget.
pub const HANDLE_CLASS: &str = "column-resize-handle";

/// Width declared on the table element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableWidth {
    /// Every column has a width, so the table is exactly their sum.
    Fixed(u32),
    /// Some columns are unsized; the sum (with minimums) is a floor.
    Min(u32),
}

/// A width shown for one column in place of the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOverride {
    pub column: usize,
    pub width: u32,
}

/// Declared widths for a table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProjection {
    /// One entry per grid column; `None` leaves the column unsized.
    pub columns: Vec<Option<u32>>,
    pub table_width: TableWidth,
}

/// Project committed widths (and an optional drag preview) onto columns.
#[must_use]
pub fn project_columns(
    map: &TableMap,
    preview: Option<PreviewOverride>,
    min_width: u32,
) -> ColumnProjection {
    let mut total: u32 = 0;
    let mut fixed = true;
    let columns = (0..map.width())
        .map(|col| {
            let width = match preview {
                Some(p) if p.column == col => Some(p.width),
                _ => map.column_width(col),
            };
            total = total.saturating_add(width.unwrap_or(min_width));
            fixed &= width.is_some();
            width
        })
        .collect();
    ColumnProjection {
        columns,
        table_width: if fixed {
            TableWidth::Fixed(total)
        } else {
            TableWidth::Min(total)
        },
    }
}

/// One handle widget, placed just inside the end of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleDecoration {
    pub row: usize,
    pub column: usize,
    /// Document position of the widget.
    pub anchor: usize,
}

impl HandleDecoration {
    #[must_use]
    pub const fn class(&self) -> &'static str {
        HANDLE_CLASS
    }
}

/// Handle widgets for the boundary on the right of `column`.
///
/// A boundary spanned in every row gets none. Otherwise a row gets a widget
/// when the boundary separates two cells there (or is the table edge) and
/// the slot is the top slot of its cell.
#[must_use]
pub fn handle_decorations(
    table: TableRef<'_>,
    map: &TableMap,
    column: usize,
) -> Vec<HandleDecoration> {
    let mut decorations = Vec::new();
    if column >= map.width() || map.is_interior_boundary(column) {
        return decorations;
    }
    for row in 0..map.height() {
        let Some(offset) = map.slot(row, column) else {
            continue;
        };
        let at_edge = column + 1 == map.width();
        if !at_edge && map.slot(row, column + 1) == Some(offset) {
            continue;
        }
        if row > 0 && map.slot(row - 1, column) == Some(offset) {
            continue;
        }
        let Some(cell) = table.node.node_at(offset) else {
            continue;
        };
        decorations.push(HandleDecoration {
            row,
            column,
            anchor: table.start + offset + cell.node_size() - 1,
        });
    }
    decorations
}
