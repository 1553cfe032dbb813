#![forbid(unsafe_code)]

//! Locating cells and their enclosing table from document positions.

use tabula_doc::{Node, ResolvedPos, TableRole};

use crate::error::GridError;

fn is_row(node: &Node) -> bool {
    node.kind().table_role() == Some(TableRole::Row)
}

/// Position directly before the cell containing `pos`, if any.
///
/// Walks the ancestors innermost-first and stops at the first table row.
#[must_use]
pub fn cell_around(pos: &ResolvedPos<'_>) -> Option<usize> {
    (1..pos.depth())
        .rev()
        .find(|&d| pos.node(d).is_some_and(is_row))
        .and_then(|d| pos.before(d + 1))
}

/// Whether `pos` sits directly before a cell inside a row.
#[must_use]
pub fn points_at_cell(pos: &ResolvedPos<'_>) -> bool {
    is_row(pos.parent()) && pos.node_after().is_some_and(|n| n.kind().is_cell())
}

/// A table node together with its location in the document.
#[derive(Debug, Clone, Copy)]
pub struct TableRef<'a> {
    pub node: &'a Node,
    /// Position directly before the table.
    pub pos: usize,
    /// Position where the table's content starts.
    pub start: usize,
}

/// A cell node resolved from a position directly before it.
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    /// Position directly before the cell.
    pub pos: usize,
    pub node: &'a Node,
    pub table: TableRef<'a>,
}

impl<'a> CellRef<'a> {
    /// Resolve the cell directly after `pos` in `doc`.
    pub fn at(doc: &'a Node, pos: usize) -> Result<Self, GridError> {
        let resolved = doc.resolve(pos).map_err(|_| GridError::NotACell { pos })?;
        if !points_at_cell(&resolved) {
            return Err(GridError::NotACell { pos });
        }
        let row_depth = resolved.depth();
        let table_depth = row_depth
            .checked_sub(1)
            .filter(|&d| d >= 1)
            .ok_or(GridError::NotACell { pos })?;
        let (Some(node), Some(table), Some(table_pos), Some(start)) = (
            resolved.node_after(),
            resolved.node(table_depth),
            resolved.before(table_depth),
            resolved.start(table_depth),
        ) else {
            return Err(GridError::NotACell { pos });
        };
        Ok(Self {
            pos,
            node,
            table: TableRef {
                node: table,
                pos: table_pos,
                start,
            },
        })
    }

    /// Offset of the cell relative to the table's content start.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.pos - self.table.start
    }
}
