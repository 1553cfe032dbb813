#![forbid(unsafe_code)]

//! Writing a column width back into the document.

use tabula_doc::{ColWidths, DocError, EditorState, Transaction, TransactionMeta};

use crate::cells::TableRef;
use crate::table_map::TableMap;

/// Transaction origin label for width commits.
pub const COMMIT_ORIGIN: &str = "column_resize";

/// Build one transaction setting column `column` of `table` to `width`.
///
/// Every cell covering the column gets its matching `colwidth` unit set.
/// Cells continuing a rowspan from the row above are visited once, through
/// their top slot. Returns `Ok(None)` when every unit already holds the
/// width.
pub fn commit_column_width(
    state: &EditorState,
    table: TableRef<'_>,
    map: &TableMap,
    column: usize,
    width: u32,
    min_width: u32,
) -> Result<Option<Transaction>, DocError> {
    let width = width.max(min_width);
    let _span = tracing::debug_span!(
        "commit_column_width",
        table = table.pos,
        column,
        width
    )
    .entered();

    let mut tr = Transaction::new(state).with_meta(TransactionMeta {
        add_to_history: true,
        origin: COMMIT_ORIGIN,
    });
    for row in 0..map.height() {
        let Some(offset) = map.slot(row, column) else {
            continue;
        };
        if row > 0 && map.slot(row - 1, column) == Some(offset) {
            continue;
        }
        let pos = table.start + offset;
        let cell = table
            .node
            .node_at(offset)
            .ok_or(DocError::NoNodeAt { pos })?;
        let attrs = cell.attrs();
        let colspan = attrs.colspan.max(1) as usize;
        let index = if colspan == 1 {
            Some(0)
        } else {
            column.checked_sub(map.col_count(offset).unwrap_or(column))
        };
        let Some(index) = index.filter(|&index| index < colspan) else {
            tracing::trace!(pos, column, colspan, "column outside repaired cell");
            continue;
        };
        if attrs.unit_width(index) == Some(width) {
            continue;
        }
        let mut widths = attrs
            .colwidth
            .clone()
            .unwrap_or_else(|| ColWidths::from_elem(None, colspan));
        widths.resize(colspan, None);
        widths[index] = Some(width);
        tr.set_cell_attrs(pos, attrs.with_colwidth(Some(widths)))?;
    }

    if !tr.doc_changed() {
        tracing::debug!("column already at target width");
        return Ok(None);
    }
    tracing::debug!(cells = tr.steps().len(), "column width committed");
    Ok(Some(tr))
}
