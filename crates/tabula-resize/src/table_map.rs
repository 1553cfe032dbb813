#![forbid(unsafe_code)]

//! Dense grid map of a table's cells.
//!
//! [`TableMap`] flattens a row/cell tree into a `width × height` array of
//! slots. Each slot holds the offset (relative to the start of the table's
//! content) of the cell covering it, so a cell spanning two rows and two
//! columns appears in four slots.
//!
//! # Invariants
//!
//! 1. `slots().len() == width() * height()`.
//! 2. Every slot holds the offset of a cell node in the mapped table.
//! 3. The slots of one cell form a rectangle, unless the table was repaired
//!    (see [`TableProblem`]).
//!
//! # Failure Modes
//!
//! Tables are mapped defensively. Documents can transiently violate the
//! row-width invariant between structural steps, so instead of failing the
//! map repairs and records what it found:
//!
//! - Units that would run past the grid width are dropped (`Overflow`).
//! - Units colliding with a slot claimed by an earlier rowspan are dropped
//!   (`Collision`).
//! - Rowspans reaching below the last row are clipped (`OverlongRowspan`).
//! - Slots nobody claimed are filled from a neighbouring slot (`Missing`).
//! - `colwidth` arrays whose length differs from `colspan` are ignored
//!   (`ColwidthMismatch`).
//!
//! Only a table without a single cell is an error.

use tabula_doc::{Node, TableRole};

use crate::error::GridError;

/// A repair applied while mapping a malformed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableProblem {
    /// A cell ran past the grid width; `units` columns were dropped.
    Overflow { row: usize, pos: usize, units: usize },
    /// A cell overlapped a slot already claimed; `units` were dropped.
    Collision { row: usize, pos: usize, units: usize },
    /// A rowspan extended `rows` past the end of the table.
    OverlongRowspan { pos: usize, rows: usize },
    /// `count` slots of `row` were unclaimed and got filled from a neighbour.
    Missing { row: usize, count: usize },
    /// The cell's `colwidth` length differs from its `colspan`.
    ColwidthMismatch { pos: usize },
}

/// Grid rectangle covered by a cell, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl CellRect {
    #[must_use]
    pub const fn colspan(&self) -> usize {
        self.right - self.left
    }

    #[must_use]
    pub const fn rowspan(&self) -> usize {
        self.bottom - self.top
    }
}

/// Dense slot map of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMap {
    width: usize,
    height: usize,
    map: Vec<usize>,
    column_widths: Vec<Option<u32>>,
    problems: Vec<TableProblem>,
}

fn is_row(node: &Node) -> bool {
    node.kind().table_role() == Some(TableRole::Row)
}

fn span(value: u32) -> usize {
    value.max(1) as usize
}

/// Widest row, counting columns occupied by rowspans from rows above.
fn find_width(table: &Node) -> usize {
    let rows: Vec<&Node> = table.children().filter(|n| is_row(n)).collect();
    let mut width = 0;
    let mut has_rowspan = false;
    for (row, row_node) in rows.iter().enumerate() {
        let mut row_width = 0;
        if has_rowspan {
            for (j, prev) in rows.iter().enumerate().take(row) {
                row_width += prev
                    .children()
                    .filter(|cell| j + span(cell.attrs().rowspan) > row)
                    .map(|cell| span(cell.attrs().colspan))
                    .sum::<usize>();
            }
        }
        for cell in row_node.children() {
            row_width += span(cell.attrs().colspan);
            has_rowspan |= cell.attrs().rowspan > 1;
        }
        width = width.max(row_width);
    }
    width
}

impl TableMap {
    /// Map a table node.
    pub fn compute(table: &Node) -> Result<TableMap, GridError> {
        let _span = tracing::trace_span!("table_map_compute").entered();
        let height = table.children().filter(|n| is_row(n)).count();
        let width = find_width(table);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyTable { rows: height });
        }

        let mut slots: Vec<Option<usize>> = vec![None; width * height];
        let mut column_widths: Vec<Option<u32>> = vec![None; width];
        let mut problems = Vec::new();

        let mut pos = 0;
        let mut row = 0;
        for row_node in table.children() {
            if !is_row(row_node) {
                pos += row_node.node_size();
                continue;
            }
            pos += 1;
            let row_start = row * width;
            let row_end = row_start + width;
            let mut map_pos = row_start;
            for cell in row_node.children() {
                let attrs = cell.attrs();
                let colspan = span(attrs.colspan);
                let rowspan = span(attrs.rowspan);
                while map_pos < row_end && slots[map_pos].is_some() {
                    map_pos += 1;
                }
                if map_pos == row_end {
                    problems.push(TableProblem::Overflow {
                        row,
                        pos,
                        units: colspan,
                    });
                    pos += cell.node_size();
                    continue;
                }
                let widths = attrs.colwidth.as_ref().filter(|w| {
                    let fits = w.len() == colspan;
                    if !fits {
                        problems.push(TableProblem::ColwidthMismatch { pos });
                    }
                    fits
                });
                let first_col = map_pos - row_start;
                let fitting = colspan.min(width - first_col);
                if fitting < colspan {
                    problems.push(TableProblem::Overflow {
                        row,
                        pos,
                        units: colspan - fitting,
                    });
                }
                for h in 0..rowspan {
                    if row + h >= height {
                        problems.push(TableProblem::OverlongRowspan {
                            pos,
                            rows: rowspan - h,
                        });
                        break;
                    }
                    let start = map_pos + h * width;
                    for w in 0..fitting {
                        let slot = &mut slots[start + w];
                        if slot.is_none() {
                            *slot = Some(pos);
                        } else {
                            problems.push(TableProblem::Collision {
                                row: row + h,
                                pos,
                                units: fitting - w,
                            });
                            break;
                        }
                    }
                }
                if let Some(widths) = widths {
                    for (w, unit) in widths.iter().take(fitting).enumerate() {
                        let column = &mut column_widths[first_col + w];
                        if column.is_none() {
                            *column = *unit;
                        }
                    }
                }
                map_pos += fitting;
                pos += cell.node_size();
            }
            pos += 1;
            row += 1;
        }

        let map = fill_missing(&mut slots, width, height, &mut problems)
            .ok_or(GridError::EmptyTable { rows: height })?;
        if !problems.is_empty() {
            tracing::warn!(
                width,
                height,
                problems = ?problems,
                "malformed table repaired while mapping"
            );
        }
        Ok(TableMap {
            width,
            height,
            map,
            column_widths,
            problems,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// All slots in row-major order.
    #[must_use]
    pub fn slots(&self) -> &[usize] {
        &self.map
    }

    /// Repairs applied while mapping.
    #[must_use]
    pub fn problems(&self) -> &[TableProblem] {
        &self.problems
    }

    /// Cell offset at `(row, col)`.
    #[must_use]
    pub fn slot(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.map.get(row * self.width + col).copied()
    }

    /// Index of the first slot holding the cell at `offset`.
    #[must_use]
    pub fn index_of(&self, offset: usize) -> Option<usize> {
        self.map.iter().position(|&slot| slot == offset)
    }

    /// Leftmost column of the cell at `offset`.
    #[must_use]
    pub fn col_count(&self, offset: usize) -> Option<usize> {
        self.index_of(offset).map(|index| index % self.width)
    }

    /// Top row of the cell at `offset`.
    #[must_use]
    pub fn row_at(&self, offset: usize) -> Option<usize> {
        self.index_of(offset).map(|index| index / self.width)
    }

    /// Grid rectangle of the cell at `offset`.
    pub fn find_cell(&self, offset: usize) -> Result<CellRect, GridError> {
        let index = self
            .index_of(offset)
            .ok_or(GridError::CellNotInMap { offset })?;
        let left = index % self.width;
        let top = index / self.width;
        let mut right = left + 1;
        while right < self.width && self.map[top * self.width + right] == offset {
            right += 1;
        }
        let mut bottom = top + 1;
        while bottom < self.height && self.map[bottom * self.width + left] == offset {
            bottom += 1;
        }
        Ok(CellRect {
            left,
            top,
            right,
            bottom,
        })
    }

    /// First committed width found for `col`, scanning rows top-down.
    #[must_use]
    pub fn column_width(&self, col: usize) -> Option<u32> {
        self.column_widths.get(col).copied().flatten()
    }

    /// Committed widths for every column.
    #[must_use]
    pub fn column_widths(&self) -> &[Option<u32>] {
        &self.column_widths
    }

    /// Whether the boundary between `col` and `col + 1` is covered by a
    /// spanning cell in every row. Handle decorations are suppressed for
    /// such boundaries.
    #[must_use]
    pub fn is_interior_boundary(&self, col: usize) -> bool {
        if col + 1 >= self.width {
            return false;
        }
        (0..self.height).all(|row| self.slot(row, col) == self.slot(row, col + 1))
    }

    /// Distinct cell offsets in slot order.
    #[must_use]
    pub fn cells(&self) -> Vec<usize> {
        let mut seen = ahash::AHashSet::with_capacity(self.map.len());
        self.map
            .iter()
            .copied()
            .filter(|offset| seen.insert(*offset))
            .collect()
    }
}

/// Fill unclaimed slots from the left, then the right, then above and below.
fn fill_missing(
    slots: &mut [Option<usize>],
    width: usize,
    height: usize,
    problems: &mut Vec<TableProblem>,
) -> Option<Vec<usize>> {
    for row in 0..height {
        let cells = &mut slots[row * width..(row + 1) * width];
        let count = cells.iter().filter(|slot| slot.is_none()).count();
        if count == 0 {
            continue;
        }
        problems.push(TableProblem::Missing { row, count });
        let mut carry = None;
        for slot in cells.iter_mut() {
            match slot {
                Some(offset) => carry = Some(*offset),
                None => *slot = carry,
            }
        }
        let mut carry = None;
        for slot in cells.iter_mut().rev() {
            match slot {
                Some(offset) => carry = Some(*offset),
                None => *slot = carry,
            }
        }
    }
    for row in 1..height {
        for col in 0..width {
            if slots[row * width + col].is_none() {
                slots[row * width + col] = slots[(row - 1) * width + col];
            }
        }
    }
    for row in (0..height.saturating_sub(1)).rev() {
        for col in 0..width {
            if slots[row * width + col].is_none() {
                slots[row * width + col] = slots[(row + 1) * width + col];
            }
        }
    }
    slots.iter().copied().collect()
}
