#![forbid(unsafe_code)]

//! Grid errors.

use std::fmt;

/// Errors raised while mapping a table or locating cells in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The table has no cells to map.
    EmptyTable { rows: usize },
    /// The position does not point at a table cell.
    NotACell { pos: usize },
    /// The cell offset is not part of the table map.
    CellNotInMap { offset: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTable { rows } => write!(f, "table with {rows} rows has no cells"),
            Self::NotACell { pos } => write!(f, "position {pos} does not point at a cell"),
            Self::CellNotInMap { offset } => {
                write!(f, "cell at table offset {offset} is not in the table map")
            }
        }
    }
}

impl std::error::Error for GridError {}
