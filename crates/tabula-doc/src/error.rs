#![forbid(unsafe_code)]

//! Document model errors.

use std::fmt;

/// Errors raised while resolving positions or applying steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    /// Position lies outside `0..=size`.
    PositionOutOfRange { pos: usize, size: usize },
    /// No node starts at the given position.
    NoNodeAt { pos: usize },
    /// The node at the given position is not a table cell.
    NotACell { pos: usize },
    /// A replace range does not start and end at child boundaries of one parent.
    InvalidReplace { from: usize, to: usize },
    /// A transaction was built against a document that is no longer current.
    StaleTransaction { expected_version: u64, actual_version: u64 },
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfRange { pos, size } => {
                write!(f, "position {pos} out of range (document size {size})")
            }
            Self::NoNodeAt { pos } => write!(f, "no node at position {pos}"),
            Self::NotACell { pos } => write!(f, "node at position {pos} is not a table cell"),
            Self::InvalidReplace { from, to } => {
                write!(f, "range {from}..{to} does not span whole siblings")
            }
            Self::StaleTransaction {
                expected_version,
                actual_version,
            } => write!(
                f,
                "transaction built for version {expected_version}, state is at {actual_version}"
            ),
        }
    }
}

impl std::error::Error for DocError {}
