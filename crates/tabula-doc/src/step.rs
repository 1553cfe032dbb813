#![forbid(unsafe_code)]

//! Atomic document steps.
//!
//! A step turns one document value into the next and reports how positions
//! moved. Only two kinds exist in the reference host: replacing a node's
//! cell attributes in place (positions never move) and replacing a run of
//! sibling nodes.

use crate::error::DocError;
use crate::mapping::StepMap;
use crate::node::{CellAttrs, Node};

/// A single document edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace the attributes of the cell starting at `pos`.
    SetCellAttrs { pos: usize, attrs: CellAttrs },
    /// Replace the siblings between `from` and `to` (both child boundaries
    /// of the same parent) with `nodes`.
    Replace {
        from: usize,
        to: usize,
        nodes: Vec<Node>,
    },
}

impl Step {
    /// Apply this step, producing the next document and its position map.
    pub fn apply(&self, doc: &Node) -> Result<(Node, StepMap), DocError> {
        match self {
            Self::SetCellAttrs { pos, attrs } => {
                let next = update_node_at(doc, *pos, *pos, &|node| {
                    if !node.kind().is_cell() {
                        return Err(DocError::NotACell { pos: *pos });
                    }
                    Ok(node.with_attrs(attrs.clone()))
                })?;
                Ok((next, StepMap::empty()))
            }
            Self::Replace { from, to, nodes } => {
                if from > to {
                    return Err(DocError::InvalidReplace {
                        from: *from,
                        to: *to,
                    });
                }
                let size = doc.content_size();
                if *to > size {
                    return Err(DocError::PositionOutOfRange { pos: *to, size });
                }
                let next = replace_range(doc, *from, *to, nodes, (*from, *to))?;
                let inserted = nodes.iter().map(Node::node_size).sum();
                Ok((next, StepMap::replaced(*from, to - from, inserted)))
            }
        }
    }
}

fn update_node_at(
    node: &Node,
    pos: usize,
    abs: usize,
    f: &dyn Fn(&Node) -> Result<Node, DocError>,
) -> Result<Node, DocError> {
    let (index, offset) = node.find_index(pos).ok_or(DocError::NoNodeAt { pos: abs })?;
    let child = node.child(index).ok_or(DocError::NoNodeAt { pos: abs })?;
    let updated = if offset == pos {
        f(child)?
    } else if child.is_text() {
        return Err(DocError::NoNodeAt { pos: abs });
    } else {
        update_node_at(child, pos - offset - 1, abs, f)?
    };
    Ok(node.with_child(index, updated))
}

fn replace_range(
    node: &Node,
    from: usize,
    to: usize,
    nodes: &[Node],
    abs: (usize, usize),
) -> Result<Node, DocError> {
    let invalid = DocError::InvalidReplace {
        from: abs.0,
        to: abs.1,
    };
    let (start_index, start_offset) = node.find_index(from).ok_or(invalid.clone())?;
    if start_offset == from {
        let (end_index, end_offset) = node.find_index(to).ok_or(invalid.clone())?;
        if end_offset != to {
            return Err(invalid);
        }
        return Ok(node.splice(start_index, end_index, nodes));
    }
    let child = node.child(start_index).ok_or(invalid.clone())?;
    let child_end = start_offset + child.node_size();
    if child.is_text() || to >= child_end {
        return Err(invalid);
    }
    let inner = replace_range(
        child,
        from - start_offset - 1,
        to - start_offset - 1,
        nodes,
        abs,
    )?;
    Ok(node.with_child(start_index, inner))
}
