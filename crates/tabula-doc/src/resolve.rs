#![forbid(unsafe_code)]

//! Resolved positions: a document offset annotated with the chain of
//! ancestors that contain it.

use crate::error::DocError;
use crate::node::Node;

#[derive(Debug, Clone, Copy)]
struct PathEntry<'a> {
    node: &'a Node,
    index: usize,
    /// Absolute position of the start of child `index`.
    offset: usize,
}

/// A position resolved against a specific document value.
///
/// Depth 0 is the document itself; `depth()` is the innermost node whose
/// content contains the position.
#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
    pos: usize,
    path: Vec<PathEntry<'a>>,
    parent_offset: usize,
}

impl<'a> ResolvedPos<'a> {
    pub(crate) fn resolve(doc: &'a Node, pos: usize) -> Result<Self, DocError> {
        let size = doc.content_size();
        if pos > size {
            return Err(DocError::PositionOutOfRange { pos, size });
        }
        let mut path = Vec::new();
        let mut node = doc;
        let mut start = 0;
        let mut parent_offset = pos;
        loop {
            let (index, offset) = node
                .find_index(parent_offset)
                .ok_or(DocError::PositionOutOfRange { pos, size })?;
            let rem = parent_offset - offset;
            path.push(PathEntry {
                node,
                index,
                offset: start + offset,
            });
            if rem == 0 {
                break;
            }
            let Some(child) = node.child(index) else {
                break;
            };
            if child.is_text() {
                break;
            }
            node = child;
            parent_offset = rem - 1;
            start += offset + 1;
        }
        Ok(Self {
            pos,
            path,
            parent_offset,
        })
    }

    /// The absolute position.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Depth of the innermost containing node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    /// Offset of the position inside its parent's content.
    #[must_use]
    pub const fn parent_offset(&self) -> usize {
        self.parent_offset
    }

    /// Ancestor at `depth`.
    #[must_use]
    pub fn node(&self, depth: usize) -> Option<&'a Node> {
        self.path.get(depth).map(|entry| entry.node)
    }

    /// The innermost containing node.
    #[must_use]
    pub fn parent(&self) -> &'a Node {
        self.path[self.depth()].node
    }

    /// Document root.
    #[must_use]
    pub fn doc(&self) -> &'a Node {
        self.path[0].node
    }

    /// Index into the ancestor at `depth`.
    #[must_use]
    pub fn index(&self, depth: usize) -> Option<usize> {
        self.path.get(depth).map(|entry| entry.index)
    }

    /// Absolute start of the content of the ancestor at `depth`.
    #[must_use]
    pub fn start(&self, depth: usize) -> Option<usize> {
        match depth {
            0 => Some(0),
            d if d <= self.depth() => Some(self.path[d - 1].offset + 1),
            _ => None,
        }
    }

    /// Absolute end of the content of the ancestor at `depth`.
    #[must_use]
    pub fn end(&self, depth: usize) -> Option<usize> {
        Some(self.start(depth)? + self.node(depth)?.content_size())
    }

    /// Position directly before the ancestor at `depth` (`depth >= 1`).
    #[must_use]
    pub fn before(&self, depth: usize) -> Option<usize> {
        if depth == 0 || depth > self.depth() {
            return None;
        }
        Some(self.path[depth - 1].offset)
    }

    /// Position directly after the ancestor at `depth` (`depth >= 1`).
    #[must_use]
    pub fn after(&self, depth: usize) -> Option<usize> {
        Some(self.before(depth)? + self.node(depth)?.node_size())
    }

    /// The node directly after the position, if the position sits on a
    /// child boundary (or inside a text node).
    #[must_use]
    pub fn node_after(&self) -> Option<&'a Node> {
        let entry = self.path[self.depth()];
        entry.node.child(entry.index)
    }

    /// The node directly before the position.
    #[must_use]
    pub fn node_before(&self) -> Option<&'a Node> {
        let entry = self.path[self.depth()];
        if self.pos > entry.offset {
            return entry.node.child(entry.index);
        }
        entry
            .index
            .checked_sub(1)
            .and_then(|index| entry.node.child(index))
    }
}

impl Node {
    /// Resolve a document position.
    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos<'_>, DocError> {
        ResolvedPos::resolve(self, pos)
    }
}
