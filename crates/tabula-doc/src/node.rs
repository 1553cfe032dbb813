#![forbid(unsafe_code)]

//! Immutable document nodes.
//!
//! Offsets follow the usual tree convention: a text node occupies one
//! position per character, every other node occupies `content_size + 2`
//! (one token for its opening boundary, one for its closing boundary). The
//! document node itself is never entered, so document positions range over
//! `0..=doc.content_size()`.
//!
//! Children are reference counted, so replacing one node along a path shares
//! every untouched sibling with the previous document value.

use std::sync::Arc;

use smallvec::SmallVec;

/// Per-unit column widths of a cell. `None` means "no committed width".
pub type ColWidths = SmallVec<[Option<u32>; 4]>;

/// Node types understood by the reference host schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Doc,
    Paragraph,
    Text,
    Table,
    TableRow,
    TableCell,
    TableHeader,
}

/// Structural role a node type plays inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableRole {
    Table,
    Row,
    Cell,
    HeaderCell,
}

impl NodeKind {
    /// The table role of this node type, if any.
    #[must_use]
    pub const fn table_role(self) -> Option<TableRole> {
        match self {
            Self::Table => Some(TableRole::Table),
            Self::TableRow => Some(TableRole::Row),
            Self::TableCell => Some(TableRole::Cell),
            Self::TableHeader => Some(TableRole::HeaderCell),
            Self::Doc | Self::Paragraph | Self::Text => None,
        }
    }

    /// Whether this node type is a data or header cell.
    #[must_use]
    pub const fn is_cell(self) -> bool {
        matches!(
            self.table_role(),
            Some(TableRole::Cell | TableRole::HeaderCell)
        )
    }

    /// Schema name, as it would appear in serialized documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Doc => "doc",
            Self::Paragraph => "paragraph",
            Self::Text => "text",
            Self::Table => "table",
            Self::TableRow => "table_row",
            Self::TableCell => "table_cell",
            Self::TableHeader => "table_header",
        }
    }
}

/// Span and width attributes carried by table cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAttrs {
    pub colspan: u32,
    pub rowspan: u32,
    /// One entry per column unit when present (`len == colspan`).
    pub colwidth: Option<ColWidths>,
}

/// Attributes of a plain 1×1 cell; also what non-cell nodes report.
static PLAIN_CELL: CellAttrs = CellAttrs {
    colspan: 1,
    rowspan: 1,
    colwidth: None,
};

impl Default for CellAttrs {
    fn default() -> Self {
        PLAIN_CELL.clone()
    }
}

impl CellAttrs {
    /// Attributes spanning `colspan × rowspan` units with no widths.
    #[must_use]
    pub fn spanning(colspan: u32, rowspan: u32) -> Self {
        Self {
            colspan: colspan.max(1),
            rowspan: rowspan.max(1),
            colwidth: None,
        }
    }

    /// Copy of these attributes with `colwidth` replaced.
    #[must_use]
    pub fn with_colwidth(&self, colwidth: Option<ColWidths>) -> Self {
        Self {
            colwidth,
            ..self.clone()
        }
    }

    /// Committed width of column unit `index`, if any.
    #[must_use]
    pub fn unit_width(&self, index: usize) -> Option<u32> {
        self.colwidth
            .as_ref()
            .and_then(|widths| widths.get(index).copied().flatten())
    }
}

/// A document node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    /// Present only on cell kinds.
    attrs: Option<CellAttrs>,
    content: Vec<Arc<Node>>,
    text: String,
}

impl Node {
    fn branch(
        kind: NodeKind,
        attrs: Option<CellAttrs>,
        children: impl IntoIterator<Item = Node>,
    ) -> Self {
        Self {
            kind,
            attrs,
            content: children.into_iter().map(Arc::new).collect(),
            text: String::new(),
        }
    }

    /// Top-level document node.
    pub fn doc(children: impl IntoIterator<Item = Node>) -> Self {
        Self::branch(NodeKind::Doc, None, children)
    }

    /// Paragraph holding a single text run (empty text yields no child).
    pub fn paragraph(text: &str) -> Self {
        let children = (!text.is_empty()).then(|| Self::text(text));
        Self::branch(NodeKind::Paragraph, None, children)
    }

    /// Text leaf.
    pub fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            attrs: None,
            content: Vec::new(),
            text: text.to_owned(),
        }
    }

    /// Table node from rows.
    pub fn table(rows: impl IntoIterator<Item = Node>) -> Self {
        Self::branch(NodeKind::Table, None, rows)
    }

    /// Table row from cells.
    pub fn row(cells: impl IntoIterator<Item = Node>) -> Self {
        Self::branch(NodeKind::TableRow, None, cells)
    }

    /// Data cell.
    pub fn cell(attrs: CellAttrs, content: impl IntoIterator<Item = Node>) -> Self {
        Self::branch(NodeKind::TableCell, Some(attrs), content)
    }

    /// Header cell.
    pub fn header(attrs: CellAttrs, content: impl IntoIterator<Item = Node>) -> Self {
        Self::branch(NodeKind::TableHeader, Some(attrs), content)
    }

    /// Table whose cells carry the given attributes, each holding an empty
    /// paragraph.
    pub fn table_from_attrs(rows: impl IntoIterator<Item = Vec<CellAttrs>>) -> Self {
        Self::table(rows.into_iter().map(|cells| {
            Self::row(
                cells
                    .into_iter()
                    .map(|attrs| Self::cell(attrs, [Self::paragraph("")])),
            )
        }))
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Cell attributes; plain 1×1 attributes for non-cell nodes.
    #[must_use]
    pub fn attrs(&self) -> &CellAttrs {
        self.attrs.as_ref().unwrap_or(&PLAIN_CELL)
    }

    /// Cell attributes, or `None` when this is not a cell.
    #[must_use]
    pub const fn cell_attrs(&self) -> Option<&CellAttrs> {
        self.attrs.as_ref()
    }

    /// Text content of a text node; empty for other kinds.
    #[must_use]
    pub fn text_content(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text)
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Node> {
        self.content.get(index).map(Arc::as_ref)
    }

    #[must_use]
    pub fn first_child(&self) -> Option<&Node> {
        self.child(0)
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.content.iter().map(Arc::as_ref)
    }

    /// Size of this node's content.
    #[must_use]
    pub fn content_size(&self) -> usize {
        if self.is_text() {
            return self.text.chars().count();
        }
        self.children().map(Node::node_size).sum()
    }

    /// Size this node occupies in its parent.
    #[must_use]
    pub fn node_size(&self) -> usize {
        if self.is_text() {
            self.content_size()
        } else {
            self.content_size() + 2
        }
    }

    /// Find the child containing content offset `pos`.
    ///
    /// Returns `(index, child_start)`. A position exactly at the end of the
    /// content yields `(child_count, pos)`.
    #[must_use]
    pub fn find_index(&self, pos: usize) -> Option<(usize, usize)> {
        let mut offset = 0;
        for (index, child) in self.children().enumerate() {
            let end = offset + child.node_size();
            if end > pos {
                return Some((index, offset));
            }
            offset = end;
        }
        (pos == offset).then_some((self.content.len(), offset))
    }

    /// The node starting at content offset `pos`, descending as needed.
    #[must_use]
    pub fn node_at(&self, mut pos: usize) -> Option<&Node> {
        let mut node = self;
        loop {
            let (index, offset) = node.find_index(pos)?;
            let child = node.child(index)?;
            if offset == pos || child.is_text() {
                return Some(child);
            }
            pos -= offset + 1;
            node = child;
        }
    }

    /// Copy of this node with different cell attributes. Non-cell nodes
    /// carry no attributes and are returned unchanged.
    #[must_use]
    pub fn with_attrs(&self, attrs: CellAttrs) -> Node {
        Node {
            attrs: self.kind.is_cell().then_some(attrs),
            ..self.clone()
        }
    }

    /// Copy of this node with children `start..end` replaced by `nodes`.
    pub(crate) fn splice(&self, start: usize, end: usize, nodes: &[Node]) -> Node {
        let mut content = self.content[..start].to_vec();
        content.extend(nodes.iter().cloned().map(Arc::new));
        content.extend_from_slice(&self.content[end..]);
        Node {
            content,
            ..self.clone()
        }
    }

    /// Copy of this node with child `index` replaced.
    pub(crate) fn with_child(&self, index: usize, child: Node) -> Node {
        let mut copy = self.clone();
        copy.content[index] = Arc::new(child);
        copy
    }
}
