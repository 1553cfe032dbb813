#![forbid(unsafe_code)]

//! Per-table view state: the rendered column group and table style.
//!
//! The host renders each table with a `<colgroup>` holding one `<col>` per
//! grid column. [`TableView`] keeps that group in sync with the committed
//! widths, and with the live preview while a drag is in progress.

use tabula_doc::{Node, NodeKind};

use crate::projector::{PreviewOverride, TableWidth, project_columns};
use crate::table_map::TableMap;

/// Ordered `<col>` width declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColGroup {
    cols: Vec<Option<u32>>,
}

impl ColGroup {
    #[must_use]
    pub fn cols(&self) -> &[Option<u32>] {
        &self.cols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}

/// Inline style of the table element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStyle {
    pub width: Option<u32>,
    pub min_width: Option<u32>,
}

/// What a reconcile pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColGroupPatch {
    /// Columns whose declared width changed.
    pub updated: Vec<usize>,
    /// Number of `col`s appended.
    pub appended: usize,
    /// Number of trailing `col`s removed.
    pub removed: usize,
}

impl ColGroupPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.appended == 0 && self.removed == 0
    }
}

/// Reconcile `colgroup` and `style` with `table`'s widths in place.
pub fn update_columns(
    table: &Node,
    colgroup: &mut ColGroup,
    style: &mut TableStyle,
    min_width: u32,
    preview: Option<PreviewOverride>,
) -> ColGroupPatch {
    let mut patch = ColGroupPatch::default();
    let projection = match TableMap::compute(table) {
        Ok(map) => project_columns(&map, preview, min_width),
        Err(err) => {
            tracing::debug!(%err, "table has no columns to project");
            patch.removed = colgroup.cols.len();
            colgroup.cols.clear();
            *style = TableStyle::default();
            return patch;
        }
    };

    for (index, width) in projection.columns.iter().enumerate() {
        match colgroup.cols.get_mut(index) {
            Some(col) if *col != *width => {
                *col = *width;
                patch.updated.push(index);
            }
            Some(_) => {}
            None => {
                colgroup.cols.push(*width);
                patch.appended += 1;
            }
        }
    }
    let wanted = projection.columns.len();
    if colgroup.cols.len() > wanted {
        patch.removed = colgroup.cols.len() - wanted;
        colgroup.cols.truncate(wanted);
    }

    *style = match projection.table_width {
        TableWidth::Fixed(total) => TableStyle {
            width: Some(total),
            min_width: None,
        },
        TableWidth::Min(total) => TableStyle {
            width: None,
            min_width: Some(total),
        },
    };
    patch
}

/// Kind of a DOM mutation observed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Attributes,
    ChildList,
    CharacterData,
}

/// Element a DOM mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    Table,
    ColGroup,
    Col(usize),
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    pub target: MutationTarget,
}

/// Rendered state of one table node.
#[derive(Debug, Clone)]
pub struct TableView {
    node: Node,
    cell_min_width: u32,
    colgroup: ColGroup,
    style: TableStyle,
}

impl TableView {
    #[must_use]
    pub fn new(node: Node, cell_min_width: u32) -> Self {
        let mut colgroup = ColGroup::default();
        let mut style = TableStyle::default();
        update_columns(&node, &mut colgroup, &mut style, cell_min_width, None);
        Self {
            node,
            cell_min_width,
            colgroup,
            style,
        }
    }

    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn colgroup(&self) -> &ColGroup {
        &self.colgroup
    }

    #[must_use]
    pub fn style(&self) -> TableStyle {
        self.style
    }

    /// Take a new node value. Returns `false` when the node is not a table,
    /// so the host rebuilds the view.
    pub fn update(&mut self, node: &Node) -> bool {
        if node.kind() != NodeKind::Table {
            return false;
        }
        self.node = node.clone();
        update_columns(
            &self.node,
            &mut self.colgroup,
            &mut self.style,
            self.cell_min_width,
            None,
        );
        true
    }

    /// Show `width` for `column` without touching the document.
    pub fn preview(&mut self, column: usize, width: u32) -> ColGroupPatch {
        update_columns(
            &self.node,
            &mut self.colgroup,
            &mut self.style,
            self.cell_min_width,
            Some(PreviewOverride { column, width }),
        )
    }

    /// Whether the host should ignore a DOM mutation because the view made
    /// it itself.
    #[must_use]
    pub fn ignore_mutation(&self, record: &MutationRecord) -> bool {
        record.kind == MutationKind::Attributes
            && matches!(
                record.target,
                MutationTarget::Table | MutationTarget::ColGroup | MutationTarget::Col(_)
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_doc::{CellAttrs, ColWidths};

    fn sized(width: u32) -> CellAttrs {
        CellAttrs::default().with_colwidth(Some(ColWidths::from_slice(&[Some(width)])))
    }

    #[test]
    fn new_view_declares_every_column() {
        let view = TableView::new(
            Node::table_from_attrs([vec![sized(50), CellAttrs::default(), sized(70)]]),
            25,
        );
        assert_eq!(view.colgroup().cols(), &[Some(50), None, Some(70)]);
        assert_eq!(
            view.style(),
            TableStyle {
                width: None,
                min_width: Some(145)
            }
        );
    }

    #[test]
    fn reconcile_appends_updates_and_removes() {
        let mut colgroup = ColGroup::default();
        let mut style = TableStyle::default();
        let wide = Node::table_from_attrs([vec![sized(50), sized(60), sized(70)]]);
        let patch = update_columns(&wide, &mut colgroup, &mut style, 25, None);
        assert_eq!(patch.appended, 3);
        assert_eq!(style.width, Some(180));

        let narrow = Node::table_from_attrs([vec![sized(50), sized(65)]]);
        let patch = update_columns(&narrow, &mut colgroup, &mut style, 25, None);
        assert_eq!(
            patch,
            ColGroupPatch {
                updated: vec![1],
                appended: 0,
                removed: 1
            }
        );
        assert_eq!(colgroup.len(), 2);

        let again = update_columns(&narrow, &mut colgroup, &mut style, 25, None);
        assert!(again.is_empty());
    }

    #[test]
    fn preview_then_update_restores_committed_widths() {
        let table = Node::table_from_attrs([vec![sized(50), sized(60)]]);
        let mut view = TableView::new(table.clone(), 25);
        let patch = view.preview(0, 90);
        assert_eq!(patch.updated, vec![0]);
        assert_eq!(view.colgroup().cols(), &[Some(90), Some(60)]);
        assert!(view.update(&table));
        assert_eq!(view.colgroup().cols(), &[Some(50), Some(60)]);
    }

    #[test]
    fn update_refuses_other_node_kinds() {
        let mut view = TableView::new(Node::table_from_attrs([vec![CellAttrs::default()]]), 25);
        assert!(!view.update(&Node::paragraph("x")));
        assert_eq!(view.node().kind(), NodeKind::Table);
    }

    #[test]
    fn ignores_only_own_attribute_mutations() {
        let view = TableView::new(Node::table_from_attrs([vec![CellAttrs::default()]]), 25);
        let own = MutationRecord {
            kind: MutationKind::Attributes,
            target: MutationTarget::Col(0),
        };
        let content = MutationRecord {
            kind: MutationKind::Attributes,
            target: MutationTarget::Content,
        };
        let children = MutationRecord {
            kind: MutationKind::ChildList,
            target: MutationTarget::Table,
        };
        assert!(view.ignore_mutation(&own));
        assert!(!view.ignore_mutation(&content));
        assert!(!view.ignore_mutation(&children));
    }
}
