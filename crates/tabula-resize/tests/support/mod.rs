#![allow(dead_code)]

//! In-memory host editor for integration tests.
//!
//! Lays out a document holding a single table at position 0 as a grid of
//! 100px-wide, 20px-tall slots, and counts window listener installs.

use std::collections::BTreeMap;

use tabula_core::event::PointerEvent;
use tabula_core::geometry::{Point, Rect};
use tabula_doc::{CellAttrs, DocError, EditorState, Node, Transaction};
use tabula_resize::{
    CellRef, ColumnResizing, EditorView, ResizeConfig, ResizeTransition, TableMap, TableView,
};

pub const COLUMN_PX: u32 = 100;
pub const ROW_PX: u32 = 20;
/// The table sits at position 0, so its content starts at 1.
pub const TABLE_POS: usize = 0;
pub const TABLE_START: usize = 1;

pub struct MockView {
    state: EditorState,
    table_views: BTreeMap<usize, TableView>,
    accepted: Vec<Transaction>,
    pub installs: usize,
    pub removes: usize,
    pub dispatched: usize,
    min_width: u32,
}

impl MockView {
    pub fn new(table: Node, min_width: u32) -> Self {
        let mut view = Self {
            state: EditorState::new(Node::doc([table])),
            table_views: BTreeMap::new(),
            accepted: Vec::new(),
            installs: 0,
            removes: 0,
            dispatched: 0,
            min_width,
        };
        view.refresh_views();
        view
    }

    pub fn doc(&self) -> &Node {
        self.state.doc()
    }

    pub fn table(&self) -> &Node {
        self.state.doc().child(0).expect("document holds a table")
    }

    pub fn table_view(&self) -> &TableView {
        self.table_views.get(&TABLE_POS).expect("table view")
    }

    fn refresh_views(&mut self) {
        let table = self.table().clone();
        match self.table_views.get_mut(&TABLE_POS) {
            Some(view) => {
                view.update(&table);
            }
            None => {
                self.table_views
                    .insert(TABLE_POS, TableView::new(table, self.min_width));
            }
        }
    }

    /// Apply an edit that did not come from the plugin.
    pub fn edit(&mut self, tr: Transaction) -> Result<(), DocError> {
        self.state = self.state.apply(tr.clone())?;
        self.refresh_views();
        self.accepted.push(tr);
        Ok(())
    }

    pub fn take_accepted(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.accepted)
    }

    /// Committed widths of every cell, row by row.
    pub fn cell_attrs(&self) -> Vec<Vec<CellAttrs>> {
        self.table()
            .children()
            .map(|row| row.children().map(|cell| cell.attrs().clone()).collect())
            .collect()
    }

    fn slot_rect(map: &TableMap, offset: usize) -> Option<Rect> {
        let rect = map.find_cell(offset).ok()?;
        Some(Rect::new(
            i32::try_from(rect.left as u32 * COLUMN_PX).ok()?,
            i32::try_from(rect.top as u32 * ROW_PX).ok()?,
            rect.colspan() as u32 * COLUMN_PX,
            rect.rowspan() as u32 * ROW_PX,
        ))
    }
}

impl EditorView for MockView {
    fn state(&self) -> &EditorState {
        &self.state
    }

    fn dispatch(&mut self, tr: Transaction) -> Result<(), DocError> {
        self.dispatched += 1;
        self.edit(tr)
    }

    fn pos_at_coords(&self, point: Point) -> Option<usize> {
        let col = usize::try_from(point.x).ok()? / COLUMN_PX as usize;
        let row = usize::try_from(point.y).ok()? / ROW_PX as usize;
        let map = TableMap::compute(self.table()).ok()?;
        let offset = map.slot(row, col)?;
        // Inside the cell's paragraph.
        Some(TABLE_START + offset + 2)
    }

    fn cell_rect(&self, pos: usize) -> Option<Rect> {
        let cell = CellRef::at(self.state.doc(), pos).ok()?;
        let map = TableMap::compute(cell.table.node).ok()?;
        Self::slot_rect(&map, cell.offset())
    }

    fn table_view_mut(&mut self, table_pos: usize) -> Option<&mut TableView> {
        self.table_views.get_mut(&table_pos)
    }

    fn install_window_listeners(&mut self) {
        self.installs += 1;
    }

    fn remove_window_listeners(&mut self) {
        self.removes += 1;
    }
}

/// A plugin attached to a mock view, forwarding accepted transactions.
pub struct Host {
    pub view: MockView,
    pub plugin: ColumnResizing,
}

impl Host {
    pub fn new(table: Node, config: ResizeConfig) -> Self {
        Self {
            view: MockView::new(table, config.cell_min_width),
            plugin: ColumnResizing::new(config).expect("valid config"),
        }
    }

    pub fn grid(rows: usize, cols: usize, config: ResizeConfig) -> Self {
        Self::new(
            Node::table_from_attrs((0..rows).map(|_| vec![CellAttrs::default(); cols])),
            config,
        )
    }

    fn pump(&mut self) {
        for tr in self.view.take_accepted() {
            self.plugin.apply_transaction(&mut self.view, &tr);
        }
    }

    pub fn hover(&mut self, x: i32, y: i32) -> ResizeTransition {
        let transition = self
            .plugin
            .handle_pointer_move(&mut self.view, &PointerEvent::moved(x, y));
        self.pump();
        transition
    }

    pub fn press(&mut self, x: i32, y: i32) -> bool {
        let handled = self
            .plugin
            .handle_pointer_down(&mut self.view, &PointerEvent::down(x, y));
        self.pump();
        handled
    }

    pub fn drag(&mut self, x: i32, y: i32) -> ResizeTransition {
        let transition = self
            .plugin
            .handle_window_move(&mut self.view, &PointerEvent::dragged(x, y))
            .expect("drag move");
        self.pump();
        transition
    }

    pub fn release(&mut self, x: i32, y: i32) -> ResizeTransition {
        let transition = self
            .plugin
            .handle_window_up(&mut self.view, &PointerEvent::up(x, y))
            .expect("release");
        self.pump();
        transition
    }

    pub fn edit(&mut self, build: impl FnOnce(&mut Transaction)) {
        let mut tr = Transaction::new(self.view.state());
        build(&mut tr);
        self.view.edit(tr).expect("edit applies");
        self.pump();
    }
}
