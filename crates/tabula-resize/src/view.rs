#![forbid(unsafe_code)]

//! Host editor contract consumed by the resize plugin.

use tabula_core::geometry::{Point, Rect};
use tabula_doc::{DocError, EditorState, Transaction};

use crate::table_view::TableView;

/// The live editor the plugin is attached to.
///
/// Implementations own the document state, the rendered layout, and the
/// window-level listener registry. All methods are called synchronously from
/// the plugin's event handlers.
pub trait EditorView {
    /// Current editor state.
    fn state(&self) -> &EditorState;

    /// Apply a transaction. Hosts forward every transaction they accept to
    /// [`ColumnResizing::apply_transaction`](crate::ColumnResizing::apply_transaction)
    /// and refresh their table views from the new document.
    fn dispatch(&mut self, tr: Transaction) -> Result<(), DocError>;

    /// Document position under a viewport coordinate.
    fn pos_at_coords(&self, point: Point) -> Option<usize>;

    /// Bounding box of the cell rendered for the node directly after `pos`.
    fn cell_rect(&self, pos: usize) -> Option<Rect>;

    /// Rendered width of the cell directly after `pos`.
    fn cell_dom_width(&self, pos: usize) -> Option<u32> {
        self.cell_rect(pos).map(|rect| rect.width)
    }

    /// View of the table node directly after `table_pos`.
    fn table_view_mut(&mut self, table_pos: usize) -> Option<&mut TableView>;

    /// Start routing window-level pointer move/up events to the plugin.
    fn install_window_listeners(&mut self);

    /// Stop routing window-level pointer events to the plugin.
    fn remove_window_listeners(&mut self);
}
