#![forbid(unsafe_code)]

//! Column-resizing editor plugin.
//!
//! [`ColumnResizing`] glues the pieces together: it hit-tests pointer
//! events, feeds the resulting inputs to the [`ResizeMachine`], previews
//! drags through the table's [`TableView`](crate::TableView), and commits the
//! final width as one document transaction.
//!
//! # Listener scope
//!
//! Window-level move/up listeners are held exactly while the machine is
//! `Dragging`. Every transition passes through one choke point that installs
//! them on entering `Dragging` and removes them on leaving it, whichever
//! event caused the exit (release, implicit release, blur, stale handle,
//! teardown).

use tabula_core::event::PointerEvent;
use tabula_doc::{Assoc, DocError, Node, Transaction};

use crate::cells::{CellRef, points_at_cell};
use crate::commit::commit_column_width;
use crate::config::{ConfigError, ResizeConfig};
use crate::hit_test::HitTester;
use crate::machine::{ResizeEffect, ResizeInput, ResizeMachine, ResizeState, ResizeTransition};
use crate::projector::{HandleDecoration, handle_decorations};
use crate::table_map::TableMap;
use crate::view::EditorView;

/// Editor class set while a handle is armed or dragged.
pub const RESIZE_CURSOR_CLASS: &str = "resize-cursor";

/// A handle resolved against a document: the cell it sits before, the map
/// of its table, and the grid column whose right boundary it controls.
struct HandleTarget<'a> {
    cell: CellRef<'a>,
    map: TableMap,
    column: usize,
}

fn resolve_handle(doc: &Node, handle: usize) -> Option<HandleTarget<'_>> {
    let cell = CellRef::at(doc, handle).ok()?;
    let map = TableMap::compute(cell.table.node).ok()?;
    let left = map.col_count(cell.offset())?;
    // Clipped cells end at the table edge.
    let column = (left + cell.node.attrs().colspan.max(1) as usize - 1)
        .min(map.width().saturating_sub(1));
    Some(HandleTarget { cell, map, column })
}

/// Interactive column resizing for one editor.
#[derive(Debug, Clone)]
pub struct ColumnResizing {
    config: ResizeConfig,
    hit_tester: HitTester,
    machine: ResizeMachine,
}

impl ColumnResizing {
    /// Create a plugin instance.
    pub fn new(config: ResizeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            hit_tester: HitTester::from_config(&config),
            machine: ResizeMachine::new(config.cell_min_width),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ResizeConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> ResizeState {
        self.machine.state()
    }

    /// Pointer moved over the editor.
    pub fn handle_pointer_move<V: EditorView + ?Sized>(
        &mut self,
        view: &mut V,
        event: &PointerEvent,
    ) -> ResizeTransition {
        let handle = if self.machine.is_dragging() {
            None
        } else {
            self.hit_tester.locate_handle(&*view, event.position)
        };
        self.advance(view, ResizeInput::Hover { handle })
    }

    /// Pointer left the editor.
    pub fn handle_pointer_leave<V: EditorView + ?Sized>(&mut self, view: &mut V) -> ResizeTransition {
        self.advance(view, ResizeInput::Leave)
    }

    /// Button pressed in the editor. Returns `true` when a drag started and
    /// the host should stop default handling.
    pub fn handle_pointer_down<V: EditorView + ?Sized>(
        &mut self,
        view: &mut V,
        event: &PointerEvent,
    ) -> bool {
        let ResizeState::Armed { handle } = self.machine.state() else {
            return false;
        };
        let Some(start_width) = self.current_col_width(&*view, handle) else {
            tracing::debug!(handle, "no width known for armed column, press refused");
            return false;
        };
        let transition = self.advance(
            view,
            ResizeInput::Press {
                x: event.position.x,
                start_width,
            },
        );
        if let ResizeEffect::DragStarted { handle, drag } = transition.effect {
            self.display_column_width(view, handle, drag.start_width);
            true
        } else {
            false
        }
    }

    /// Window-level pointer move during a drag.
    ///
    /// A move with no buttons held finishes the drag, because the release
    /// happened outside the window.
    pub fn handle_window_move<V: EditorView + ?Sized>(
        &mut self,
        view: &mut V,
        event: &PointerEvent,
    ) -> Result<ResizeTransition, DocError> {
        if !event.any_button_held() {
            return self.finish(view, event.position.x);
        }
        let transition = self.advance(view, ResizeInput::DragMove { x: event.position.x });
        if let ResizeEffect::Previewed { handle, width } = transition.effect {
            self.display_column_width(view, handle, width);
        }
        Ok(transition)
    }

    /// Window-level button release during a drag.
    pub fn handle_window_up<V: EditorView + ?Sized>(
        &mut self,
        view: &mut V,
        event: &PointerEvent,
    ) -> Result<ResizeTransition, DocError> {
        self.finish(view, event.position.x)
    }

    /// Observe a transaction the host accepted.
    ///
    /// A live handle is mapped through the edit; if it no longer sits before
    /// a cell the interaction is dropped.
    pub fn apply_transaction<V: EditorView + ?Sized>(
        &mut self,
        view: &mut V,
        tr: &Transaction,
    ) -> Option<ResizeTransition> {
        if !tr.doc_changed() {
            return None;
        }
        let handle = self.machine.handle()?;
        let mapped = tr.mapping().map(handle, Assoc::Before).filter(|&pos| {
            tr.doc()
                .resolve(pos)
                .is_ok_and(|resolved| points_at_cell(&resolved))
        });
        Some(self.advance(view, ResizeInput::DocChanged { handle: mapped }))
    }

    /// The editor lost focus.
    pub fn blur<V: EditorView + ?Sized>(&mut self, view: &mut V) -> ResizeTransition {
        let transition = self.advance(view, ResizeInput::Blur);
        if let ResizeEffect::Canceled { handle, .. } = transition.effect
            && transition.from.is_dragging()
        {
            self.restore_preview(view, handle);
        }
        transition
    }

    /// Tear the plugin down, releasing anything a drag still holds.
    pub fn destroy<V: EditorView + ?Sized>(&mut self, view: &mut V) -> Option<ResizeTransition> {
        let transition = self.machine.force_cancel()?;
        self.log_transition(&transition);
        self.sync_listeners(view, transition.from, transition.to);
        if let ResizeEffect::Canceled { handle, .. } = transition.effect
            && transition.from.is_dragging()
        {
            self.restore_preview(view, handle);
        }
        Some(transition)
    }

    /// Handle widgets for the armed or dragged boundary.
    #[must_use]
    pub fn decorations(&self, doc: &Node) -> Vec<HandleDecoration> {
        let Some(handle) = self.machine.handle() else {
            return Vec::new();
        };
        match resolve_handle(doc, handle) {
            Some(target) => handle_decorations(target.cell.table, &target.map, target.column),
            None => Vec::new(),
        }
    }

    /// Editor element classes contributed by the plugin.
    #[must_use]
    pub fn editor_attributes(&self) -> Option<&'static str> {
        self.machine.handle().map(|_| RESIZE_CURSOR_CLASS)
    }

    fn finish<V: EditorView + ?Sized>(
        &mut self,
        view: &mut V,
        x: i32,
    ) -> Result<ResizeTransition, DocError> {
        let transition = self.advance(view, ResizeInput::Release { x });
        if let ResizeEffect::Committed { handle, width } = transition.effect {
            self.commit(view, handle, width)?;
        }
        Ok(transition)
    }

    fn commit<V: EditorView + ?Sized>(
        &self,
        view: &mut V,
        handle: usize,
        width: u32,
    ) -> Result<(), DocError> {
        let built = {
            let state = view.state();
            let Some(target) = resolve_handle(state.doc(), handle) else {
                tracing::warn!(handle, "committed handle no longer points at a cell");
                return Ok(());
            };
            commit_column_width(
                state,
                target.cell.table,
                &target.map,
                target.column,
                width,
                self.config.cell_min_width,
            )
        };
        match built {
            Ok(Some(tr)) => view.dispatch(tr),
            Ok(None) => {
                self.restore_preview(view, handle);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(handle, %err, "column width commit failed");
                self.restore_preview(view, handle);
                Err(err)
            }
        }
    }

    fn advance<V: EditorView + ?Sized>(&mut self, view: &mut V, input: ResizeInput) -> ResizeTransition {
        let transition = self.machine.apply(input);
        self.log_transition(&transition);
        self.sync_listeners(view, transition.from, transition.to);
        transition
    }

    fn log_transition(&self, transition: &ResizeTransition) {
        if transition.is_noop() {
            tracing::trace!(
                transition_id = transition.transition_id,
                effect = ?transition.effect,
                "resize input ignored"
            );
        } else {
            tracing::debug!(
                transition_id = transition.transition_id,
                from = ?transition.from,
                to = ?transition.to,
                effect = ?transition.effect,
                "resize transition"
            );
        }
    }

    fn sync_listeners<V: EditorView + ?Sized>(&self, view: &mut V, from: ResizeState, to: ResizeState) {
        match (from.is_dragging(), to.is_dragging()) {
            (false, true) => view.install_window_listeners(),
            (true, false) => view.remove_window_listeners(),
            _ => {}
        }
    }

    /// Width of the handle's column: its last committed unit width, else
    /// the rendered width shared among the unsized units.
    fn current_col_width<V: EditorView + ?Sized>(&self, view: &V, handle: usize) -> Option<u32> {
        let cell = CellRef::at(view.state().doc(), handle).ok()?;
        let attrs = cell.node.attrs();
        if let Some(width) = attrs
            .colwidth
            .as_ref()
            .and_then(|widths| widths.last().copied().flatten())
        {
            return Some(width);
        }
        let mut dom_width = view.cell_dom_width(handle)?;
        let mut parts = attrs.colspan.max(1);
        for width in attrs.colwidth.iter().flatten().flatten() {
            dom_width = dom_width.saturating_sub(*width);
            parts = parts.saturating_sub(1);
        }
        Some(dom_width / parts.max(1))
    }

    fn display_column_width<V: EditorView + ?Sized>(&self, view: &mut V, handle: usize, width: u32) {
        let Some((table_pos, column)) = resolve_handle(view.state().doc(), handle)
            .map(|target| (target.cell.table.pos, target.column))
        else {
            return;
        };
        if let Some(table_view) = view.table_view_mut(table_pos) {
            table_view.preview(column, width);
        }
    }

    fn restore_preview<V: EditorView + ?Sized>(&self, view: &mut V, handle: usize) {
        let Some((table_pos, table)) = CellRef::at(view.state().doc(), handle)
            .ok()
            .map(|cell| (cell.table.pos, cell.table.node.clone()))
        else {
            return;
        };
        if let Some(table_view) = view.table_view_mut(table_pos) {
            table_view.update(&table);
        }
    }
}
