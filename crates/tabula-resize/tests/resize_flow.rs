#![forbid(unsafe_code)]

//! End-to-end resize interactions against the in-memory host.

mod support;

use pretty_assertions::assert_eq;
use support::Host;
use tabula_core::event::PointerEvent;
use tabula_doc::{CellAttrs, ColWidths, Node};
use tabula_resize::{
    CancelReason, RESIZE_CURSOR_CLASS, ResizeConfig, ResizeEffect, ResizeState, TableMap,
    TableWidth, project_columns,
};

fn widths(values: &[Option<u32>]) -> Option<ColWidths> {
    Some(ColWidths::from_slice(values))
}

#[test]
fn hover_near_right_edge_arms_handle() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    let t = host.hover(97, 10);
    assert_eq!(t.effect, ResizeEffect::Armed { handle: 2 });
    assert_eq!(host.plugin.editor_attributes(), Some(RESIZE_CURSOR_CLASS));

    let t = host.hover(93, 10);
    assert_eq!(t.effect, ResizeEffect::Disarmed { handle: 2 });
    assert_eq!(host.plugin.state(), ResizeState::Idle);
    assert_eq!(host.plugin.editor_attributes(), None);
}

#[test]
fn hover_near_left_edge_arms_previous_column() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    host.hover(102, 10);
    assert_eq!(host.plugin.state(), ResizeState::Armed { handle: 2 });

    // Left edge of the first column has no boundary to resize.
    host.hover(2, 10);
    assert_eq!(host.plugin.state(), ResizeState::Idle);
}

#[test]
fn last_column_respects_config() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    host.hover(297, 10);
    assert_eq!(host.plugin.state(), ResizeState::Armed { handle: 10 });

    let mut host = Host::grid(
        3,
        3,
        ResizeConfig::default().with_last_column_resizable(false),
    );
    let t = host.hover(297, 10);
    assert!(t.is_noop());
    assert_eq!(host.plugin.state(), ResizeState::Idle);
    // Interior boundaries still work.
    host.hover(197, 10);
    assert_eq!(host.plugin.state(), ResizeState::Armed { handle: 6 });
}

#[test]
fn drag_previews_then_commits_one_column() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    host.hover(97, 10);
    assert!(host.press(97, 10));
    assert!(host.plugin.state().is_dragging());
    assert_eq!(host.view.installs, 1);

    let t = host.drag(147, 10);
    assert_eq!(
        t.effect,
        ResizeEffect::Previewed {
            handle: 2,
            width: 150
        }
    );
    assert_eq!(host.view.table_view().colgroup().cols()[0], Some(150));
    // Nothing is written during the drag.
    assert_eq!(host.view.dispatched, 0);

    let t = host.drag(7, 10);
    assert_eq!(
        t.effect,
        ResizeEffect::Previewed {
            handle: 2,
            width: 25
        }
    );

    let t = host.release(137, 10);
    assert_eq!(
        t.effect,
        ResizeEffect::Committed {
            handle: 2,
            width: 140
        }
    );
    assert_eq!(host.view.dispatched, 1);
    assert_eq!(host.view.removes, 1);

    let expected = vec![
        vec![
            CellAttrs::default().with_colwidth(widths(&[Some(140)])),
            CellAttrs::default(),
            CellAttrs::default(),
        ];
        3
    ];
    assert_eq!(host.view.cell_attrs(), expected);
    assert_eq!(
        host.view.table_view().colgroup().cols(),
        &[Some(140), None, None]
    );
    assert_eq!(host.view.table_view().style().min_width, Some(190));
}

#[test]
fn drag_on_repaired_table_commits_the_visible_cell() {
    // Row 1 has no cells of its own; its first slot is filled from the
    // spanning cell on its right.
    let table = Node::table_from_attrs([
        vec![CellAttrs::default(), CellAttrs::spanning(2, 2)],
        vec![],
    ]);
    let mut host = Host::new(table, ResizeConfig::default());
    host.hover(97, 10);
    assert_eq!(host.plugin.state(), ResizeState::Armed { handle: 2 });
    assert!(host.press(97, 10));
    let t = host.release(117, 10);
    assert_eq!(
        t.effect,
        ResizeEffect::Committed {
            handle: 2,
            width: 120
        }
    );
    assert_eq!(host.view.dispatched, 1);
    assert_eq!(
        host.view.cell_attrs(),
        vec![
            vec![
                CellAttrs::default().with_colwidth(widths(&[Some(120)])),
                CellAttrs::spanning(2, 2),
            ],
            vec![],
        ]
    );
}

#[test]
fn repeating_a_commit_dispatches_nothing() {
    let mut host = Host::grid(2, 2, ResizeConfig::default());
    host.hover(97, 10);
    host.press(97, 10);
    host.release(137, 10);
    assert_eq!(host.view.dispatched, 1);

    // Start width now comes from the committed value, not the layout.
    host.hover(97, 10);
    host.press(97, 10);
    let t = host.release(97, 10);
    assert_eq!(
        t.effect,
        ResizeEffect::Committed {
            handle: 2,
            width: 140
        }
    );
    assert_eq!(host.view.dispatched, 1);
    assert_eq!(host.view.installs, 2);
    assert_eq!(host.view.removes, 2);
}

#[test]
fn move_without_buttons_finishes_drag() {
    let mut host = Host::grid(1, 2, ResizeConfig::default());
    host.hover(97, 10);
    host.press(97, 10);
    let t = host
        .plugin
        .handle_window_move(&mut host.view, &PointerEvent::moved(127, 10))
        .expect("implicit release");
    assert_eq!(
        t.effect,
        ResizeEffect::Committed {
            handle: 2,
            width: 130
        }
    );
    assert_eq!(host.view.removes, 1);
    assert_eq!(host.plugin.state(), ResizeState::Idle);
}

#[test]
fn spanning_cell_drag_sets_its_last_unit() {
    let table = Node::table_from_attrs([
        vec![CellAttrs::spanning(2, 1), CellAttrs::default()],
        vec![CellAttrs::default(); 3],
    ]);
    let mut host = Host::new(table, ResizeConfig::default());
    host.hover(197, 10);
    assert_eq!(host.plugin.state(), ResizeState::Armed { handle: 2 });
    // 200px over two unsized units.
    host.press(197, 10);
    host.release(227, 10);
    assert_eq!(host.view.dispatched, 1);

    let attrs = host.view.cell_attrs();
    assert_eq!(attrs[0][0].colwidth, widths(&[None, Some(130)]));
    assert_eq!(attrs[0][1].colwidth, None);
    assert_eq!(attrs[1][1].colwidth, widths(&[Some(130)]));
    assert_eq!(attrs[1][0].colwidth, None);
}

#[test]
fn press_without_handle_is_refused() {
    let mut host = Host::grid(2, 2, ResizeConfig::default());
    assert!(!host.press(50, 10));
    assert_eq!(host.view.installs, 0);
}

#[test]
fn deleting_the_armed_row_disarms() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    host.hover(97, 30);
    assert_eq!(host.plugin.state(), ResizeState::Armed { handle: 16 });
    host.edit(|tr| {
        tr.delete(15, 29).expect("row 1 deletes");
    });
    assert_eq!(host.plugin.state(), ResizeState::Idle);
}

#[test]
fn edits_above_the_handle_remap_it() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    host.hover(97, 30);
    host.edit(|tr| {
        tr.delete(1, 15).expect("row 0 deletes");
    });
    assert_eq!(host.plugin.state(), ResizeState::Armed { handle: 2 });
}

#[test]
fn stale_handle_cancels_drag_and_releases_listeners() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    host.hover(97, 30);
    host.press(97, 30);
    host.edit(|tr| {
        tr.delete(15, 29).expect("row 1 deletes");
    });
    assert_eq!(host.plugin.state(), ResizeState::Idle);
    assert_eq!((host.view.installs, host.view.removes), (1, 1));

    // A late window event is ignored.
    let t = host.release(150, 30);
    assert!(t.is_noop());
    assert_eq!(host.view.dispatched, 0);
}

#[test]
fn blur_cancels_drag_and_restores_preview() {
    let mut host = Host::grid(2, 2, ResizeConfig::default());
    host.hover(97, 10);
    host.press(97, 10);
    host.drag(160, 10);
    assert_eq!(host.view.table_view().colgroup().cols()[0], Some(163));

    let t = host.plugin.blur(&mut host.view);
    assert_eq!(
        t.effect,
        ResizeEffect::Canceled {
            handle: 2,
            reason: CancelReason::Blur
        }
    );
    assert_eq!(host.view.table_view().colgroup().cols(), &[None, None]);
    assert_eq!((host.view.installs, host.view.removes), (1, 1));
    assert_eq!(host.view.dispatched, 0);
}

#[test]
fn destroy_releases_listeners_once() {
    let mut host = Host::grid(2, 2, ResizeConfig::default());
    host.hover(97, 10);
    host.press(97, 10);
    let t = host.plugin.destroy(&mut host.view).expect("drag canceled");
    assert_eq!(
        t.effect,
        ResizeEffect::Canceled {
            handle: 2,
            reason: CancelReason::Programmatic
        }
    );
    assert!(host.plugin.destroy(&mut host.view).is_none());
    assert_eq!((host.view.installs, host.view.removes), (1, 1));
}

#[test]
fn decorations_follow_armed_boundary() {
    let mut host = Host::grid(3, 3, ResizeConfig::default());
    assert!(host.plugin.decorations(host.view.doc()).is_empty());
    host.hover(97, 10);
    let anchors: Vec<usize> = host
        .plugin
        .decorations(host.view.doc())
        .iter()
        .map(|d| d.anchor)
        .collect();
    assert_eq!(anchors, vec![5, 19, 33]);
}

#[test]
fn committed_widths_fix_the_table_width() {
    let table = Node::table_from_attrs([vec![
        CellAttrs::default().with_colwidth(widths(&[Some(80)])),
        CellAttrs::default(),
    ]]);
    let mut host = Host::new(table, ResizeConfig::default());
    assert_eq!(host.view.table_view().style().min_width, Some(105));
    host.hover(197, 10);
    host.press(197, 10);
    host.release(157, 10);
    assert_eq!(host.view.table_view().colgroup().cols(), &[Some(80), Some(60)]);
    let style = host.view.table_view().style();
    assert_eq!(style.width, Some(140));
    assert!(matches!(
        project_columns(
            &TableMap::compute(host.view.table()).expect("maps"),
            None,
            25
        )
        .table_width,
        TableWidth::Fixed(140)
    ));
}
