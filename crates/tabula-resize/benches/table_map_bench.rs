#![forbid(unsafe_code)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tabula_doc::{CellAttrs, EditorState, Node};
use tabula_resize::{
    CellRef, PreviewOverride, ResizeInput, ResizeMachine, TableMap, commit_column_width,
    project_columns,
};

fn grid(rows: usize, cols: usize) -> Node {
    Node::table_from_attrs((0..rows).map(|_| vec![CellAttrs::default(); cols]))
}

/// Every other row opens a 2×2 span in its first column.
fn spanned(rows: usize, cols: usize) -> Node {
    Node::table_from_attrs((0..rows).map(|row| {
        if row % 2 == 0 {
            let mut cells = vec![CellAttrs::spanning(2, 2)];
            cells.extend(vec![CellAttrs::default(); cols - 2]);
            cells
        } else {
            vec![CellAttrs::default(); cols - 2]
        }
    }))
}

fn bench_table_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("table/map/compute");
    for &(rows, cols) in &[(8, 4), (64, 8), (256, 16)] {
        let plain = grid(rows, cols);
        group.bench_with_input(
            BenchmarkId::new("plain", format!("{rows}x{cols}")),
            &plain,
            |b, table| b.iter(|| black_box(TableMap::compute(table).map(|m| m.width()))),
        );
        let spans = spanned(rows, cols);
        group.bench_with_input(
            BenchmarkId::new("spanned", format!("{rows}x{cols}")),
            &spans,
            |b, table| b.iter(|| black_box(TableMap::compute(table).map(|m| m.height()))),
        );
    }
    group.finish();
}

fn bench_commit_and_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("table/resize");
    let state = EditorState::new(Node::doc([grid(64, 8)]));

    group.bench_function("commit_64x8_column_3", |b| {
        b.iter(|| {
            let table = CellRef::at(state.doc(), 2).expect("first cell").table;
            let map = TableMap::compute(table.node).expect("maps");
            let tr = commit_column_width(&state, table, &map, 3, 180, 25).expect("commit");
            black_box(tr.map(|tr| tr.steps().len()));
        });
    });

    group.bench_function("project_64x8_with_preview", |b| {
        let map = TableMap::compute(state.doc().child(0).expect("table")).expect("maps");
        b.iter(|| {
            let projection = project_columns(
                &map,
                Some(PreviewOverride {
                    column: 2,
                    width: black_box(140),
                }),
                25,
            );
            black_box(projection.table_width);
        });
    });

    group.bench_function("drag_move_120", |b| {
        b.iter(|| {
            let mut machine = ResizeMachine::new(25);
            machine.apply(ResizeInput::Hover { handle: Some(2) });
            machine.apply(ResizeInput::Press {
                x: 100,
                start_width: 100,
            });
            for step in 0..120 {
                black_box(machine.apply(ResizeInput::DragMove { x: 100 + step }).effect);
            }
            black_box(machine.apply(ResizeInput::Release { x: 220 }).effect);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_table_map, bench_commit_and_project);
criterion_main!(benches);
