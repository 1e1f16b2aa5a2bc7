//! Criterion benchmarks for tilepaint critical paths
//!
//! Benchmarks the operations that run on every user action:
//! - Export: byte-packing the canvas into assembly text
//! - Stamp: committing a tile and computing its preview
//! - Paint: replaying a pen drag through the state machine
//! - Document: autosave serialization and lenient load

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tilepaint::document::Document;
use tilepaint::export::{encode, encode_with, AsmOptions};
use tilepaint::grid::{Cell, Grid, COLS, ROWS};
use tilepaint::paint::{parse_script, Brush, PaintSession, PointerEvent};
use tilepaint::stamp::{preview_set, stamp_in_place};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Canvas with a checkerboard pattern
fn make_checkerboard() -> Grid {
    let mut grid = Grid::canvas();
    for r in 0..ROWS as i32 {
        for c in 0..COLS as i32 {
            if (r + c) % 2 == 0 {
                grid.set(Cell::new(r, c), true);
            }
        }
    }
    grid
}

/// A diagonal drag across the whole canvas
fn make_drag() -> Vec<PointerEvent> {
    let mut events = vec![PointerEvent::Down(Cell::new(0, 0))];
    for i in 1..ROWS as i32 {
        events.push(PointerEvent::Enter(Cell::new(i, i % COLS as i32)));
        events.push(PointerEvent::Enter(Cell::new(i, (i + 1) % COLS as i32)));
    }
    events.push(PointerEvent::Up);
    events
}

// =============================================================================
// Export Benchmarks
// =============================================================================

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let grid = make_checkerboard();
    group.throughput(Throughput::Elements((COLS * ROWS) as u64));

    group.bench_function("encode_canvas", |b| b.iter(|| encode(black_box("level"), &grid)));

    let wrapped = AsmOptions { bytes_per_line: 16, ..AsmOptions::default() };
    group.bench_function("encode_canvas_wrapped", |b| {
        b.iter(|| encode_with(black_box("level"), &grid, &wrapped))
    });

    group.finish();
}

// =============================================================================
// Stamp Benchmarks
// =============================================================================

fn bench_stamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("stamp");

    for size in [4usize, 8, 16].iter() {
        let tile = Grid::filled(*size, *size);
        group.bench_with_input(BenchmarkId::new("stamp_in_place", size), &tile, |b, tile| {
            let mut grid = Grid::canvas();
            b.iter(|| stamp_in_place(&mut grid, black_box(tile), Cell::new(8, 8)))
        });
        group.bench_with_input(BenchmarkId::new("preview_set", size), &tile, |b, tile| {
            b.iter(|| preview_set(black_box(tile), Cell::new(40, 32)))
        });
    }

    group.finish();
}

// =============================================================================
// Paint Benchmarks
// =============================================================================

fn bench_paint(c: &mut Criterion) {
    let mut group = c.benchmark_group("paint");
    let events = make_drag();
    group.throughput(Throughput::Elements(events.len() as u64));

    group.bench_function("pen_drag", |b| {
        b.iter(|| {
            let mut grid = Grid::canvas();
            let mut session = PaintSession::new();
            for event in &events {
                session.handle(*event, Brush::Pen, &mut grid);
            }
            grid
        })
    });

    let tile = Grid::filled(8, 8);
    group.bench_function("stamp_drag", |b| {
        b.iter(|| {
            let mut grid = Grid::canvas();
            let mut session = PaintSession::new();
            let brush = Brush::Stamp { tile: Some(&tile), tile_width: 8, tile_height: 8 };
            for event in &events {
                session.handle(*event, brush, &mut grid);
            }
            grid
        })
    });

    let script: String = (0..200).map(|i| format!("enter {},{};", i % 48, i % 40)).collect();
    group.bench_function("parse_script_200", |b| b.iter(|| parse_script(black_box(&script))));

    group.finish();
}

// =============================================================================
// Document Benchmarks
// =============================================================================

fn bench_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    let mut doc = Document::default();
    doc.cells = make_checkerboard();
    for _ in 0..16 {
        doc.tiles.create(8, 8);
    }
    let json = doc.to_json().unwrap_or_default();
    group.throughput(Throughput::Bytes(json.len() as u64));

    group.bench_function("to_json", |b| b.iter(|| black_box(&doc).to_json()));
    group.bench_function("from_json", |b| b.iter(|| Document::from_json(black_box(&json))));

    group.finish();
}

criterion_group!(benches, bench_export, bench_stamp, bench_paint, bench_document);

criterion_main!(benches);
