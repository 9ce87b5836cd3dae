//! Benchmarks for the railroad puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use railtrack::persistence::decode;
use railtrack::{render, Board, Solver};

const PUZZLE: &str = "34-14134454-32642351-82NW";
const TWO_SEED_PUZZLE: &str = "54-14134544-54234341-48EW.53NE";

/// Benchmark a complete decode-build-solve run.
fn bench_solve(c: &mut Criterion) {
    c.bench_function("solve_puzzle", |b| {
        b.iter(|| {
            let board = Board::new(decode(black_box(PUZZLE)).unwrap()).unwrap();
            let mut solver = Solver::new(board);
            solver.solve().unwrap()
        })
    });
}

/// Benchmark solving the corpus puzzle with two seeded pieces.
fn bench_solve_two_seeds(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_seeds");
    group.bench_function("solve", |b| {
        b.iter(|| {
            let board = Board::new(decode(black_box(TWO_SEED_PUZZLE)).unwrap()).unwrap();
            let mut solver = Solver::new(board);
            solver.solve().unwrap()
        })
    });
    group.finish();
}

/// Benchmark decoding a puzzle code.
fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode", |b| b.iter(|| decode(black_box(PUZZLE)).unwrap()));
}

/// Benchmark the possibility query on a seeded board.
fn bench_possible_pieces(c: &mut Criterion) {
    let board = Board::new(decode(PUZZLE).unwrap()).unwrap();

    c.bench_function("possible_pieces", |b| {
        b.iter(|| board.possible_pieces(black_box(1), black_box(2)))
    });
}

/// Benchmark drawing a board.
fn bench_draw(c: &mut Criterion) {
    let board = Board::new(decode(PUZZLE).unwrap()).unwrap();

    c.bench_function("draw_board", |b| b.iter(|| render::draw(black_box(&board))));
}

criterion_group!(
    benches,
    bench_solve,
    bench_solve_two_seeds,
    bench_decode,
    bench_possible_pieces,
    bench_draw,
);
criterion_main!(benches);
