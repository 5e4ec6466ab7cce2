use criterion::{Criterion, criterion_group, criterion_main};
use reversi::ai::search::{best_move, negamax};
use reversi::moves::{apply_move, enumerate_legal_moves, enumerate_legal_moves_seq};
use reversi::{Board, Color, Move};
use std::hint::black_box;

/// A few plies into the game so both sides have several options.
fn midgame() -> Board {
    let mut board = Board::new();
    let mut color = Color::Black;
    for _ in 0..8 {
        let legal = enumerate_legal_moves(&board, color);
        let Some(&mv) = legal.moves().first() else {
            break;
        };
        board = apply_move(mv, &board, color);
        color = color.opponent();
    }
    board
}

fn bench_legal_moves(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("legal_moves_parallel", |b| {
        b.iter(|| black_box(enumerate_legal_moves(&board, Color::Black)))
    });
    c.bench_function("legal_moves_sequential", |b| {
        b.iter(|| black_box(enumerate_legal_moves_seq(&board, Color::Black)))
    });
}

fn bench_search(c: &mut Criterion) {
    let board = midgame();
    c.bench_function("negamax_depth_3", |b| {
        b.iter(|| black_box(negamax(&board, Color::Black, 3)))
    });
    c.bench_function("best_move_opening_depth_4", |b| {
        b.iter(|| black_box(best_move(&Board::new(), Color::Black, 4)))
    });
    c.bench_function("apply_move", |b| {
        b.iter(|| black_box(apply_move(Move { row: 3, col: 4 }, &Board::new(), Color::Black)))
    });
}

criterion_group!(benches, bench_legal_moves, bench_search);
criterion_main!(benches);
