use criterion::{black_box, criterion_group, criterion_main, Criterion};
use neon_tetris::core::{try_rotate, GameSnapshot, GameState, Grid, Piece};
use neon_tetris::types::{GameAction, PieceKind, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0);
    let mut now = 0u64;

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            now += TICK_MS;
            if state.is_game_over() {
                state.start(now);
            }
            state.tick(black_box(now));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 16..20 {
                grid.fill_row(y, PieceKind::I);
            }
            let rows = grid.full_rows();
            grid.remove_rows(black_box(&rows));
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if !state.is_playing() || state.is_flashing() {
                state.start(0);
            }
            state.apply_action(GameAction::HardDrop, black_box(0));
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let grid = Grid::new();
    let piece = Piece::spawn(PieceKind::T);

    c.bench_function("try_rotate", |b| {
        b.iter(|| try_rotate(black_box(&piece), &grid))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start(0);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| state.snapshot_into(black_box(&mut snap), 0))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_try_rotate,
    bench_snapshot
);
criterion_main!(benches);
