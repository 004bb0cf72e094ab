//! `checkers_core::engine` の性能計測（合法手生成、選択と着手）。

use core::hint::black_box;
use criterion::BatchSize;
use criterion::Criterion;
use checkers_core::engine;

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// 初期局面（黒番）での代表的な着手（移動元、移動先）を返す。
fn initial_black_move() -> Option<(engine::Square, engine::Square)> {
    Some((
        engine::Square::from_row_col(2, 1)?,
        engine::Square::from_row_col(3, 2)?,
    ))
}

/// 初期局面での `Board::legal_moves` を全駒について計測する。
fn bench_legal_moves(criterion: &mut Criterion) {
    let board = engine::Board::initial();

    criterion.bench_function("engine/legal_moves_initial", |bench| {
        bench.iter(|| {
            for (square, _) in board.occupied() {
                black_box(board.legal_moves(square, false));
            }
        });
    });
}

/// `Game::select` による選択と着手を計測する。
fn bench_select_and_move(criterion: &mut Criterion) {
    let Some((from, to)) = initial_black_move() else {
        return;
    };

    criterion.bench_function("engine/select_and_move_initial", |bench| {
        bench.iter_batched(
            engine::Game::new,
            |mut game| {
                black_box(game.select(from.index()));
                black_box(game.select(to.index()))
            },
            BatchSize::SmallInput,
        );
    });
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();

    bench_legal_moves(&mut criterion);
    bench_select_and_move(&mut criterion);

    criterion.final_summary();
}
