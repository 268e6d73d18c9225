use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use game_2048::engine::{slide_line, Board, GridEngine, Move};
use game_2048::policy::PolicyKind;
use game_2048::selfplay::play_game;
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut boards = vec![Board::EMPTY];
    let mut b = Board::EMPTY;
    for _ in 0..2 {
        b = b.with_spawned_tile(&mut rng).unwrap_or(b);
    }
    boards.push(b);
    // Derive a variety of densities deterministically
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..40 {
        let nb = b.shift(seq[i % seq.len()]).board;
        if nb != b {
            b = nb.with_spawned_tile(&mut rng).unwrap_or(nb);
        }
        boards.push(b);
    }
    boards
}

fn bench_shift(c: &mut Criterion) {
    for dir in Move::ALL {
        c.bench_function(&format!("shift/{dir}"), |bch| {
            let boards = corpus();
            bch.iter(|| {
                let mut acc = 0u64;
                for &bd in &boards {
                    acc = acc.wrapping_add(bd.shift(dir).score);
                }
                black_box(acc)
            })
        });
    }
    c.bench_function("slide_line", |bch| {
        let lines = [[2, 2, 2, 2], [0, 4, 0, 4], [2, 4, 8, 16], [0, 0, 0, 2]];
        bch.iter(|| {
            let mut acc = 0u64;
            for mut l in lines {
                acc += slide_line(&mut l);
            }
            black_box(acc)
        })
    });
}

fn bench_engine(c: &mut Criterion) {
    c.bench_function("engine/step_cycle", |bch| {
        bch.iter_batched(
            || GridEngine::seeded(9),
            |mut g| {
                for i in 0..64 {
                    g.step(Move::ALL[i % 4]);
                }
                black_box(g.score())
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("query/is_game_over", |bch| {
        let boards = corpus();
        bch.iter(|| boards.iter().filter(|b| b.is_game_over()).count())
    });
    c.bench_function("selfplay/greedy_game", |bch| {
        bch.iter(|| black_box(play_game(1, PolicyKind::Greedy, None)))
    });
}

criterion_group!(engine_ops, bench_shift, bench_engine);
criterion_main!(engine_ops);
