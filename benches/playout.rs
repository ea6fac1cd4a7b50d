use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use azul_rules::{DraftOutcome, RoundEngine};

/// Play a seeded game to the end, always taking the first legal option.
fn playout(seed: u64) -> u32 {
    let Ok(mut engine) = RoundEngine::with_seed(seed) else {
        return 0;
    };
    while !engine.is_over() {
        let Some(&(pool, color)) = engine.legal_drafts().first() else {
            break;
        };
        match engine.draft(pool, color) {
            Ok(DraftOutcome::Held { .. }) => {
                let Some(&line) = engine.legal_lines().first() else {
                    break;
                };
                if engine.place(line).is_err() {
                    break;
                }
            }
            Ok(DraftOutcome::Forced(_)) => {}
            Err(_) => break,
        }
    }
    engine.moves_this_game()
}

fn bench_playout(c: &mut Criterion) {
    let mut g = c.benchmark_group("round_engine");
    for &games in &[1u64, 16] {
        g.bench_with_input(BenchmarkId::new("full_game", games), &games, |b, &n| {
            b.iter(|| {
                for seed in 0..n {
                    black_box(playout(black_box(seed)));
                }
            })
        });
    }
    g.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let Ok(engine) = RoundEngine::with_seed(7) else {
        return;
    };
    c.bench_function("snapshot", |b| b.iter(|| black_box(engine.snapshot())));
}

criterion_group!(benches, bench_playout, bench_snapshot);
criterion_main!(benches);
