use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use winmix::batch::{predict_all_algorithms, predict_batch};
use winmix::catalog;
use winmix::model::Match;
use winmix::registry::Algorithm;

fn sample_matches(n: usize) -> Vec<Match> {
    let teams = catalog::premier_league_teams();
    (0..n)
        .map(|idx| {
            let home = teams[idx % teams.len()].clone();
            let away = teams[(idx + 1 + idx / teams.len()) % teams.len()].clone();
            Match::new(format!("m{idx}"), home, away, "2025-01-01")
        })
        .collect()
}

fn bench_single_algorithms(c: &mut Criterion) {
    let fixture = catalog::fixture("arsenal", "chelsea").expect("catalog fixture");
    for algorithm in Algorithm::ALL {
        c.bench_function(&format!("predict_{}", algorithm.id()), |b| {
            b.iter(|| {
                let result = algorithm.predict(black_box(&fixture));
                black_box(result.home_win_probability);
            })
        });
    }
}

fn bench_batch(c: &mut Criterion) {
    let matches = sample_matches(2_000);
    c.bench_function("batch_ensemble_2000", |b| {
        b.iter(|| {
            let rows = predict_batch(black_box(&matches), Algorithm::Ensemble, 4);
            black_box(rows.len());
        })
    });
    c.bench_function("batch_all_algorithms_2000", |b| {
        b.iter(|| {
            let rows = predict_all_algorithms(black_box(&matches), 4);
            black_box(rows.len());
        })
    });
}

criterion_group!(benches, bench_single_algorithms, bench_batch);
criterion_main!(benches);
