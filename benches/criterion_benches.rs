#[macro_use]
extern crate criterion;

use criterion::{Benchmark, Criterion};

use puzzle_search::config::{BurrowConfig, Config, MoveStrategyKind};
use puzzle_search::{LoadPuzzle, Solve};

fn bench_risk_sample(c: &mut Criterion) {
    let map = "puzzles/risk/sample.txt".load_risk_map().unwrap();
    bench(c, "risk", "sample", map, Config::default(), 100);
}

fn bench_risk_sample_tiled(c: &mut Criterion) {
    let map = "puzzles/risk/sample.txt".load_risk_map().unwrap().tiled(5).unwrap();
    bench(c, "risk", "sample-tiled", map, Config::default(), 50);
}

fn bench_burrow_all_stops(c: &mut Criterion) {
    let burrow = "puzzles/burrow/sample.txt".load_burrow().unwrap();
    bench(c, "burrow", "sample-all-stops", burrow, Config::default(), 20);
}

fn bench_burrow_home_first(c: &mut Criterion) {
    let burrow = "puzzles/burrow/sample.txt".load_burrow().unwrap();
    let config = Config {
        burrow: BurrowConfig {
            strategy: MoveStrategyKind::HomeFirst,
            ..BurrowConfig::default()
        },
        ..Config::default()
    };
    bench(c, "burrow", "sample-home-first", burrow, config, 20);
}

fn bench<P>(c: &mut Criterion, group: &str, name: &str, puzzle: P, config: Config, samples: usize)
where
    P: Solve + 'static,
{
    c.bench(
        group,
        Benchmark::new(name, move |b| {
            b.iter(|| {
                criterion::black_box(puzzle.solve(
                    criterion::black_box(&config),
                    criterion::black_box(false),
                ))
            })
        })
        .sample_size(samples),
    );
}

criterion_group!(
    benches,
    bench_risk_sample,
    bench_risk_sample_tiled,
    bench_burrow_all_stops,
    bench_burrow_home_first,
);
criterion_main!(benches);
