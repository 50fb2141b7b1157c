use criterion::{black_box, criterion_group, criterion_main, Criterion};

use knightfall_engine::fen::Fen;
use knightfall_engine::*;

const MIDDLEGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

pub fn criterion_search_benchmark(c: &mut Criterion) {
    // Setup
    let mut state = GameState::parse_fen(MIDDLEGAME).unwrap();
    let moves = state.legal_moves();

    for algorithm in [Algorithm::Negamax, Algorithm::Minimax] {
        for depth in 1..=3 {
            let mut engine = EngineBuilder::new()
                .depth(depth)
                .seed(0)
                .algorithm(algorithm)
                .build();
            c.bench_function(&format!("middlegame: {algorithm} depth {depth}"), |b| {
                b.iter(|| engine.search(black_box(&mut state), black_box(&moves)).unwrap())
            });
        }
    }

    let mut engine = EngineBuilder::new()
        .algorithm(Algorithm::Greedy)
        .seed(0)
        .build();
    c.bench_function("middlegame: greedy", |b| {
        b.iter(|| engine.search(black_box(&mut state), black_box(&moves)).unwrap())
    });
}

pub fn criterion_legal_moves_benchmark(c: &mut Criterion) {
    let mut state = GameState::parse_fen(MIDDLEGAME).unwrap();
    c.bench_function("middlegame: legal_moves", |b| {
        b.iter(|| black_box(&mut state).legal_moves())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().without_plots().sample_size(20);
    targets = criterion_search_benchmark, criterion_legal_moves_benchmark
}
criterion_main!(benches);
