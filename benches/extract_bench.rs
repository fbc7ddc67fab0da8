use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use openingscope::batch::extract_all;
use openingscope::features::{extract, extract_turns, Horizons};
use openingscope::notation::tokenize;
use openingscope::record::{GameRecord, Outcome};
use openingscope::resolve::replay;

const RUY_LOPEZ: &str = concat!(
    "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6 4. Ba4 Nf6 5. O-O Be7 6. Re1 b5 7. Bb3 d6 ",
    "8. c3 O-O 9. h3 Nb8 10. d4 Nbd7 11. Nbd2 Bb7 12. Bc2 Re8 1-0",
);
const QUEENS_GAMBIT: &str = concat!(
    "1. d4 d5 2. c4 e6 3. Nc3 Nf6 4. Bg5 Be7 5. e3 O-O 6. Nf3 h6 7. Bh4 b6 ",
    "8. cxd5 Nxd5 9. Bxe7 Qxe7 10. Nxd5 exd5 1/2",
);

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_12_turns", |b| b.iter(|| tokenize(black_box(RUY_LOPEZ))));
}

fn bench_replay(c: &mut Criterion) {
    let turns = tokenize(RUY_LOPEZ).unwrap();
    c.bench_function("replay_7_turns", |b| b.iter(|| replay(black_box(&turns), 7)));
    c.bench_function("replay_full_game", |b| {
        b.iter(|| replay(black_box(&turns), turns.len()))
    });
}

fn bench_extract_turns(c: &mut Criterion) {
    let turns = tokenize(QUEENS_GAMBIT).unwrap();
    let horizons = Horizons::default();
    c.bench_function("extract_turns_default_horizons", |b| {
        b.iter(|| extract_turns(black_box(&turns), Outcome::Draw, &horizons))
    });
}

fn bench_extract_record(c: &mut Criterion) {
    let record = GameRecord::new(RUY_LOPEZ, Outcome::WhiteWin);
    let horizons = Horizons::default();
    c.bench_function("extract_record", |b| {
        b.iter(|| extract(black_box(&record), &horizons))
    });
}

fn bench_extract_batch(c: &mut Criterion) {
    let records: Vec<GameRecord> = [
        GameRecord::new(RUY_LOPEZ, Outcome::WhiteWin),
        GameRecord::new(QUEENS_GAMBIT, Outcome::Draw),
    ]
    .into_iter()
    .cycle()
    .take(1000)
    .collect();
    let horizons = Horizons::default();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();

    let mut group = c.benchmark_group("batch_1000_games");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("sequential", |b| {
        b.iter(|| extract_all(black_box(&records), &horizons, None, true))
    });
    group.bench_function("parallel_4_threads", |b| {
        b.iter(|| extract_all(black_box(&records), &horizons, Some(&pool), true))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_replay,
    bench_extract_turns,
    bench_extract_record,
    bench_extract_batch,
);
criterion_main!(benches);
