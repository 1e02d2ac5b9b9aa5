//! Benchmarks for rendering and replay.

use chrono::DateTime;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ctledit::model::{Block, ControlStream};
use ctledit::replay::replay;

fn bench_render_fixture(c: &mut Criterion) {
    let stream = ControlStream::parse(include_str!("../tests/fixtures/run001.ctl"));

    c.bench_function("render_fixture", |b| b.iter(|| black_box(&stream).render()));
}

fn bench_replay_session(c: &mut Criterion) {
    let original = ControlStream::parse(include_str!("../tests/fixtures/run001.ctl"));

    // A plausible session: ten alternating retunes of $THETA and $OMEGA.
    let mut edited = original.clone();
    for i in 0..10 {
        let (name, text) = if i % 2 == 0 {
            ("$THETA", format!("$THETA\n(0, {i}.5)\n(0, 30)\n(0, 1.5)\n"))
        } else {
            ("$OMEGA", format!("$OMEGA\n0.0{i}\n0.1\n0.1\n"))
        };
        let at = DateTime::from_timestamp(1_700_000_000 + i, 0).unwrap();
        edited.update_at(name, Block::from_text(&text), at).unwrap();
    }
    let log = edited.change_log();

    c.bench_function("replay_session", |b| {
        b.iter(|| replay(black_box(&original), black_box(log)).unwrap())
    });
}

criterion_group!(benches, bench_render_fixture, bench_replay_session);
criterion_main!(benches);
