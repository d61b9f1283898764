use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use monitor_core::{sample, MonitorConfig, MonitorFrame, MonitorSession, MoodState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");

    for mood in MoodState::variants() {
        group.bench_with_input(BenchmarkId::new("mood", mood), mood, |b, &mood| {
            let mut rng = ChaCha8Rng::seed_from_u64(0xBAB1);
            b.iter(|| sample(mood, &mut rng))
        });
    }

    group.finish();
}

fn bench_simulate_step(c: &mut Criterion) {
    let config = MonitorConfig {
        seed: Some(7),
        ..MonitorConfig::default()
    };
    let mut session =
        MonitorSession::new(&config, MonitorFrame::default()).expect("valid bench config");
    c.bench_function("simulate_step", |b| b.iter(|| session.on_simulate_clicked()));
}

criterion_group!(sample_benches, bench_sample, bench_simulate_step);
criterion_main!(sample_benches);
