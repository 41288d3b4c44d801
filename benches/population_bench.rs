use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use popsim::core::config::ScenarioConfig;
use popsim::simulation::Population;

fn bench_yearly_tick(c: &mut Criterion) {
    let env = ScenarioConfig::default().build_environment();
    let mut group = c.benchmark_group("yearly_tick");

    for &size in &[1_000usize, 8_192] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut pop = Population::new(12345);
                    pop.set_environment(env.clone());
                    pop.initialize_random(size, 60);
                    pop
                },
                |mut pop| {
                    pop.step(black_box(10));
                    pop
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_yearly_tick);
criterion_main!(benches);
