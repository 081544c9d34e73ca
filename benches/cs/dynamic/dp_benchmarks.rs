use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dynopt::dynamic::{bounded_budget_max_value, sequence_alignment_cost, Campaign};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn positions(rng: &mut ChaCha8Rng, len: usize) -> Vec<f64> {
    let mut values: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..1000.0)).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

fn bench_alignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequence_alignment_cost");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for &size in &[64, 256, 1024] {
        let requests = positions(&mut rng, size);
        let agents = positions(&mut rng, size * 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| sequence_alignment_cost(black_box(&requests), black_box(&agents)))
        });
    }

    group.finish();
}

fn bench_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_budget_max_value");
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    for &size in &[32, 128, 512] {
        let campaigns: Vec<Campaign<f64>> = (0..size)
            .map(|_| Campaign::new(rng.gen_range(1..50), rng.gen_range(0.0..500.0)))
            .collect();
        let budget = size * 10;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| bounded_budget_max_value(black_box(budget), black_box(&campaigns)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_alignment, bench_budget);
criterion_main!(benches);
