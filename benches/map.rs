use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shardhash::map::HashMap;

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut m: HashMap<u64, u64> = HashMap::new();
                for i in 0..size as u64 {
                    m.insert(black_box(i), i);
                }
                m
            });
        });
    }
    group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    for size in [100usize, 1_000, 10_000] {
        let m: HashMap<u64, u64> = (0..size as u64).map(|i| (i, i)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                for i in 0..size as u64 {
                    black_box(m.get(&i));
                }
            });
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || (0..size as u64).map(|i| (i, i)).collect::<HashMap<u64, u64>>(),
                |mut m| {
                    for i in 0..size as u64 {
                        black_box(m.remove(&i));
                    }
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_get_hit, bench_remove);
criterion_main!(benches);
