use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use sort_test_tools::patterns;

fn benchmark_fn(
    c: &mut Criterion,
    test_len: usize,
    pattern_name: &str,
    pattern_provider: impl Fn(usize) -> Vec<i32>,
) {
    let batch_size = if test_len > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(&format!("timsort-i32-{pattern_name}-{test_len}"), |b| {
        b.iter_batched_ref(
            || pattern_provider(test_len),
            |test_data| timsort::sort(test_data.as_mut_slice()),
            batch_size,
        )
    });

    c.bench_function(&format!("rust_std-i32-{pattern_name}-{test_len}"), |b| {
        b.iter_batched_ref(
            || pattern_provider(test_len),
            |test_data| test_data.sort(),
            batch_size,
        )
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    for test_len in [20, 1_000, 100_000] {
        benchmark_fn(c, test_len, "random", patterns::random);
        benchmark_fn(c, test_len, "ascending", patterns::ascending);
        benchmark_fn(c, test_len, "descending", patterns::descending);
        benchmark_fn(c, test_len, "random_d20", |len| {
            patterns::random_uniform(len, 0..20)
        });
        benchmark_fn(c, test_len, "saw_mixed", |len| {
            patterns::saw_mixed(len, ((len as f64).log2().round()) as usize)
        });
        benchmark_fn(c, test_len, "random_s95", |len| {
            patterns::random_sorted(len, 95.0)
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
