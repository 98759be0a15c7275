//! Benchmarks for email validation and tree flattening
//!
//! Run: cargo bench --bench extensions_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use useful_extensions::utils::{flatten, is_email, EmailValidator};

fn bench_is_email(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_email");

    for (name, address) in [
        ("plain", "user@example.com"),
        ("idn", "user@bücher.de"),
        ("invalid", "not-an-email"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), address, |b, address| {
            b.iter(|| is_email(black_box(Some(address))));
        });
    }

    let validator = EmailValidator::new();
    let long_local = format!("{}@example.com", "a.".repeat(500) + "a");
    group.bench_function("long_local_part", |b| {
        b.iter(|| validator.is_valid(black_box(Some(long_local.as_str()))));
    });

    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    // Complete binary tree over node ids, children of n are 2n+1 and 2n+2
    for depth in [10_u32, 14, 18] {
        let limit = (1_u64 << depth) - 1;
        group.bench_with_input(BenchmarkId::new("binary_tree", depth), &limit, |b, &limit| {
            b.iter(|| {
                flatten([0_u64], |n: &u64| {
                    [2 * n + 1, 2 * n + 2].into_iter().filter(move |c| *c < limit)
                })
                .count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_is_email, bench_flatten);
criterion_main!(benches);
