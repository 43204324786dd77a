use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{
    ALL_DISTRIBUTIONS, Distribution, apply_runtime_for_size, generate_records, generate_u64,
    seeded_rng,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sortheap::{SortAlgorithm, algorithm_name, all_algorithms, blocks, sort};

const BENCH_SIZES: [usize; 3] = [4096, 16384, 65536];
const RECORD_WIDTHS: [usize; 2] = [8, 24];

fn bench_sort(c: &mut Criterion) {
    for &dist in &ALL_DISTRIBUTIONS {
        let mut group = c.benchmark_group(format!("sort/u64/{}", dist.label()));

        for &algo in all_algorithms() {
            if !is_benchmark_target(algo) {
                continue;
            }
            for &size in &BENCH_SIZES {
                apply_runtime_for_size(&mut group, size);
                let base = generate_u64(&mut seeded_rng(salt(dist, size, algo as u64)), dist, size);

                group.bench_function(BenchmarkId::new(algorithm_name(algo), size), |bencher| {
                    bencher.iter_custom(|iters| {
                        let mut total = Duration::ZERO;
                        for _ in 0..iters {
                            let mut data = base.clone();
                            let start = Instant::now();
                            sort(algo, &mut data).unwrap();
                            total += start.elapsed();
                            black_box(&data);
                        }
                        total
                    });
                });
            }
        }

        for &size in &BENCH_SIZES {
            apply_runtime_for_size(&mut group, size);
            let base = generate_u64(&mut seeded_rng(salt(dist, size, 0xBA5E_0001)), dist, size);
            group.bench_function(BenchmarkId::new("std_unstable", size), |bencher| {
                bencher.iter_custom(|iters| {
                    let mut total = Duration::ZERO;
                    for _ in 0..iters {
                        let mut data = base.clone();
                        let start = Instant::now();
                        data.sort_unstable();
                        total += start.elapsed();
                        black_box(&data);
                    }
                    total
                });
            });
        }

        group.finish();
    }
}

fn bench_records(c: &mut Criterion) {
    let dist = Distribution::RandomUniform;
    for &width in &RECORD_WIDTHS {
        let mut group = c.benchmark_group(format!("sort/records_{width}/{}", dist.label()));

        for &algo in all_algorithms() {
            if !is_benchmark_target(algo) {
                continue;
            }
            for &size in &BENCH_SIZES {
                apply_runtime_for_size(&mut group, size);
                let mut rng = seeded_rng(salt(dist, size, width as u64));
                let base = generate_records(&mut rng, dist, size, width);

                group.bench_function(BenchmarkId::new(algorithm_name(algo), size), |bencher| {
                    bencher.iter_custom(|iters| {
                        let mut total = Duration::ZERO;
                        for _ in 0..iters {
                            let mut data = base.clone();
                            let start = Instant::now();
                            blocks::sort_by(algo, &mut data, width, |a, b| a[..8].cmp(&b[..8]))
                                .unwrap();
                            total += start.elapsed();
                            black_box(&data);
                        }
                        total
                    });
                });
            }
        }

        group.finish();
    }
}

#[inline]
fn is_benchmark_target(algo: SortAlgorithm) -> bool {
    !matches!(
        algo,
        SortAlgorithm::InsertionSort | SortAlgorithm::BubbleSort | SortAlgorithm::SelectionSort
    )
}

#[inline]
fn salt(dist: Distribution, size: usize, extra: u64) -> u64 {
    ((dist as u64) << 48) ^ (size as u64) ^ extra
}

criterion_group!(benches, bench_sort, bench_records);
criterion_main!(benches);
