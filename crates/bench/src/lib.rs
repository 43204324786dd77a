use std::time::Duration;

use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, SamplingMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 80;
const SMALL_RUNTIME_MEASURE_MS: u64 = 150;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 200;
const LARGE_RUNTIME_MEASURE_MS: u64 = 500;
const LARGE_INPUT: usize = 65536;
const RNG_SEED: u64 = 0x5EED_2026;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Distribution {
    RandomUniform,
    NearlySorted1pctSwaps,
    FewDistinct16,
    Reversed,
}

pub const ALL_DISTRIBUTIONS: [Distribution; 4] = [
    Distribution::RandomUniform,
    Distribution::NearlySorted1pctSwaps,
    Distribution::FewDistinct16,
    Distribution::Reversed,
];

impl Distribution {
    pub fn label(self) -> &'static str {
        match self {
            Self::RandomUniform => "random_uniform",
            Self::NearlySorted1pctSwaps => "nearly_sorted_1pct_swaps",
            Self::FewDistinct16 => "few_distinct_16",
            Self::Reversed => "reversed",
        }
    }
}

/// Picks sampling presets from the input size so large inputs keep runs short.
pub fn apply_runtime_for_size<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    if size < LARGE_INPUT {
        group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
        group.sampling_mode(SamplingMode::Auto);
        group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
        group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
    } else {
        group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
        group.sampling_mode(SamplingMode::Flat);
        group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
        group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
    }
}

pub fn seeded_rng(salt: u64) -> StdRng {
    StdRng::seed_from_u64(mix_seed(RNG_SEED ^ salt))
}

pub fn generate_u64<R: Rng + ?Sized>(rng: &mut R, dist: Distribution, size: usize) -> Vec<u64> {
    let mut data = Vec::with_capacity(size);
    match dist {
        Distribution::RandomUniform => {
            for _ in 0..size {
                data.push(rng.random::<u64>());
            }
        }
        Distribution::NearlySorted1pctSwaps => {
            data.extend(0..size as u64);
            let swaps = (size / 100).max(1);
            for _ in 0..swaps {
                let a = rng.random_range(0..size);
                let b = rng.random_range(0..size);
                data.swap(a, b);
            }
        }
        Distribution::FewDistinct16 => {
            for _ in 0..size {
                data.push(rng.random_range(0..16_u64) * 0x9E37_79B9);
            }
        }
        Distribution::Reversed => {
            data.extend((0..size as u64).rev());
        }
    }
    data
}

/// Same values as [`generate_u64`], laid out as `width`-byte records.
///
/// The key occupies the first 8 bytes in big-endian order so that a plain
/// lexicographic byte comparison orders records by key.
pub fn generate_records<R: Rng + ?Sized>(
    rng: &mut R,
    dist: Distribution,
    size: usize,
    width: usize,
) -> Vec<u8> {
    assert!(width >= 8);
    let keys = generate_u64(rng, dist, size);
    let mut bytes = vec![0_u8; size * width];
    for (record, key) in bytes.chunks_exact_mut(width).zip(keys) {
        record[..8].copy_from_slice(&key.to_be_bytes());
    }
    bytes
}

#[inline]
pub fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
