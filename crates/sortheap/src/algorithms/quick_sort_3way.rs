use std::cmp::Ordering;

use crate::TUNED_PARAMS;
use crate::access::{Compare, Layout, Typed};

use super::{common, insertion_sort};

/// Strategy splitting a range into `[< pivot | == pivot | > pivot]`.
pub trait ThreeWayPartition {
    /// Returns `(lt, gt)`: `data[..lt]` is below the pivot, `data[lt..gt]`
    /// equals it and `data[gt..]` is above it.
    fn partition<L: Layout, F: Compare<L::Item>>(
        layout: L,
        data: &mut [L::Unit],
        pivot: &L::Slot,
        cmp: &mut F,
    ) -> (usize, usize);
}

/// Dutch national flag partition: one pass, one swap per misplaced element.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dijkstra;

/// Bentley-McIlroy partition: equal keys are parked at both ends during the
/// scan and swapped into the middle afterwards. Cheaper than [`Dijkstra`]
/// when equal keys are rare.
#[derive(Clone, Copy, Debug, Default)]
pub struct BentleyMcIlroy;

#[cfg(feature = "dijkstra-partition")]
pub type DefaultPartition = Dijkstra;
#[cfg(not(feature = "dijkstra-partition"))]
pub type DefaultPartition = BentleyMcIlroy;

impl ThreeWayPartition for Dijkstra {
    fn partition<L: Layout, F: Compare<L::Item>>(
        layout: L,
        data: &mut [L::Unit],
        pivot: &L::Slot,
        cmp: &mut F,
    ) -> (usize, usize) {
        let pivot = layout.slot_item(pivot);
        let mut lt = 0;
        let mut i = 0;
        let mut gt = layout.count(data);

        while i < gt {
            match cmp(layout.at(data, i), pivot) {
                Ordering::Less => {
                    layout.swap(data, i, lt);
                    i += 1;
                    lt += 1;
                }
                Ordering::Greater => {
                    gt -= 1;
                    layout.swap(data, i, gt);
                }
                Ordering::Equal => i += 1,
            }
        }

        (lt, gt)
    }
}

impl ThreeWayPartition for BentleyMcIlroy {
    fn partition<L: Layout, F: Compare<L::Item>>(
        layout: L,
        data: &mut [L::Unit],
        pivot: &L::Slot,
        cmp: &mut F,
    ) -> (usize, usize) {
        let pivot = layout.slot_item(pivot);
        let len = layout.count(data);

        // [0, a) == | [a, b) < | [b, c) unscanned | [c, d) > | [d, len) ==
        let (mut a, mut b, mut c, mut d) = (0, 0, len, len);
        loop {
            while b < c {
                match cmp(layout.at(data, b), pivot) {
                    Ordering::Less => b += 1,
                    Ordering::Equal => {
                        layout.swap(data, a, b);
                        a += 1;
                        b += 1;
                    }
                    Ordering::Greater => break,
                }
            }
            while b < c {
                match cmp(layout.at(data, c - 1), pivot) {
                    Ordering::Greater => c -= 1,
                    Ordering::Equal => {
                        d -= 1;
                        layout.swap(data, c - 1, d);
                        c -= 1;
                    }
                    Ordering::Less => break,
                }
            }
            if b >= c {
                break;
            }
            layout.swap(data, b, c - 1);
            b += 1;
            c -= 1;
        }

        let moved = a.min(b - a);
        layout.swap_runs(data, 0, b - moved, moved);
        let moved = (d - b).min(len - d);
        layout.swap_runs(data, b, len - moved, moved);

        (b - a, len - (d - b))
    }
}

/// Unstable in-place 3-way quick sort using [`DefaultPartition`].
pub fn quick_sort_3way<T: Copy, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], cmp: F) {
    quick_sort_3way_with::<DefaultPartition, T, F>(data, cmp);
}

/// Unstable in-place 3-way quick sort with an explicit partition strategy.
pub fn quick_sort_3way_with<P, T, F>(data: &mut [T], mut cmp: F)
where
    P: ThreeWayPartition,
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    sort::<P, _, _>(Typed::new(), data, &mut cmp);
}

pub(crate) fn sort<P: ThreeWayPartition, L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    cmp: &mut F,
) {
    sort_with_threshold::<P, L, F>(layout, data, TUNED_PARAMS.quick_sort_3way_threshold, cmp);
}

/// Returns the number of partition passes performed.
fn sort_with_threshold<P: ThreeWayPartition, L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    threshold: usize,
    cmp: &mut F,
) -> usize {
    debug_assert!(threshold >= 2);
    let len = layout.count(data);
    if len < 2 {
        return 0;
    }

    let mut partitions = 0;
    if len > threshold {
        let mut pivot = layout.fetch(data, 0);
        partitions = quick_sort_3way_recursive::<P, L, F>(layout, data, threshold, &mut pivot, cmp);
    }
    insertion_sort::sort(layout, data, cmp);
    partitions
}

fn quick_sort_3way_recursive<P: ThreeWayPartition, L: Layout, F: Compare<L::Item>>(
    layout: L,
    mut data: &mut [L::Unit],
    threshold: usize,
    pivot: &mut L::Slot,
    cmp: &mut F,
) -> usize {
    let mut partitions = 0;
    while layout.count(data) > threshold {
        common::median3_pivot(layout, data, pivot, cmp);
        let (lt, gt) = P::partition(layout, data, pivot, cmp);
        partitions += 1;

        if lt == 0 && gt == layout.count(data) {
            break;
        }

        let (left, rest) = common::split_at(layout, data, lt);
        let (_, right) = common::split_at(layout, rest, gt - lt);
        if layout.count(left) < layout.count(right) {
            partitions +=
                quick_sort_3way_recursive::<P, L, F>(layout, left, threshold, pivot, cmp);
            data = right;
        } else {
            partitions +=
                quick_sort_3way_recursive::<P, L, F>(layout, right, threshold, pivot, cmp);
            data = left;
        }
    }
    partitions
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::access::Blocks;

    fn check_partition<P: ThreeWayPartition>(input: &[u32], pivot: u32) {
        let mut data = input.to_vec();
        let (lt, gt) = P::partition(Typed::<u32>::new(), &mut data, &[pivot], &mut u32::cmp);

        assert!(lt <= gt && gt <= data.len());
        assert!(data[..lt].iter().all(|&x| x < pivot), "input={input:?}");
        assert!(data[lt..gt].iter().all(|&x| x == pivot), "input={input:?}");
        assert!(data[gt..].iter().all(|&x| x > pivot), "input={input:?}");

        let mut before = input.to_vec();
        let mut after = data;
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn partitions_split_three_ways() {
        let mut rng = StdRng::seed_from_u64(0x3A7_2026);
        for len in [1_usize, 2, 3, 10, 64, 257] {
            for _ in 0..20 {
                let data: Vec<u32> = (0..len).map(|_| rng.random_range(0..6)).collect();
                let pivot = data[rng.random_range(0..len)];
                check_partition::<Dijkstra>(&data, pivot);
                check_partition::<BentleyMcIlroy>(&data, pivot);
            }
        }
    }

    #[test]
    fn all_equal_needs_one_partition() {
        let layout = Typed::<u32>::new();
        for len in [3_usize, 5, 100] {
            let mut data = vec![7_u32; len];
            let passes = sort_with_threshold::<Dijkstra, _, _>(layout, &mut data, 2, &mut u32::cmp);
            assert_eq!(passes, 1);

            let passes =
                sort_with_threshold::<BentleyMcIlroy, _, _>(layout, &mut data, 2, &mut u32::cmp);
            assert_eq!(passes, 1);
            assert!(data.iter().all(|&x| x == 7));
        }
    }

    #[test]
    fn strategies_agree_with_std() {
        let mut rng = StdRng::seed_from_u64(0x5EED_3333);
        for len in [4_usize, 33, 500, 3000] {
            let data: Vec<u64> = (0..len).map(|_| rng.random_range(0..40)).collect();
            let mut expected = data.clone();
            expected.sort();

            let mut dijkstra = data.clone();
            quick_sort_3way_with::<Dijkstra, _, _>(&mut dijkstra, u64::cmp);
            assert_eq!(dijkstra, expected);

            let mut bentley = data.clone();
            quick_sort_3way_with::<BentleyMcIlroy, _, _>(&mut bentley, u64::cmp);
            assert_eq!(bentley, expected);

            let mut small = data;
            let layout = Typed::<u64>::new();
            sort_with_threshold::<BentleyMcIlroy, _, _>(layout, &mut small, 2, &mut u64::cmp);
            assert_eq!(small, expected);
        }
    }

    #[test]
    fn sorts_wide_blocks() {
        let mut rng = StdRng::seed_from_u64(0x3B10_2026);
        let size = 12;
        let mut data: Vec<u8> = (0..size * 150).map(|_| rng.random_range(0..3)).collect();
        let mut expected: Vec<Vec<u8>> = data.chunks(size).map(<[u8]>::to_vec).collect();
        expected.sort();

        let mut by_bytes = |a: &[u8], b: &[u8]| a.cmp(b);
        sort::<DefaultPartition, _, _>(Blocks::new(size), &mut data, &mut by_bytes);
        assert_eq!(data, expected.concat());
    }
}
