use std::cmp::Ordering;

use crate::TUNED_PARAMS;
use crate::access::{Compare, Layout, Typed};
use crate::error::{Result, try_reserve};

use super::{common, insertion_sort};

const SCRATCH: &str = "merge sort scratch";

/// Stable top-down merge sort.
///
/// Needs scratch for `len / 2` elements. If that allocation fails the input is
/// left untouched and [`Error::OutOfMemory`](crate::Error::OutOfMemory) is
/// returned.
pub fn merge_sort<T, F>(data: &mut [T], mut cmp: F) -> Result<()>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    sort(Typed::new(), data, &mut cmp)
}

pub(crate) fn sort<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    cmp: &mut F,
) -> Result<()> {
    sort_with(layout, data, TUNED_PARAMS.merge_sort_threshold, cmp, alloc_scratch)
}

fn alloc_scratch<U: Copy>(seed: &[U]) -> Result<Vec<U>> {
    let mut scratch = Vec::new();
    try_reserve(&mut scratch, seed.len(), SCRATCH)?;
    scratch.extend_from_slice(seed);
    Ok(scratch)
}

fn sort_with<L, F, A>(
    layout: L,
    data: &mut [L::Unit],
    threshold: usize,
    cmp: &mut F,
    alloc: A,
) -> Result<()>
where
    L: Layout,
    F: Compare<L::Item>,
    A: FnOnce(&[L::Unit]) -> Result<Vec<L::Unit>>,
{
    debug_assert!(threshold >= 2);
    let len = layout.count(data);
    if len <= threshold {
        insertion_sort::sort(layout, data, cmp);
        return Ok(());
    }

    // Seeded with live elements, so the scratch never holds anything but
    // valid units.
    let mut scratch = alloc(&data[..(len / 2) * layout.stride()])?;
    sort_in_place(layout, data, &mut scratch, threshold, cmp);
    Ok(())
}

/// Sorts `data` in place using `aux` (at least half as long) as scratch.
fn sort_in_place<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    aux: &mut [L::Unit],
    threshold: usize,
    cmp: &mut F,
) {
    let len = layout.count(data);
    if len <= threshold {
        insertion_sort::sort(layout, data, cmp);
        return;
    }

    let half = len / 2;
    let run = half * layout.stride();
    {
        let (left, right) = common::split_at(layout, data, half);
        sort_in_place(layout, right, aux, threshold, cmp);
        sort_into(layout, left, &mut aux[..run], threshold, cmp);
    }
    merge(layout, data, &aux[..run], true, cmp);
}

/// Leaves the sorted contents of `src` in `dst` (same length). `src` is
/// clobbered.
fn sort_into<L: Layout, F: Compare<L::Item>>(
    layout: L,
    src: &mut [L::Unit],
    dst: &mut [L::Unit],
    threshold: usize,
    cmp: &mut F,
) {
    let len = layout.count(src);
    debug_assert_eq!(len, layout.count(dst));
    if len <= threshold {
        for built in 0..len {
            insertion_sort::insert_at(layout, dst, built, layout.at(src, built), cmp);
        }
        return;
    }

    let half = len / 2;
    let rest = len - half;
    let (left, right) = common::split_at(layout, src, half);
    // The second half is sorted where it lies, borrowing `dst` as scratch,
    // then the first half is sorted straight into the tail of `dst`.
    sort_in_place(layout, right, dst, threshold, cmp);
    sort_into(layout, left, &mut dst[rest * layout.stride()..], threshold, cmp);
    merge(layout, dst, right, false, cmp);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MergePath {
    /// The runs did not overlap and were moved with bulk copies.
    FullRun,
    Interleaved,
}

#[inline]
fn foreign_goes_first(order: Ordering, foreign_is_first_run: bool) -> bool {
    if foreign_is_first_run {
        order != Ordering::Greater
    } else {
        order == Ordering::Less
    }
}

/// Merges the sorted run `foreign` with the sorted run already resident at
/// the tail of `dst` (`dst[foreign.len()..]`), filling all of `dst`.
///
/// `foreign_is_first_run` says which run came first in the original order;
/// ties go to that run.
fn merge<L: Layout, F: Compare<L::Item>>(
    layout: L,
    dst: &mut [L::Unit],
    foreign: &[L::Unit],
    foreign_is_first_run: bool,
    cmp: &mut F,
) -> MergePath {
    let nf = layout.count(foreign);
    let len = layout.count(dst);
    debug_assert!(nf > 0 && nf < len);

    let order = cmp(layout.at(foreign, nf - 1), layout.at(dst, nf));
    if foreign_goes_first(order, foreign_is_first_run) {
        layout.copy_run_from(dst, 0, foreign, 0, nf);
        return MergePath::FullRun;
    }
    let order = cmp(layout.at(foreign, 0), layout.at(dst, len - 1));
    if !foreign_goes_first(order, foreign_is_first_run) {
        layout.copy_run(dst, 0, nf, len - nf);
        layout.copy_run_from(dst, len - nf, foreign, 0, nf);
        return MergePath::FullRun;
    }

    // k == i + (j - nf) <= j: writes never overtake the unread resident part.
    let (mut i, mut j, mut k) = (0, nf, 0);
    while i < nf && j < len {
        let order = cmp(layout.at(foreign, i), layout.at(dst, j));
        if foreign_goes_first(order, foreign_is_first_run) {
            let start = i;
            i += 1;
            while i < nf
                && foreign_goes_first(
                    cmp(layout.at(foreign, i), layout.at(dst, j)),
                    foreign_is_first_run,
                )
            {
                i += 1;
            }
            layout.copy_run_from(dst, k, foreign, start, i - start);
            k += i - start;
        } else {
            let start = j;
            j += 1;
            while j < len
                && !foreign_goes_first(
                    cmp(layout.at(foreign, i), layout.at(dst, j)),
                    foreign_is_first_run,
                )
            {
                j += 1;
            }
            if k != start {
                layout.copy_run(dst, k, start, j - start);
            }
            k += j - start;
        }
    }
    if i < nf {
        layout.copy_run_from(dst, k, foreign, i, nf - i);
    }

    MergePath::Interleaved
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::Error;
    use crate::access::Blocks;

    fn merge_typed(dst: &mut [u32], foreign: &[u32], foreign_is_first_run: bool) -> MergePath {
        merge(Typed::<u32>::new(), dst, foreign, foreign_is_first_run, &mut u32::cmp)
    }

    #[test]
    fn merge_takes_full_run_shortcut() {
        let mut dst = [0, 0, 0, 4, 5, 6];
        assert_eq!(merge_typed(&mut dst, &[1, 2, 3], true), MergePath::FullRun);
        assert_eq!(dst, [1, 2, 3, 4, 5, 6]);

        let mut dst = [0, 0, 0, 1, 2, 3];
        assert_eq!(merge_typed(&mut dst, &[4, 5, 6], false), MergePath::FullRun);
        assert_eq!(dst, [1, 2, 3, 4, 5, 6]);

        let mut dst = [0, 0, 0, 1, 2, 3];
        assert_eq!(merge_typed(&mut dst, &[4, 5, 6], true), MergePath::FullRun);
        assert_eq!(dst, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn merge_interleaves_overlapping_runs() {
        let mut dst = [0, 0, 0, 2, 4, 6];
        assert_eq!(merge_typed(&mut dst, &[1, 3, 5], true), MergePath::Interleaved);
        assert_eq!(dst, [1, 2, 3, 4, 5, 6]);

        let mut dst = [0, 0, 0, 0, 1, 3, 5, 7];
        assert_eq!(merge_typed(&mut dst, &[2, 4, 6, 8], false), MergePath::Interleaved);
        assert_eq!(dst, [1, 2, 3, 4, 5, 6, 7, 8]);

        let mut dst = [0, 0, 5, 6, 7];
        assert_eq!(merge_typed(&mut dst, &[1, 9], true), MergePath::Interleaved);
        assert_eq!(dst, [1, 5, 6, 7, 9]);
    }

    #[test]
    fn merge_breaks_ties_towards_first_run() {
        let mut dst = [(0, 'x'); 4];
        dst[2] = (1, 'b');
        dst[3] = (2, 'b');
        merge(
            Typed::<(u8, char)>::new(),
            &mut dst,
            &[(1, 'a'), (2, 'a')],
            true,
            &mut |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0),
        );
        assert_eq!(dst, [(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);

        let mut dst = [(0, 'x'); 4];
        dst[2] = (1, 'a');
        dst[3] = (2, 'a');
        merge(
            Typed::<(u8, char)>::new(),
            &mut dst,
            &[(1, 'b'), (2, 'b')],
            false,
            &mut |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0),
        );
        assert_eq!(dst, [(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
    }

    #[test]
    fn small_threshold_is_stable() {
        let mut rng = StdRng::seed_from_u64(0x3E26_2026);
        for len in [3_usize, 4, 7, 64, 1000, 4097] {
            let mut data: Vec<(u16, u32)> = (0..len as u32)
                .map(|tag| (rng.random_range(0..10), tag))
                .collect();
            let mut expected = data.clone();
            expected.sort_by_key(|pair| pair.0);

            sort_with(
                Typed::<(u16, u32)>::new(),
                &mut data,
                2,
                &mut |a: &(u16, u32), b: &(u16, u32)| a.0.cmp(&b.0),
                alloc_scratch,
            )
            .unwrap();
            assert_eq!(data, expected, "len={len}");
        }
    }

    #[test]
    fn sorts_misaligned_blocks() {
        let mut rng = StdRng::seed_from_u64(0xA11C_2026);
        let size = 5;
        let mut data: Vec<u8> = (0..size * 333).map(|_| rng.random_range(0..5)).collect();
        let mut expected: Vec<Vec<u8>> = data.chunks(size).map(<[u8]>::to_vec).collect();
        expected.sort();

        sort(Blocks::new(size), &mut data, &mut |a: &[u8], b: &[u8]| a.cmp(b)).unwrap();
        assert_eq!(data, expected.concat());
    }

    #[test]
    fn failed_allocation_reports_and_keeps_input() {
        let mut rng = StdRng::seed_from_u64(0x0000_2026);
        let original: Vec<u64> = (0..500).map(|_| rng.random()).collect();
        let mut data = original.clone();

        let err = sort_with(Typed::<u64>::new(), &mut data, 8, &mut u64::cmp, |seed: &[u64]| {
            Err(Error::OutOfMemory {
                what: SCRATCH,
                bytes: size_of_val(seed),
            })
        })
        .unwrap_err();

        assert_eq!(
            err,
            Error::OutOfMemory {
                what: SCRATCH,
                bytes: 250 * 8,
            }
        );
        assert_eq!(data, original);
    }

    #[test]
    fn tiny_inputs_do_not_allocate() {
        for len in 0..=2 {
            let mut data: Vec<u32> = (0..len).rev().collect();
            sort_with(Typed::<u32>::new(), &mut data, 2, &mut u32::cmp, |_: &[u32]| {
                panic!("allocated for len={len}")
            })
            .unwrap();
            assert!(data.is_sorted());
        }
    }
}
