use std::cmp::Ordering;

use crate::access::{Compare, Layout, compare};

/// Orders the first, middle and last elements of `data` among themselves and
/// loads the resulting middle one into `pivot`.
///
/// Afterwards `data[0] <= pivot <= data[len - 1]`, which lets both Hoare scans
/// run without bounds tests on their first pass.
#[inline]
pub(crate) fn median3_pivot<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    pivot: &mut L::Slot,
    cmp: &mut F,
) {
    let len = layout.count(data);
    debug_assert!(len >= 3);

    let last = len - 1;
    let mid = last / 2;
    if compare(layout, data, 0, mid, cmp) == Ordering::Greater {
        layout.swap(data, 0, mid);
    }
    if compare(layout, data, mid, last, cmp) == Ordering::Greater {
        layout.swap(data, mid, last);
        if compare(layout, data, 0, mid, cmp) == Ordering::Greater {
            layout.swap(data, 0, mid);
        }
    }
    layout.load(data, mid, pivot);
}

/// Hoare partition around `pivot`. Returns `j` such that every element of
/// `data[..=j]` is `<= pivot` and every element of `data[j + 1..]` is
/// `>= pivot`.
///
/// Expects `data` to have gone through [`median3_pivot`]; the returned `j` is
/// then always in `0..len - 1`, so both sides are non-empty.
#[inline]
pub(crate) fn partition_hoare<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    pivot: &L::Slot,
    cmp: &mut F,
) -> usize {
    let pivot = layout.slot_item(pivot);
    let mut i = 0;
    let mut j = layout.count(data) - 1;

    loop {
        while cmp(pivot, layout.at(data, i)) == Ordering::Greater {
            i += 1;
        }
        while cmp(layout.at(data, j), pivot) == Ordering::Greater {
            j -= 1;
        }

        if i >= j {
            return j;
        }

        layout.swap(data, i, j);
        i += 1;
        j -= 1;
    }
}

/// Splits `data` at element `index`.
#[inline]
pub(crate) fn split_at<L: Layout>(
    layout: L,
    data: &mut [L::Unit],
    index: usize,
) -> (&mut [L::Unit], &mut [L::Unit]) {
    data.split_at_mut(index * layout.stride())
}
