use std::cmp::Ordering;

use crate::TUNED_PARAMS;
use crate::access::{Compare, Layout, Typed};

use super::{common, insertion_sort};

/// Unstable in-place quick sort (median-of-three pivot, Hoare partition).
pub fn quick_sort<T: Copy, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], mut cmp: F) {
    sort(Typed::new(), data, &mut cmp);
}

pub(crate) fn sort<L: Layout, F: Compare<L::Item>>(layout: L, data: &mut [L::Unit], cmp: &mut F) {
    sort_with_threshold(layout, data, TUNED_PARAMS.quick_sort_threshold, cmp);
}

fn sort_with_threshold<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    threshold: usize,
    cmp: &mut F,
) {
    debug_assert!(threshold >= 2);
    let len = layout.count(data);
    if len < 2 {
        return;
    }

    if len > threshold {
        let mut pivot = layout.fetch(data, 0);
        quick_sort_recursive(layout, data, threshold, &mut pivot, cmp);
    }
    // Every element is now at most `threshold` slots away from home.
    insertion_sort::sort(layout, data, cmp);
}

fn quick_sort_recursive<L: Layout, F: Compare<L::Item>>(
    layout: L,
    mut data: &mut [L::Unit],
    threshold: usize,
    pivot: &mut L::Slot,
    cmp: &mut F,
) {
    while layout.count(data) > threshold {
        common::median3_pivot(layout, data, pivot, cmp);
        let split = common::partition_hoare(layout, data, pivot, cmp) + 1;

        let (left, right) = common::split_at(layout, data, split);
        if layout.count(left) < layout.count(right) {
            quick_sort_recursive(layout, left, threshold, pivot, cmp);
            data = right;
        } else {
            quick_sort_recursive(layout, right, threshold, pivot, cmp);
            data = left;
        }
    }
}
