use std::cmp::Ordering;

use crate::access::{Compare, Layout, Typed, compare};

/// Stable bubble sort. Each pass stops at the position of the previous pass's
/// last swap, since everything past it is already in place.
pub fn bubble_sort<T: Copy, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], mut cmp: F) {
    sort(Typed::new(), data, &mut cmp);
}

pub(crate) fn sort<L: Layout, F: Compare<L::Item>>(layout: L, data: &mut [L::Unit], cmp: &mut F) {
    let len = layout.count(data);
    if len < 2 {
        return;
    }

    let mut end = len - 1;
    while end > 0 {
        let mut last_swap = 0;
        for i in 0..end {
            if compare(layout, data, i, i + 1, cmp) == Ordering::Greater {
                layout.swap(data, i, i + 1);
                last_swap = i + 1;
            }
        }
        end = last_swap;
    }
}
