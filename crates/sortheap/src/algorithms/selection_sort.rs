use std::cmp::Ordering;

use crate::access::{Compare, Layout, Typed, compare};

/// Unstable selection sort: at most `len - 1` swaps, always `len^2 / 2`
/// comparisons.
pub fn selection_sort<T: Copy, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], mut cmp: F) {
    sort(Typed::new(), data, &mut cmp);
}

pub(crate) fn sort<L: Layout, F: Compare<L::Item>>(layout: L, data: &mut [L::Unit], cmp: &mut F) {
    let len = layout.count(data);
    if len < 2 {
        return;
    }

    for unsorted in 0..len - 1 {
        let mut min = unsorted;
        for i in unsorted + 1..len {
            if compare(layout, data, i, min, cmp) == Ordering::Less {
                min = i;
            }
        }
        if min != unsorted {
            layout.swap(data, unsorted, min);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_with_few_swaps() {
        let mut data = [4_u8, 3, 2, 1, 0];
        selection_sort(&mut data, u8::cmp);
        assert_eq!(data, [0, 1, 2, 3, 4]);

        let mut data = [-1_i8, 5, 5, -7, 0, 3];
        selection_sort(&mut data, |a, b| b.cmp(a));
        assert_eq!(data, [5, 5, 3, 0, -1, -7]);
    }
}
