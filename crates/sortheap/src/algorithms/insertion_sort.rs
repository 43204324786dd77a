use std::cmp::Ordering;

use crate::access::{Compare, Layout, Typed};

/// Stable in-place insertion sort.
pub fn insertion_sort<T: Copy, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], mut cmp: F) {
    sort(Typed::new(), data, &mut cmp);
}

/// Inserts the last element of `data` into the sorted prefix before it.
///
/// `data` must be non-empty and `data[..len - 1]` sorted.
pub fn insert_in_place<T: Copy, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], mut cmp: F) {
    debug_assert!(!data.is_empty());
    let len = data.len();
    if len < 2 {
        return;
    }
    let mut hole = [data[len - 1]];
    insert_presorted(Typed::new(), data, len - 1, &mut hole, &mut cmp);
}

/// Inserts `elem` into the sorted prefix `data[..len]`, shifting the tail of
/// the prefix one slot to the right. `data` must have room for `len + 1`
/// elements.
pub fn insert_out_of_place<T: Copy, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    len: usize,
    elem: &T,
    mut cmp: F,
) {
    debug_assert!(len < data.len());
    insert_at(Typed::new(), data, len, elem, &mut cmp);
}

pub(crate) fn sort<L: Layout, F: Compare<L::Item>>(layout: L, data: &mut [L::Unit], cmp: &mut F) {
    let len = layout.count(data);
    if len < 2 {
        return;
    }

    let mut hole = layout.fetch(data, 0);
    for unsorted in 1..len {
        insert_presorted(layout, data, unsorted, &mut hole, cmp);
    }
}

/// Moves element `index` into place within `data[..=index]`. `hole` is
/// scratch for the element being moved.
#[inline]
pub(crate) fn insert_presorted<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    index: usize,
    hole: &mut L::Slot,
    cmp: &mut F,
) {
    debug_assert!(index > 0);
    // Already in place: no copy at all.
    if cmp(layout.at(data, index), layout.at(data, index - 1)) != Ordering::Less {
        return;
    }

    layout.load(data, index, hole);
    let mut at = index;
    loop {
        layout.copy(data, at, at - 1);
        at -= 1;
        if at == 0 || cmp(layout.slot_item(hole), layout.at(data, at - 1)) != Ordering::Less {
            break;
        }
    }
    layout.store(data, at, hole);
}

/// Out-of-place insertion of `elem` into the sorted run `data[..len]`.
#[inline]
pub(crate) fn insert_at<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    len: usize,
    elem: &L::Item,
    cmp: &mut F,
) {
    let mut at = len;
    while at > 0 && cmp(elem, layout.at(data, at - 1)) == Ordering::Less {
        layout.copy(data, at, at - 1);
        at -= 1;
    }
    layout.put(data, at, elem);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn keeps_equal_keys_in_input_order() {
        let mut rng = StdRng::seed_from_u64(0x1A5E_2026);
        let mut data: Vec<(u8, u32)> = (0..300).map(|tag| (rng.random_range(0..8), tag)).collect();
        insertion_sort(&mut data, |a, b| a.0.cmp(&b.0));

        for pair in data.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
            if pair[0].0 == pair[1].0 {
                assert!(pair[0].1 < pair[1].1);
            }
        }
    }

    #[test]
    fn insert_in_place_moves_last_element() {
        let mut data = [1, 3, 5, 7, 4];
        insert_in_place(&mut data, u32::cmp);
        assert_eq!(data, [1, 3, 4, 5, 7]);

        let mut data = [1, 3, 0];
        insert_in_place(&mut data, u32::cmp);
        assert_eq!(data, [0, 1, 3]);

        let mut single = [9];
        insert_in_place(&mut single, u32::cmp);
        assert_eq!(single, [9]);
    }

    #[test]
    fn insert_in_place_goes_after_equal_keys() {
        let mut data = [(1, 'a'), (2, 'b'), (2, 'c'), (3, 'd'), (2, 'e')];
        insert_in_place(&mut data, |a, b| a.0.cmp(&b.0));
        assert_eq!(data, [(1, 'a'), (2, 'b'), (2, 'c'), (2, 'e'), (3, 'd')]);
    }

    #[test]
    fn insert_out_of_place_fills_slot_past_run() {
        let mut data = [2, 4, 6, 0, 0];
        insert_out_of_place(&mut data, 3, &5, u32::cmp);
        assert_eq!(&data[..4], &[2, 4, 5, 6]);
        insert_out_of_place(&mut data, 4, &1, u32::cmp);
        assert_eq!(data, [1, 2, 4, 5, 6]);

        let mut empty_run = [0_u32; 1];
        insert_out_of_place(&mut empty_run, 0, &7, u32::cmp);
        assert_eq!(empty_run, [7]);
    }
}
