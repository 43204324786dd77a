//! Binary heap primitives, kept min-oriented: callers wanting a max-heap pass
//! a reversed comparator.

use std::cmp::Ordering;

use crate::access::{Compare, Layout, Typed};

/// Unstable in-place heap sort. Needs no scratch memory.
pub fn heap_sort<T: Copy, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], mut cmp: F) {
    sort(Typed::new(), data, &mut cmp);
}

pub(crate) fn sort<L: Layout, F: Compare<L::Item>>(layout: L, data: &mut [L::Unit], cmp: &mut F) {
    sort_counting(layout, data, cmp);
}

/// Returns the number of root-extraction cycles run.
fn sort_counting<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    cmp: &mut F,
) -> usize {
    let len = layout.count(data);
    if len < 2 {
        return 0;
    }

    let mut rev = |a: &L::Item, b: &L::Item| cmp(b, a);
    let mut hole = layout.fetch(data, 0);
    heapify_with(layout, data, len, &mut hole, &mut rev);

    let mut cycles = 0;
    for end in (1..len).rev() {
        layout.load(data, end, &mut hole);
        layout.copy(data, end, 0);
        sift_down(layout, data, end, 0, &hole, &mut rev);
        cycles += 1;
    }
    cycles
}

/// Turns `data[..len]` into a heap, bottom-up.
pub(crate) fn heapify<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    len: usize,
    cmp: &mut F,
) {
    if len < 2 {
        return;
    }
    let mut hole = layout.fetch(data, 0);
    heapify_with(layout, data, len, &mut hole, cmp);
}

fn heapify_with<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    len: usize,
    hole: &mut L::Slot,
    cmp: &mut F,
) {
    for node in (0..len / 2).rev() {
        layout.load(data, node, hole);
        sift_down(layout, data, len, node, hole, cmp);
    }
}

/// Places `elem` into the vacant slot `hole` of the heap `data[..len]`,
/// moving smaller children up as it descends. One write per level plus one
/// for `elem`.
#[inline]
pub(crate) fn sift_down<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    len: usize,
    mut hole: usize,
    elem: &L::Slot,
    cmp: &mut F,
) {
    let elem_item = layout.slot_item(elem);
    loop {
        let left = 2 * hole + 1;
        if left >= len {
            break;
        }
        let right = left + 1;
        let child = if right < len
            && cmp(layout.at(data, right), layout.at(data, left)) == Ordering::Less
        {
            right
        } else {
            left
        };
        if cmp(elem_item, layout.at(data, child)) != Ordering::Greater {
            break;
        }
        layout.copy(data, hole, child);
        hole = child;
    }
    layout.store(data, hole, elem);
}

/// Places `elem` into the vacant slot `hole` (normally the first free leaf),
/// moving larger parents down as it climbs.
#[inline]
pub(crate) fn sift_up<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    mut hole: usize,
    elem: &L::Item,
    cmp: &mut F,
) {
    while hole > 0 {
        let parent = (hole - 1) / 2;
        if cmp(elem, layout.at(data, parent)) != Ordering::Less {
            break;
        }
        layout.copy(data, hole, parent);
        hole = parent;
    }
    layout.put(data, hole, elem);
}

#[cfg(test)]
pub(crate) fn is_heap<T, F: FnMut(&T, &T) -> Ordering>(data: &[T], mut cmp: F) -> bool {
    (1..data.len()).all(|child| cmp(&data[(child - 1) / 2], &data[child]) != Ordering::Greater)
}
