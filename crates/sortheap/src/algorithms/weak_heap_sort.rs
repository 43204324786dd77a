//! Weak heap primitives.
//!
//! A weak heap is a binary tree laid out in an array where every node is
//! no greater than all the nodes of its *right* subtree; nothing is said
//! about its left subtree. The root has no left subtree at all. Each node
//! carries one reverse bit that swaps the roles of its two children, so
//! flipping a subtree costs one bit toggle instead of moving elements.
//!
//! With `r(i)` the reverse bit of node `i`:
//! - `parent(i) = i / 2`
//! - `left(i) = 2i + r(i)`, `right(i) = 2i + 1 - r(i)`
//!
//! The *distinguished ancestor* of `j` is the parent of the first node met
//! while climbing from `j` that is a right child. The weak heap property
//! reduces to `a[dancestor(j)] <= a[j]` for every `j > 0`.
//!
//! All primitives here are min-oriented; sorting passes a reversed
//! comparator.

use std::cmp::Ordering;

use crate::access::{Compare, Layout, Typed, compare};
use crate::error::Result;
use crate::weak_heap::RevBits;

/// Unstable in-place weak heap sort.
///
/// Allocates one reverse bit per element; reports
/// [`Error::OutOfMemory`](crate::Error::OutOfMemory) if that fails, leaving
/// `data` untouched.
pub fn weak_heap_sort<T, F>(data: &mut [T], mut cmp: F) -> Result<()>
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
    let len = layout.count(data);
    if len < 2 {
        return Ok(());
    }

    let mut bits = RevBits::with_capacity(len)?;
    let mut rev = |a: &L::Item, b: &L::Item| cmp(b, a);
    sort_with_bits(layout, data, &mut bits, &mut rev);
    Ok(())
}

/// Sorts `data` descending by `cmp`. Returns the number of root-extraction
/// cycles run.
fn sort_with_bits<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    bits: &mut RevBits,
    cmp: &mut F,
) -> usize {
    let len = layout.count(data);
    build(layout, data, bits, len, cmp);

    let mut cycles = 0;
    for end in (1..len).rev() {
        layout.swap(data, 0, end);
        sift_down_root(layout, data, bits, end, cmp);
        cycles += 1;
    }
    cycles
}

#[inline]
pub(crate) fn parent(node: usize) -> usize {
    node / 2
}

#[inline]
fn left_child(node: usize, bits: &RevBits) -> usize {
    2 * node + usize::from(bits.get(node))
}

#[inline]
fn right_child(node: usize, bits: &RevBits) -> usize {
    2 * node + 1 - usize::from(bits.get(node))
}

#[inline]
fn is_left_child(node: usize, bits: &RevBits) -> bool {
    (node & 1 == 1) == bits.get(parent(node))
}

/// Distinguished ancestor of `node` (`node > 0`).
#[inline]
pub(crate) fn dancestor(mut node: usize, bits: &RevBits) -> usize {
    debug_assert!(node > 0);
    while is_left_child(node, bits) {
        node = parent(node);
    }
    parent(node)
}

/// Distinguished ancestor of `node` assuming every reverse bit on the path
/// is clear, which holds during a bottom-up build.
#[inline]
fn fast_dancestor(node: usize) -> usize {
    node >> (node.trailing_zeros() + 1)
}

/// Last node on the leftmost path of the root's right subtree, or 0 if the
/// root has no child within `len`.
#[inline]
fn last_child(bits: &RevBits, len: usize) -> usize {
    let mut last = 0;
    let mut node = right_child(0, bits);
    while node < len {
        last = node;
        node = left_child(node, bits);
    }
    last
}

/// Restores `a[ancestor] <= a[child]` where `ancestor` is the distinguished
/// ancestor of `child`. Returns `true` when nothing had to change.
#[inline]
fn join<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    bits: &mut RevBits,
    ancestor: usize,
    child: usize,
    cmp: &mut F,
) -> bool {
    debug_assert!(ancestor < child);
    if compare(layout, data, ancestor, child, cmp) != Ordering::Greater {
        return true;
    }
    layout.swap(data, ancestor, child);
    bits.toggle(child);
    false
}

/// Arranges `data[..len]` into a weak heap. Clears the first `len` reverse
/// bits first.
pub(crate) fn build<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    bits: &mut RevBits,
    len: usize,
    cmp: &mut F,
) {
    bits.clear_first(len);
    for node in (1..len).rev() {
        join(layout, data, bits, fast_dancestor(node), node, cmp);
    }
}

/// Appends `elem` to the weak heap `data[..len]` and restores the heap
/// property along its distinguished ancestor chain.
pub(crate) fn insert<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    bits: &mut RevBits,
    len: usize,
    elem: &L::Item,
    cmp: &mut F,
) {
    layout.put(data, len, elem);
    bits.clear(len);
    if len == 0 {
        return;
    }

    // An only child: make it a left child so its parent is skipped.
    if len & 1 == 0 {
        bits.clear(parent(len));
    }

    let mut node = len;
    while node != 0 {
        let ancestor = dancestor(node, bits);
        if join(layout, data, bits, ancestor, node, cmp) {
            break;
        }
        node = ancestor;
    }
}

/// Moves the root of the weak heap `data[..len]` into `out` and refills it
/// from the last leaf.
pub(crate) fn extract<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    bits: &mut RevBits,
    len: usize,
    out: &mut L::Item,
    cmp: &mut F,
) {
    debug_assert!(len > 0);
    layout.get_into(data, 0, out);

    let len = len - 1;
    if len > 0 {
        layout.copy(data, 0, len);
        sift_down_root(layout, data, bits, len, cmp);
    }
}

/// Restores the heap property of `data[..len]` after its root changed.
#[inline]
fn sift_down_root<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &mut [L::Unit],
    bits: &mut RevBits,
    len: usize,
    cmp: &mut F,
) {
    let mut node = last_child(bits, len);
    while node != 0 {
        join(layout, data, bits, 0, node, cmp);
        node = parent(node);
    }
}

#[cfg(test)]
pub(crate) fn is_weak_heap<T, F: FnMut(&T, &T) -> Ordering>(
    data: &[T],
    bits: &RevBits,
    mut cmp: F,
) -> bool {
    (1..data.len()).all(|node| cmp(&data[dancestor(node, bits)], &data[node]) != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::access::Blocks;

    #[test]
    fn fast_dancestor_matches_climb_on_clear_bits() {
        let bits = RevBits::with_capacity(1024).unwrap();
        for node in 1..1024 {
            assert_eq!(fast_dancestor(node), dancestor(node, &bits), "node={node}");
        }
    }

    #[test]
    fn build_then_extract_yields_ascending() {
        let mut rng = StdRng::seed_from_u64(0x3EA6_2026);
        for len in [1_usize, 2, 3, 7, 8, 100, 1023] {
            let layout = Typed::<u32>::new();
            let mut data: Vec<u32> = (0..len).map(|_| rng.random_range(0..64)).collect();
            let mut expected = data.clone();
            expected.sort();

            let mut bits = RevBits::with_capacity(len).unwrap();
            build(layout, &mut data, &mut bits, len, &mut u32::cmp);
            assert!(is_weak_heap(&data, &bits, u32::cmp), "len={len}");

            let mut popped = Vec::with_capacity(len);
            for live in (1..=len).rev() {
                let mut out = 0;
                extract(layout, &mut data, &mut bits, live, &mut out, &mut u32::cmp);
                assert!(is_weak_heap(&data[..live - 1], &bits, u32::cmp));
                popped.push(out);
            }
            assert_eq!(popped, expected);
        }
    }

    #[test]
    fn insert_keeps_weak_heap_property() {
        let mut rng = StdRng::seed_from_u64(0x1453_2026);
        let layout = Typed::<i16>::new();
        let mut data = [0_i16; 300];
        let mut bits = RevBits::with_capacity(data.len()).unwrap();
        for len in 0..data.len() {
            let x = rng.random_range(-500..500);
            insert(layout, &mut data, &mut bits, len, &x, &mut i16::cmp);
            assert!(is_weak_heap(&data[..=len], &bits, i16::cmp), "len={len}");
            assert_eq!(data[..=len].iter().min(), Some(&data[0]));
        }
    }

    #[test]
    fn sort_runs_one_cycle_per_extracted_root() {
        let mut data = [9_u32, 1, 8, 2, 7, 3];
        let mut bits = RevBits::with_capacity(data.len()).unwrap();
        let mut rev = |a: &u32, b: &u32| b.cmp(a);
        let cycles = sort_with_bits(Typed::<u32>::new(), &mut data, &mut bits, &mut rev);
        assert_eq!(data, [1, 2, 3, 7, 8, 9]);
        assert_eq!(cycles, 5);
    }

    #[test]
    fn sorts_blocks() {
        let mut rng = StdRng::seed_from_u64(0x3EA6_B10C);
        let size = 7;
        let mut data: Vec<u8> = (0..size * 211).map(|_| rng.random_range(0..3)).collect();
        let mut expected: Vec<Vec<u8>> = data.chunks(size).map(<[u8]>::to_vec).collect();
        expected.sort();

        sort(Blocks::new(size), &mut data, &mut |a: &[u8], b: &[u8]| a.cmp(b)).unwrap();
        assert_eq!(data, expected.concat());
    }
}
