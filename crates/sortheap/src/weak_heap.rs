//! Fixed-capacity weak min-heap over caller-provided storage.

use std::cmp::Ordering;

use tracing::trace;

use crate::access::{Blocks, Compare, Layout, Typed};
use crate::algorithms::weak_heap_sort;
use crate::error::{Result, try_reserve};

const WORD_BITS: usize = u64::BITS as usize;

/// One reverse bit per weak heap node.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RevBits {
    words: Vec<u64>,
    len: usize,
}

impl RevBits {
    /// All-clear bits for `len` nodes.
    pub fn with_capacity(len: usize) -> Result<Self> {
        let count = len.div_ceil(WORD_BITS);
        let mut words = Vec::new();
        try_reserve(&mut words, count, "weak heap reverse bits")?;
        words.resize(count, 0);
        Ok(Self { words, len })
    }

    /// Number of nodes covered.
    pub fn capacity(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn get(&self, node: usize) -> bool {
        debug_assert!(node < self.len);
        (self.words[node / WORD_BITS] >> (node % WORD_BITS)) & 1 != 0
    }

    #[inline]
    pub(crate) fn toggle(&mut self, node: usize) {
        debug_assert!(node < self.len);
        self.words[node / WORD_BITS] ^= 1 << (node % WORD_BITS);
    }

    #[inline]
    pub(crate) fn clear(&mut self, node: usize) {
        debug_assert!(node < self.len);
        self.words[node / WORD_BITS] &= !(1 << (node % WORD_BITS));
    }

    /// Clears bits `0..len`.
    pub(crate) fn clear_first(&mut self, len: usize) {
        debug_assert!(len <= self.len);
        let full = len / WORD_BITS;
        self.words[..full].fill(0);
        let rest = len % WORD_BITS;
        if rest != 0 {
            self.words[full] &= !((1 << rest) - 1);
        }
    }
}

/// A weak min-heap (ordered by `cmp`) living in the front of `storage`.
///
/// Compared with [`BinaryHeap`](crate::BinaryHeap), sifting needs fewer
/// comparisons at the cost of one reverse bit per slot, held in a
/// [`RevBits`].
pub struct WeakHeap<L: Layout, S, F> {
    layout: L,
    storage: S,
    bits: RevBits,
    len: usize,
    cmp: F,
}

impl<T, S, F> WeakHeap<Typed<T>, S, F>
where
    T: Copy,
    S: AsRef<[T]> + AsMut<[T]>,
    F: FnMut(&T, &T) -> Ordering,
{
    /// Allocates reverse bits for the whole of `storage`.
    pub fn new(storage: S, cmp: F) -> Result<Self> {
        Self::with_layout(Typed::new(), storage, cmp)
    }

    /// Uses caller-provided reverse bits, which must cover `storage`.
    pub fn with_rev_bits(storage: S, bits: RevBits, cmp: F) -> Self {
        Self::with_layout_and_bits(Typed::new(), storage, bits, cmp)
    }

    pub fn pop(&mut self) -> Option<T> {
        let mut out = *self.peek()?;
        self.extract(&mut out);
        Some(out)
    }
}

impl<S, F> WeakHeap<Blocks, S, F>
where
    S: AsRef<[u8]> + AsMut<[u8]>,
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    /// Heap of `size`-byte records. `storage.len()` must be a multiple of
    /// `size`.
    pub fn with_block_size(storage: S, size: usize, cmp: F) -> Result<Self> {
        debug_assert_eq!(storage.as_ref().len() % size.max(1), 0);
        Self::with_layout(Blocks::new(size), storage, cmp)
    }
}

impl<L, S, F> WeakHeap<L, S, F>
where
    L: Layout,
    S: AsRef<[L::Unit]> + AsMut<[L::Unit]>,
    F: Compare<L::Item>,
{
    pub fn with_layout(layout: L, storage: S, cmp: F) -> Result<Self> {
        let bits = RevBits::with_capacity(layout.count(storage.as_ref()))?;
        Ok(Self::with_layout_and_bits(layout, storage, bits, cmp))
    }

    pub fn with_layout_and_bits(layout: L, storage: S, bits: RevBits, cmp: F) -> Self {
        assert!(
            bits.capacity() >= layout.count(storage.as_ref()),
            "reverse bits do not cover heap storage"
        );
        Self {
            layout,
            storage,
            bits,
            len: 0,
            cmp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.layout.count(self.storage.as_ref())
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn peek(&self) -> Option<&L::Item> {
        if self.is_empty() {
            return None;
        }
        Some(self.layout.at(self.storage.as_ref(), 0))
    }

    /// Adds a copy of `elem`. The heap must not be full.
    pub fn insert(&mut self, elem: &L::Item) {
        debug_assert!(!self.is_full(), "insert into a full heap");
        weak_heap_sort::insert(
            self.layout,
            self.storage.as_mut(),
            &mut self.bits,
            self.len,
            elem,
            &mut self.cmp,
        );
        self.len += 1;
    }

    /// Moves the smallest element into `out`. The heap must not be empty.
    pub fn extract(&mut self, out: &mut L::Item) {
        debug_assert!(!self.is_empty(), "extract from an empty heap");
        weak_heap_sort::extract(
            self.layout,
            self.storage.as_mut(),
            &mut self.bits,
            self.len,
            out,
            &mut self.cmp,
        );
        self.len -= 1;
    }

    /// Adopts the first `count` elements already present in storage and
    /// rearranges them into a weak heap.
    pub fn build(&mut self, count: usize) {
        debug_assert!(count <= self.capacity(), "build past heap capacity");
        weak_heap_sort::build(
            self.layout,
            self.storage.as_mut(),
            &mut self.bits,
            count,
            &mut self.cmp,
        );
        self.len = count;
        trace!(count, "weak heap built");
    }

    /// Releases the storage; the reverse bits are dropped with the heap.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
