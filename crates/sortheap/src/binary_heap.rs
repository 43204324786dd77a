//! Fixed-capacity binary min-heap over caller-provided storage.

use std::cmp::Ordering;

use tracing::trace;

use crate::access::{Blocks, Compare, Layout, Typed};
use crate::algorithms::heap_sort;

/// A binary min-heap (ordered by `cmp`) living in the front of `storage`.
///
/// Storage may be borrowed (`&mut [T]`) or owned (`Vec<T>`, `Box<[T]>`); its
/// length fixes the capacity. The heap never allocates for typed elements.
pub struct BinaryHeap<L: Layout, S, F> {
    layout: L,
    storage: S,
    len: usize,
    hole: Option<L::Slot>,
    cmp: F,
}

impl<T, S, F> BinaryHeap<Typed<T>, S, F>
where
    T: Copy,
    S: AsRef<[T]> + AsMut<[T]>,
    F: FnMut(&T, &T) -> Ordering,
{
    pub fn new(storage: S, cmp: F) -> Self {
        Self::with_layout(Typed::new(), storage, cmp)
    }

    pub fn pop(&mut self) -> Option<T> {
        let mut out = *self.peek()?;
        self.extract(&mut out);
        Some(out)
    }
}

impl<S, F> BinaryHeap<Blocks, S, F>
where
    S: AsRef<[u8]> + AsMut<[u8]>,
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    /// Heap of `size`-byte records. `storage.len()` must be a multiple of
    /// `size`.
    pub fn with_block_size(storage: S, size: usize, cmp: F) -> Self {
        debug_assert_eq!(storage.as_ref().len() % size.max(1), 0);
        Self::with_layout(Blocks::new(size), storage, cmp)
    }
}

impl<L, S, F> BinaryHeap<L, S, F>
where
    L: Layout,
    S: AsRef<[L::Unit]> + AsMut<[L::Unit]>,
    F: Compare<L::Item>,
{
    pub fn with_layout(layout: L, storage: S, cmp: F) -> Self {
        Self {
            layout,
            storage,
            len: 0,
            hole: None,
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

    /// Forgets every element. Storage contents are left as they are.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The smallest element, if any.
    pub fn peek(&self) -> Option<&L::Item> {
        if self.is_empty() {
            return None;
        }
        Some(self.layout.at(self.storage.as_ref(), 0))
    }

    /// Adds a copy of `elem`. The heap must not be full.
    pub fn insert(&mut self, elem: &L::Item) {
        debug_assert!(!self.is_full(), "insert into a full heap");
        let data = self.storage.as_mut();
        heap_sort::sift_up(self.layout, data, self.len, elem, &mut self.cmp);
        self.len += 1;
    }

    /// Moves the smallest element into `out`. The heap must not be empty.
    pub fn extract(&mut self, out: &mut L::Item) {
        debug_assert!(!self.is_empty(), "extract from an empty heap");
        let layout = self.layout;
        let data = self.storage.as_mut();
        layout.get_into(data, 0, out);

        self.len -= 1;
        let last = self.len;
        if last == 0 {
            return;
        }
        let hole = self.hole.get_or_insert_with(|| layout.fetch(data, last));
        layout.load(data, last, hole);
        heap_sort::sift_down(layout, data, last, 0, hole, &mut self.cmp);
    }

    /// Adopts the first `count` elements already present in storage and
    /// rearranges them into heap order.
    pub fn build(&mut self, count: usize) {
        debug_assert!(count <= self.capacity(), "build past heap capacity");
        heap_sort::heapify(self.layout, self.storage.as_mut(), count, &mut self.cmp);
        self.len = count;
        trace!(count, "binary heap built");
    }

    /// Releases the storage. Live elements occupy its first `len()` slots
    /// in heap order.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
