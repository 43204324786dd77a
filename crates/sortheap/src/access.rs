//! Element access and exchange.
//!
//! Storage is always a slice of *units*. A [`Layout`] groups units into
//! elements: [`Typed<T>`] maps one `T` to one element, [`Blocks`] maps
//! `size` bytes to one element. The algorithms only ever talk in element
//! indices; unit offsets never leave this module.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::slice;

/// Three-way comparator over layout items.
pub trait Compare<I: ?Sized>: FnMut(&I, &I) -> Ordering {}

impl<I: ?Sized, F: FnMut(&I, &I) -> Ordering> Compare<I> for F {}

pub trait Layout: Copy {
    type Unit: Copy;
    type Item: ?Sized;
    /// Owned copy of a single element, used for pivots and holes.
    type Slot: AsRef<[Self::Unit]> + AsMut<[Self::Unit]>;

    /// Units per element.
    fn stride(self) -> usize;
    fn item(self, units: &[Self::Unit]) -> &Self::Item;
    fn units(self, item: &Self::Item) -> &[Self::Unit];
    fn units_mut(self, item: &mut Self::Item) -> &mut [Self::Unit];
    fn slot(self, units: &[Self::Unit]) -> Self::Slot;

    #[inline]
    fn count(self, data: &[Self::Unit]) -> usize {
        data.len() / self.stride()
    }

    #[inline]
    fn span(self, data: &[Self::Unit], index: usize) -> &[Self::Unit] {
        let s = self.stride();
        &data[index * s..(index + 1) * s]
    }

    #[inline]
    fn span_mut(self, data: &mut [Self::Unit], index: usize) -> &mut [Self::Unit] {
        let s = self.stride();
        &mut data[index * s..(index + 1) * s]
    }

    #[inline]
    fn at(self, data: &[Self::Unit], index: usize) -> &Self::Item {
        self.item(self.span(data, index))
    }

    #[inline]
    fn slot_item<'a>(self, slot: &'a Self::Slot) -> &'a Self::Item
    where
        Self::Unit: 'a,
    {
        self.item(slot.as_ref())
    }

    #[inline]
    fn fetch(self, data: &[Self::Unit], index: usize) -> Self::Slot {
        self.slot(self.span(data, index))
    }

    #[inline]
    fn load(self, data: &[Self::Unit], index: usize, slot: &mut Self::Slot) {
        slot.as_mut().copy_from_slice(self.span(data, index));
    }

    #[inline]
    fn store(self, data: &mut [Self::Unit], index: usize, slot: &Self::Slot) {
        self.span_mut(data, index).copy_from_slice(slot.as_ref());
    }

    #[inline]
    fn put(self, data: &mut [Self::Unit], index: usize, item: &Self::Item) {
        self.span_mut(data, index).copy_from_slice(self.units(item));
    }

    #[inline]
    fn get_into(self, data: &[Self::Unit], index: usize, out: &mut Self::Item) {
        self.units_mut(out).copy_from_slice(self.span(data, index));
    }

    /// Overwrites element `dst` with element `src`.
    #[inline]
    fn copy(self, data: &mut [Self::Unit], dst: usize, src: usize) {
        let s = self.stride();
        if s == 1 {
            data[dst] = data[src];
        } else {
            data.copy_within(src * s..(src + 1) * s, dst * s);
        }
    }

    /// `memmove` of `len` elements inside one buffer.
    #[inline]
    fn copy_run(self, data: &mut [Self::Unit], dst: usize, src: usize, len: usize) {
        let s = self.stride();
        data.copy_within(src * s..(src + len) * s, dst * s);
    }

    /// Copies `len` elements from `src[from..]` into `dst[at..]`.
    #[inline]
    fn copy_run_from(
        self,
        dst: &mut [Self::Unit],
        at: usize,
        src: &[Self::Unit],
        from: usize,
        len: usize,
    ) {
        let s = self.stride();
        dst[at * s..(at + len) * s].copy_from_slice(&src[from * s..(from + len) * s]);
    }

    #[inline]
    fn swap(self, data: &mut [Self::Unit], a: usize, b: usize) {
        let s = self.stride();
        if s == 1 {
            data.swap(a, b);
            return;
        }
        swap_spans(data, s, a, b);
    }

    /// Swaps the disjoint runs `[a, a + len)` and `[b, b + len)`.
    #[inline]
    fn swap_runs(self, data: &mut [Self::Unit], a: usize, b: usize, len: usize) {
        debug_assert!(a + len <= b || b + len <= a);
        for k in 0..len {
            self.swap(data, a + k, b + k);
        }
    }
}

#[inline]
fn swap_spans<U>(data: &mut [U], s: usize, a: usize, b: usize) {
    if a == b {
        return;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (head, tail) = data.split_at_mut(hi * s);
    head[lo * s..(lo + 1) * s].swap_with_slice(&mut tail[..s]);
}

#[inline]
pub(crate) fn compare<L: Layout, F: Compare<L::Item>>(
    layout: L,
    data: &[L::Unit],
    a: usize,
    b: usize,
    cmp: &mut F,
) -> Ordering {
    cmp(layout.at(data, a), layout.at(data, b))
}

/// One `T` per element.
pub struct Typed<T>(PhantomData<fn() -> T>);

impl<T> Typed<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Typed<T> {}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Typed<{}>", std::any::type_name::<T>())
    }
}

impl<T: Copy> Layout for Typed<T> {
    type Unit = T;
    type Item = T;
    type Slot = [T; 1];

    #[inline(always)]
    fn stride(self) -> usize {
        1
    }

    #[inline(always)]
    fn item(self, units: &[T]) -> &T {
        &units[0]
    }

    #[inline(always)]
    fn units(self, item: &T) -> &[T] {
        slice::from_ref(item)
    }

    #[inline(always)]
    fn units_mut(self, item: &mut T) -> &mut [T] {
        slice::from_mut(item)
    }

    #[inline(always)]
    fn slot(self, units: &[T]) -> [T; 1] {
        [units[0]]
    }
}

/// Opaque fixed-size byte records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Blocks {
    size: usize,
}

impl Blocks {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "element size must be non-zero");
        Self { size }
    }

    pub fn size(self) -> usize {
        self.size
    }
}

impl Layout for Blocks {
    type Unit = u8;
    type Item = [u8];
    type Slot = Box<[u8]>;

    #[inline]
    fn stride(self) -> usize {
        self.size
    }

    #[inline]
    fn item(self, units: &[u8]) -> &[u8] {
        units
    }

    #[inline]
    fn units(self, item: &[u8]) -> &[u8] {
        debug_assert_eq!(item.len(), self.size);
        item
    }

    #[inline]
    fn units_mut(self, item: &mut [u8]) -> &mut [u8] {
        debug_assert_eq!(item.len(), self.size);
        item
    }

    #[inline]
    fn slot(self, units: &[u8]) -> Box<[u8]> {
        units.into()
    }

    // 4- and 8-byte records move as single words whatever the alignment.
    #[inline]
    fn copy(self, data: &mut [u8], dst: usize, src: usize) {
        match self.size {
            4 => store_word(data, dst, load_word::<4>(data, src)),
            8 => store_word(data, dst, load_word::<8>(data, src)),
            s => data.copy_within(src * s..(src + 1) * s, dst * s),
        }
    }

    #[inline]
    fn swap(self, data: &mut [u8], a: usize, b: usize) {
        match self.size {
            4 => swap_words::<4>(data, a, b),
            8 => swap_words::<8>(data, a, b),
            s => swap_spans(data, s, a, b),
        }
    }
}

#[inline(always)]
fn load_word<const N: usize>(data: &[u8], index: usize) -> [u8; N] {
    let mut word = [0; N];
    word.copy_from_slice(&data[index * N..(index + 1) * N]);
    word
}

#[inline(always)]
fn store_word<const N: usize>(data: &mut [u8], index: usize, word: [u8; N]) {
    data[index * N..(index + 1) * N].copy_from_slice(&word);
}

#[inline(always)]
fn swap_words<const N: usize>(data: &mut [u8], a: usize, b: usize) {
    let x = load_word::<N>(data, a);
    let y = load_word::<N>(data, b);
    store_word(data, a, y);
    store_word(data, b, x);
}
