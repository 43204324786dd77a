//! Sorting and searching of opaque fixed-size byte records.
//!
//! `data` holds `data.len() / size` records of `size` bytes each. Records of
//! 4 or 8 bytes in a suitably aligned buffer are moved as native `u32`/`u64`
//! words; everything else goes through the generic [`Blocks`] layout. Either
//! way the comparator sees each record's bytes exactly as stored.

use std::cmp::Ordering;
use std::marker::PhantomData;

use tracing::trace;

use crate::access::{Blocks, Compare, Layout, Typed};
use crate::algorithms;
use crate::algorithms::quick_sort_3way::{DefaultPartition, ThreeWayPartition};
use crate::error::Result;
use crate::{SortAlgorithm, sort_layout};

/// Work run over whichever layout a buffer dispatches to.
trait Job {
    type Output;

    fn run<L: Layout, F: Compare<L::Item>>(
        self,
        layout: L,
        data: &mut [L::Unit],
        cmp: &mut F,
    ) -> Self::Output;
}

struct Checked(SortAlgorithm);

impl Job for Checked {
    type Output = Result<()>;

    fn run<L: Layout, F: Compare<L::Item>>(
        self,
        layout: L,
        data: &mut [L::Unit],
        cmp: &mut F,
    ) -> Result<()> {
        sort_layout(self.0, layout, data, cmp)
    }
}

/// Sorts that cannot fail.
#[derive(Clone, Copy)]
enum InPlace {
    Insertion,
    Bubble,
    Selection,
    Quick,
    Heap,
}

impl Job for InPlace {
    type Output = ();

    fn run<L: Layout, F: Compare<L::Item>>(self, layout: L, data: &mut [L::Unit], cmp: &mut F) {
        match self {
            Self::Insertion => algorithms::insertion_sort::sort(layout, data, cmp),
            Self::Bubble => algorithms::bubble_sort::sort(layout, data, cmp),
            Self::Selection => algorithms::selection_sort::sort(layout, data, cmp),
            Self::Quick => algorithms::quick_sort_median3::sort(layout, data, cmp),
            Self::Heap => algorithms::heap_sort::sort(layout, data, cmp),
        }
    }
}

struct ThreeWay<P>(PhantomData<P>);

impl<P: ThreeWayPartition> Job for ThreeWay<P> {
    type Output = ();

    fn run<L: Layout, F: Compare<L::Item>>(self, layout: L, data: &mut [L::Unit], cmp: &mut F) {
        algorithms::quick_sort_3way::sort::<P, L, F>(layout, data, cmp);
    }
}

fn dispatch<J, F>(job: J, data: &mut [u8], size: usize, mut cmp: F) -> J::Output
where
    J: Job,
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    assert!(size > 0, "record size must be non-zero");
    assert_eq!(data.len() % size, 0, "buffer length is not a multiple of the record size");

    match size {
        4 => {
            // SAFETY: any 4 initialized bytes are a valid `u32`.
            let (head, words, tail) = unsafe { data.align_to_mut::<u32>() };
            if head.is_empty() && tail.is_empty() {
                trace!(size, records = words.len(), "native u32 records");
                let mut native = |a: &u32, b: &u32| cmp(&a.to_ne_bytes(), &b.to_ne_bytes());
                return job.run(Typed::<u32>::new(), words, &mut native);
            }
        }
        8 => {
            // SAFETY: any 8 initialized bytes are a valid `u64`.
            let (head, words, tail) = unsafe { data.align_to_mut::<u64>() };
            if head.is_empty() && tail.is_empty() {
                trace!(size, records = words.len(), "native u64 records");
                let mut native = |a: &u64, b: &u64| cmp(&a.to_ne_bytes(), &b.to_ne_bytes());
                return job.run(Typed::<u64>::new(), words, &mut native);
            }
        }
        _ => {}
    }

    trace!(size, records = data.len() / size, "generic byte records");
    job.run(Blocks::new(size), data, &mut cmp)
}

/// Byte-record counterpart of [`crate::sort_by`].
pub fn sort_by<F>(algo: SortAlgorithm, data: &mut [u8], size: usize, cmp: F) -> Result<()>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    dispatch(Checked(algo), data, size, cmp)
}

pub fn insertion_sort<F: FnMut(&[u8], &[u8]) -> Ordering>(data: &mut [u8], size: usize, cmp: F) {
    dispatch(InPlace::Insertion, data, size, cmp);
}

pub fn bubble_sort<F: FnMut(&[u8], &[u8]) -> Ordering>(data: &mut [u8], size: usize, cmp: F) {
    dispatch(InPlace::Bubble, data, size, cmp);
}

pub fn selection_sort<F: FnMut(&[u8], &[u8]) -> Ordering>(data: &mut [u8], size: usize, cmp: F) {
    dispatch(InPlace::Selection, data, size, cmp);
}

pub fn quick_sort<F: FnMut(&[u8], &[u8]) -> Ordering>(data: &mut [u8], size: usize, cmp: F) {
    dispatch(InPlace::Quick, data, size, cmp);
}

pub fn quick_sort_3way<F: FnMut(&[u8], &[u8]) -> Ordering>(data: &mut [u8], size: usize, cmp: F) {
    quick_sort_3way_with::<DefaultPartition, F>(data, size, cmp);
}

pub fn quick_sort_3way_with<P, F>(data: &mut [u8], size: usize, cmp: F)
where
    P: ThreeWayPartition,
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    dispatch(ThreeWay::<P>(PhantomData), data, size, cmp);
}

pub fn merge_sort<F>(data: &mut [u8], size: usize, cmp: F) -> Result<()>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    dispatch(Checked(SortAlgorithm::MergeSort), data, size, cmp)
}

pub fn heap_sort<F: FnMut(&[u8], &[u8]) -> Ordering>(data: &mut [u8], size: usize, cmp: F) {
    dispatch(InPlace::Heap, data, size, cmp);
}

pub fn weak_heap_sort<F>(data: &mut [u8], size: usize, cmp: F) -> Result<()>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    dispatch(Checked(SortAlgorithm::WeakHeapSort), data, size, cmp)
}

/// Inserts the last record of `data` into the sorted records before it.
pub fn insert_in_place<F>(data: &mut [u8], size: usize, mut cmp: F)
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let layout = Blocks::new(size);
    assert_eq!(data.len() % size, 0, "buffer length is not a multiple of the record size");
    let len = layout.count(data);
    debug_assert!(len > 0);
    if len < 2 {
        return;
    }
    let mut hole = layout.fetch(data, len - 1);
    algorithms::insertion_sort::insert_presorted(layout, data, len - 1, &mut hole, &mut cmp);
}

/// Inserts `elem` into the sorted records `data[..len * size]`; `data` must
/// have room for one more record.
pub fn insert_out_of_place<F>(data: &mut [u8], size: usize, len: usize, elem: &[u8], mut cmp: F)
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let layout = Blocks::new(size);
    assert_eq!(data.len() % size, 0, "buffer length is not a multiple of the record size");
    debug_assert!(len < layout.count(data));
    algorithms::insertion_sort::insert_at(layout, data, len, elem, &mut cmp);
}

/// Byte-record counterpart of [`crate::bisect_search`].
pub fn bisect_search<K, F>(key: &K, data: &[u8], size: usize, mut cmp: F) -> Option<usize>
where
    K: ?Sized,
    F: FnMut(&K, &[u8]) -> Ordering,
{
    algorithms::bisect::search(Blocks::new(size), key, data, &mut cmp)
}
