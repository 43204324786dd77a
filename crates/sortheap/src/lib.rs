use std::cmp::Ordering;

mod algorithms;

pub mod access;
pub mod binary_heap;
pub mod blocks;
mod error;
pub mod weak_heap;

pub use access::{Blocks, Compare, Layout, Typed};
pub use algorithms::bisect::bisect_search;
pub use algorithms::bubble_sort::bubble_sort;
pub use algorithms::heap_sort::heap_sort;
pub use algorithms::insertion_sort::{insert_in_place, insert_out_of_place, insertion_sort};
pub use algorithms::merge_sort_top_down::merge_sort;
pub use algorithms::quick_sort_3way::{
    BentleyMcIlroy, DefaultPartition, Dijkstra, ThreeWayPartition, quick_sort_3way,
    quick_sort_3way_with,
};
pub use algorithms::quick_sort_median3::quick_sort;
pub use algorithms::selection_sort::selection_sort;
pub use algorithms::weak_heap_sort::weak_heap_sort;
pub use binary_heap::BinaryHeap;
pub use error::{Error, Result};
pub use weak_heap::{RevBits, WeakHeap};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortAlgorithm {
    InsertionSort,
    BubbleSort,
    SelectionSort,
    QuickSort,
    QuickSort3Way,
    MergeSort,
    HeapSort,
    WeakHeapSort,
}

pub const ALL_ALGORITHMS: [SortAlgorithm; 8] = [
    SortAlgorithm::InsertionSort,
    SortAlgorithm::BubbleSort,
    SortAlgorithm::SelectionSort,
    SortAlgorithm::QuickSort,
    SortAlgorithm::QuickSort3Way,
    SortAlgorithm::MergeSort,
    SortAlgorithm::HeapSort,
    SortAlgorithm::WeakHeapSort,
];

pub fn all_algorithms() -> &'static [SortAlgorithm] {
    &ALL_ALGORITHMS
}

pub fn algorithm_name(algo: SortAlgorithm) -> &'static str {
    match algo {
        SortAlgorithm::InsertionSort => "insertion_sort",
        SortAlgorithm::BubbleSort => "bubble_sort",
        SortAlgorithm::SelectionSort => "selection_sort",
        SortAlgorithm::QuickSort => "quick_sort",
        SortAlgorithm::QuickSort3Way => "quick_sort_3way",
        SortAlgorithm::MergeSort => "merge_sort",
        SortAlgorithm::HeapSort => "heap_sort",
        SortAlgorithm::WeakHeapSort => "weak_heap_sort",
    }
}

/// Whether equal elements keep their relative order.
pub fn is_stable(algo: SortAlgorithm) -> bool {
    matches!(
        algo,
        SortAlgorithm::InsertionSort | SortAlgorithm::BubbleSort | SortAlgorithm::MergeSort
    )
}

/// Element counts at or below which the recursive sorts stop subdividing.
#[derive(Clone, Copy, Debug)]
pub struct TunedParams {
    pub quick_sort_threshold: usize,
    pub quick_sort_3way_threshold: usize,
    pub merge_sort_threshold: usize,
}

pub const TUNED_PARAMS: TunedParams = TunedParams {
    quick_sort_threshold: 24,
    quick_sort_3way_threshold: 24,
    merge_sort_threshold: 16,
};

// Partitioning needs at least three elements to pick a median from.
const _: () = assert!(
    TUNED_PARAMS.quick_sort_threshold >= 2
        && TUNED_PARAMS.quick_sort_3way_threshold >= 2
        && TUNED_PARAMS.merge_sort_threshold >= 2
);

/// Sorts `data` with `algo`, ordered by `cmp`.
///
/// Only [`SortAlgorithm::MergeSort`] and [`SortAlgorithm::WeakHeapSort`]
/// allocate, and only they can fail.
pub fn sort_by<T, F>(algo: SortAlgorithm, data: &mut [T], mut cmp: F) -> Result<()>
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    sort_layout(algo, Typed::new(), data, &mut cmp)
}

pub fn sort<T: Ord + Copy>(algo: SortAlgorithm, data: &mut [T]) -> Result<()> {
    sort_by(algo, data, T::cmp)
}

pub(crate) fn sort_layout<L: Layout, F: Compare<L::Item>>(
    algo: SortAlgorithm,
    layout: L,
    data: &mut [L::Unit],
    cmp: &mut F,
) -> Result<()> {
    match algo {
        SortAlgorithm::InsertionSort => algorithms::insertion_sort::sort(layout, data, cmp),
        SortAlgorithm::BubbleSort => algorithms::bubble_sort::sort(layout, data, cmp),
        SortAlgorithm::SelectionSort => algorithms::selection_sort::sort(layout, data, cmp),
        SortAlgorithm::QuickSort => algorithms::quick_sort_median3::sort(layout, data, cmp),
        SortAlgorithm::QuickSort3Way => {
            algorithms::quick_sort_3way::sort::<DefaultPartition, L, F>(layout, data, cmp)
        }
        SortAlgorithm::MergeSort => return algorithms::merge_sort_top_down::sort(layout, data, cmp),
        SortAlgorithm::HeapSort => algorithms::heap_sort::sort(layout, data, cmp),
        SortAlgorithm::WeakHeapSort => return algorithms::weak_heap_sort::sort(layout, data, cmp),
    }
    Ok(())
}
