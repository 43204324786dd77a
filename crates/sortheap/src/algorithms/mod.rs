pub mod bisect;
pub mod bubble_sort;
pub mod common;
pub mod heap_sort;
pub mod insertion_sort;
pub mod merge_sort_top_down;
pub mod quick_sort_3way;
pub mod quick_sort_median3;
pub mod selection_sort;
pub mod weak_heap_sort;
