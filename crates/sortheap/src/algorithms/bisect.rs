use std::cmp::Ordering;

use crate::access::{Layout, Typed};

/// Binary search of `key` in `data`, which must be sorted consistently with
/// `cmp`. `cmp` compares the key against an element.
///
/// Returns the index of a matching element. With duplicates any of them may
/// be returned.
pub fn bisect_search<K, T, F>(key: &K, data: &[T], mut cmp: F) -> Option<usize>
where
    K: ?Sized,
    T: Copy,
    F: FnMut(&K, &T) -> Ordering,
{
    search(Typed::new(), key, data, &mut cmp)
}

pub(crate) fn search<L, K, F>(layout: L, key: &K, data: &[L::Unit], cmp: &mut F) -> Option<usize>
where
    L: Layout,
    K: ?Sized,
    F: FnMut(&K, &L::Item) -> Ordering,
{
    let mut lo = 0;
    let mut hi = layout.count(data);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match cmp(key, layout.at(data, mid)) {
            Ordering::Less => hi = mid,
            Ordering::Greater => lo = mid + 1,
            Ordering::Equal => return Some(mid),
        }
    }
    None
}
