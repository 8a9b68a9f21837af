//! In-place heap sort
//!
//! The slice is first arranged as a binary max-heap under `cmp`; the root is
//! then repeatedly swapped to the end of the shrinking heap region, which
//! leaves the slice in ascending order.

use std::cmp::Ordering;

/// Sorts `v` in ascending order under `cmp` using binary heap extraction.
///
/// Not stable. `O(n log n)` comparisons and no allocation.
pub fn heap_sort_by<T, F>(v: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    // heapify: sift down every internal node, last parent first
    for root in (0..len / 2).rev() {
        sift_down(v, root, len, &mut cmp);
    }

    // extract the maximum into the tail
    for end in (1..len).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, &mut cmp);
    }
}

/// Restores the max-heap property below `root` within `v[..end]`.
fn sift_down<T, F>(v: &mut [T], mut root: usize, end: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let left = 2 * root + 1;
        if left >= end {
            break;
        }
        let right = left + 1;
        let child = if right < end && cmp(&v[left], &v[right]) == Ordering::Less {
            right
        } else {
            left
        };
        if cmp(&v[root], &v[child]) != Ordering::Less {
            break;
        }
        v.swap(root, child);
        root = child;
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    #[test]
    fn test_small_inputs() {
        let mut empty: Vec<u8> = Vec::new();
        heap_sort_by(&mut empty, Ord::cmp);
        assert!(empty.is_empty());

        let mut single = vec![7];
        heap_sort_by(&mut single, Ord::cmp);
        assert_eq!(single, vec![7]);

        let mut pair = vec![2, 1];
        heap_sort_by(&mut pair, Ord::cmp);
        assert_eq!(pair, vec![1, 2]);
    }

    #[test]
    fn test_matches_std_sort() {
        let mut rng = SmallRng::seed_from_u64(42);
        for len in [3, 10, 33, 257, 1000] {
            let mut values: Vec<u32> = (0..len).map(|_| rng.random_range(0..50)).collect();
            let mut expected = values.clone();
            expected.sort_unstable();
            heap_sort_by(&mut values, Ord::cmp);
            assert_eq!(values, expected);
        }
    }

    #[test]
    fn test_reverse_comparator() {
        let mut values = vec![1, 5, 3, 4, 2];
        heap_sort_by(&mut values, |a, b| b.cmp(a));
        assert_eq!(values, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_already_sorted() {
        let mut values: Vec<u16> = (0..64).collect();
        heap_sort_by(&mut values, Ord::cmp);
        assert_eq!(values, (0..64).collect::<Vec<_>>());
    }
}
