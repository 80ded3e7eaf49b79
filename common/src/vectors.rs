//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use rayon::prelude::ParallelSliceMut;

/// Inputs of at least this many records are sorted with rayon
pub const PARALLEL_SORT_THRESHOLD: usize = 1000000;

/// Unstable sort of the slice in place with the given comparator
///
/// The alg switches to parallel implementation for
/// sizes of `PARALLEL_SORT_THRESHOLD` records and above.
/// Equal elements may end up in any order, which also may differ
/// between the sequential and the parallel path.
///
/// ## Example
///
/// ```
/// use common::vectors;
///
/// let mut v = vec![3, 1, 2];
/// vectors::sort_unstable_by(&mut v, |a, b| a.cmp(b));
///
/// assert_eq!(v, vec![1, 2, 3]);
/// ```
pub fn sort_unstable_by<T, F>(v: &mut [T], compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if v.len() < PARALLEL_SORT_THRESHOLD {
        debug!("Using sequential sort for {} records", v.len());
        v.sort_unstable_by(compare);
    } else {
        debug!("Using parallel sort for {} records", v.len());
        v.par_sort_unstable_by(compare);
    }
}

/// Returns true if the slice is in ascending order
pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    v.windows(2).all(|w| w[0] <= w[1])
}
