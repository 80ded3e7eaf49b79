//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use common::vectors;

/// Indices of the `client` values that occur at least once in `sorted`
///
/// `sorted` must be in ascending order, `client` may be in any order.
/// A copy of the client side is paired with the original indices and sorted,
/// after which one merge pass finds the matches, in total
/// `O(n log(n) + n + m)` for `n` client and `m` server values.
///
/// Every client occurrence of a matching value yields exactly one index, no
/// matter how often the value repeats in `sorted`. The indices come out in
/// the sorted order of their values; among equal client values the order is
/// unspecified.
pub fn intersect<T>(sorted: &[T], client: &[T]) -> Vec<usize>
where
    T: Ord + Sync,
{
    let mut pairs = client
        .iter()
        .enumerate()
        .map(|(i, e)| (e, i))
        .collect::<Vec<(&T, usize)>>();
    vectors::sort_unstable_by(&mut pairs, |a, b| a.0.cmp(b.0));
    merge_matches(&pairs, sorted)
}

/// Both inputs sorted by value, `pairs` carries the original client index
fn merge_matches<T: Ord>(pairs: &[(&T, usize)], sorted: &[T]) -> Vec<usize> {
    let mut res: Vec<usize> = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < pairs.len() && j < sorted.len() {
        match pairs[i].0.cmp(&sorted[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            // server side stays put so client duplicates match too
            Ordering::Equal => {
                res.push(pairs[i].1);
                i += 1;
            }
        }
    }
    res
}
