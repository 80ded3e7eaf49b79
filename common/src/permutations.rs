//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use crate::vectors;

/// Returns the permutation that sorts `values` in ascending order
///
/// `permutation[i]` is the index into `values` of the element which ends up at
/// sorted position `i`. The sort is unstable: the relative order of equal
/// values is not specified and callers must not rely on it.
///
/// # Example
///
/// ```
/// use common::permutations;
/// let v = vec!["bb", "aa", "cc"];
/// assert_eq!(permutations::sort_permutation(&v), vec![1, 0, 2]);
/// ```
pub fn sort_permutation<T>(values: &[T]) -> Vec<usize>
where
    T: Ord + Sync,
{
    let mut permutation = (0..values.len()).collect::<Vec<usize>>();
    vectors::sort_unstable_by(&mut permutation, |&a, &b| values[a].cmp(&values[b]));
    permutation
}

/// Reorders `values` _in place_ so that `values[i]` becomes the old
/// `values[permutation[i]]`
///
/// Every cycle of the permutation is followed once with swaps, a visited
/// marker per position keeps the cycles apart. No second copy of the
/// elements is made.
///
/// # Panics
///
/// If `permutation` is not a permutation of `0..values.len()`.
///
/// # Example
///
/// ```
/// use common::permutations;
/// let mut v = vec!['b', 'a', 'c'];
/// permutations::apply_sort_permutation(&[1, 0, 2], &mut v);
/// assert_eq!(v, vec!['a', 'b', 'c']);
/// ```
pub fn apply_sort_permutation<T>(permutation: &[usize], values: &mut [T]) {
    assert_eq!(
        permutation.len(),
        values.len(),
        "permutation and values should have the same length"
    );
    let mut visited = vec![false; values.len()];

    for start in 0..values.len() {
        if visited[start] {
            continue;
        }
        let mut current = start;
        loop {
            visited[current] = true;
            let next = permutation[current];
            if next == start {
                break;
            }
            assert!(
                !visited[next],
                "index {} appears twice in the permutation",
                next
            );
            values.swap(current, next);
            current = next;
        }
    }
}

/// Sorts `values` in place and returns the permutation that was applied
///
/// Same contract as [`sort_permutation`]: `permutation[i]` is the pre-sort
/// index of the element now at position `i`.
pub fn permutation_sort<T>(values: &mut [T]) -> Vec<usize>
where
    T: Ord + Sync,
{
    if values.is_empty() {
        return Vec::new();
    }
    let permutation = sort_permutation(values);
    apply_sort_permutation(&permutation, values);
    permutation
}

/// Collects `items` in the order given by `permutation`
///
/// Used to bring metadata kept next to the input (labels, row ids) into the
/// order of a sorted collection built from that input.
///
/// # Example
///
/// ```
/// use common::permutations;
/// let labels = vec!["label-b", "label-a", "label-c"];
/// let sorted = permutations::gather(&[1, 0, 2], &labels);
/// assert_eq!(sorted, vec!["label-a", "label-b", "label-c"]);
/// ```
pub fn gather<T: Clone>(permutation: &[usize], items: &[T]) -> Vec<T> {
    permutation
        .iter()
        .map(|&idx| items[idx].clone())
        .collect::<Vec<T>>()
}

/// Returns the inverse permutation, `inverse[permutation[i]] == i`
pub fn inverse(permutation: &[usize]) -> Vec<usize> {
    let mut res = vec![0; permutation.len()];
    permutation
        .iter()
        .enumerate()
        .for_each(|(idx, &oidx)| res[oidx] = idx);
    res
}

/// Checks that every index of `0..permutation.len()` appears exactly once
pub fn is_permutation(permutation: &[usize]) -> bool {
    let mut seen = vec![false; permutation.len()];
    for &idx in permutation {
        match seen.get_mut(idx) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}
